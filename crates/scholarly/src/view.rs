//! The search view state machine.
//!
//! [`SearchView`] is everything a front-end needs to present arXiv listings:
//! the text being typed, the recent-submissions feed shown before any search,
//! the search results shown after one, and the rules deciding when a page may
//! be requested. It never performs I/O itself. Each operation that wants a
//! page returns a [`LoadRequest`]; the front-end runs it (see
//! [`LoadRequest::execute`]) wherever it likes and hands the
//! [`LoadResponse`] back to [`SearchView::apply`].
//!
//! # Examples
//!
//! ```no_run
//! use scholarly::{client::ArxivClient, config::Config, view::SearchView};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = ArxivClient::new(&config)?;
//! let mut view = SearchView::new(&config);
//!
//! // Recent feed first
//! if let Some(request) = view.start() {
//!   let response = request.execute(&client).await;
//!   view.apply(response);
//! }
//!
//! // Then a search
//! view.set_input("superconductivity");
//! let request = view.submit()?;
//! view.apply(request.execute(&client).await);
//! println!("{} results", view.active().len());
//! # Ok(())
//! # }
//! ```

use super::*;

/// The two listings a view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
  /// Results of the current keyword search
  Search,
  /// Most recent submissions, shown until the first search
  Recent,
}

/// A page the view wants fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
  /// The list the page belongs to
  pub feed:   Feed,
  /// What to ask for
  pub query:  SearchQuery,
  /// Page index and generation the list expects back
  pub ticket: PageTicket,
}

/// A finished [`LoadRequest`].
#[derive(Debug)]
pub struct LoadResponse {
  /// The request that was run
  pub request: LoadRequest,
  /// The fetched papers, or why the fetch failed
  pub result:  Result<Vec<PaperSummary>>,
}

impl LoadRequest {
  /// Runs the request against `source`.
  ///
  /// Failures are carried in the response rather than returned, since the
  /// view records them as the list's error state.
  pub async fn execute<S: PaperSource + ?Sized>(self, source: &S) -> LoadResponse {
    let result = source.fetch_page(&self.query, self.ticket.page).await;
    LoadResponse { request: self, result }
  }
}

/// State of an interactive arXiv search.
#[derive(Debug, Clone)]
pub struct SearchView {
  /// Text currently in the search box
  input:            String,
  /// Query behind the search list, once a search has been submitted
  active_query:     Option<SearchQuery>,
  /// Keyword search results
  search:           PagedList,
  /// Recent-submissions feed
  recent:           PagedList,
  /// Whether the recent feed is on display; cleared for good by the first search
  show_recent:      bool,
  /// Category shortcut names
  categories:       Vec<String>,
  /// Rows from the bottom at which scrolling requests the next page
  scroll_threshold: usize,
}

impl SearchView {
  /// Creates a view showing the (not yet loaded) recent feed.
  pub fn new(config: &Config) -> Self {
    Self {
      input:            String::new(),
      active_query:     None,
      search:           PagedList::new(config.page_size),
      recent:           PagedList::new(config.page_size),
      show_recent:      true,
      categories:       config.categories.clone(),
      scroll_threshold: config.scroll_threshold,
    }
  }

  /// Text currently in the search box.
  pub fn input(&self) -> &str { &self.input }

  /// Replaces the search box text.
  pub fn set_input(&mut self, input: impl Into<String>) { self.input = input.into(); }

  /// Types one character into the search box.
  pub fn push_input(&mut self, c: char) { self.input.push(c); }

  /// Deletes the last character of the search box.
  pub fn pop_input(&mut self) { self.input.pop(); }

  /// Query of the submitted search, if any.
  pub fn active_query(&self) -> Option<&SearchQuery> { self.active_query.as_ref() }

  /// Whether the recent feed is on display.
  pub fn showing_recent(&self) -> bool { self.show_recent }

  /// Which list is on display.
  pub fn active_feed(&self) -> Feed { if self.show_recent { Feed::Recent } else { Feed::Search } }

  /// The list on display.
  pub fn active(&self) -> &PagedList { self.list(self.active_feed()) }

  /// One of the two lists.
  pub fn list(&self, feed: Feed) -> &PagedList {
    match feed {
      Feed::Search => &self.search,
      Feed::Recent => &self.recent,
    }
  }

  /// Mutable access to one of the two lists.
  fn list_mut(&mut self, feed: Feed) -> &mut PagedList {
    match feed {
      Feed::Search => &mut self.search,
      Feed::Recent => &mut self.recent,
    }
  }

  /// Category shortcut names.
  pub fn categories(&self) -> &[String] { &self.categories }

  /// Whether the list on display is waiting on a fetch.
  pub fn is_loading(&self) -> bool { self.active().is_loading() }

  /// Whether the submit action is currently meaningful.
  pub fn can_submit(&self) -> bool { !self.input.trim().is_empty() }

  /// Requests the first page of the recent feed.
  ///
  /// Does nothing once a search has replaced the recent feed, or once the
  /// first page has been loaded or requested.
  pub fn start(&mut self) -> Option<LoadRequest> {
    if !self.show_recent || !self.recent.is_empty() || self.recent.next_page() > 0 {
      return None;
    }
    self.request_next(Feed::Recent)
  }

  /// Submits the search box as a new search.
  ///
  /// The search list is emptied straight away, before the first page of the
  /// new results arrives, and the recent feed is hidden for the rest of the
  /// session. A search still in flight becomes stale.
  ///
  /// # Errors
  ///
  /// Returns [`ScholarlyError::EmptyQuery`] if the search box is blank; the
  /// view is left untouched.
  pub fn submit(&mut self) -> Result<LoadRequest> {
    let query = SearchQuery::parse(&self.input)?;
    debug!("Submitting search {:?}", query);

    let ticket = self.search.restart();
    self.show_recent = false;
    self.active_query = Some(query.clone());
    Ok(LoadRequest { feed: Feed::Search, query, ticket })
  }

  /// Runs the category shortcut `name`: types it into the search box and submits.
  pub fn select_category(&mut self, name: &str) -> Result<LoadRequest> {
    self.set_input(name);
    self.submit()
  }

  /// Runs the category shortcut at `index`, if there is one.
  pub fn select_category_at(&mut self, index: usize) -> Option<Result<LoadRequest>> {
    let name = self.categories.get(index)?.clone();
    Some(self.select_category(&name))
  }

  /// Requests the next page of the list on display.
  ///
  /// Returns `None` if that list is already loading or exhausted.
  pub fn load_more(&mut self) -> Option<LoadRequest> { self.request_next(self.active_feed()) }

  /// Reports that the row at `position` of the list on display is visible.
  ///
  /// Requests the next page when the row is near the bottom of the list.
  pub fn on_scroll(&mut self, position: usize) -> Option<LoadRequest> {
    if self.active().near_end(position, self.scroll_threshold) {
      self.load_more()
    } else {
      None
    }
  }

  /// Applies a finished request to the list it belongs to.
  pub fn apply(&mut self, response: LoadResponse) -> LoadOutcome {
    let LoadResponse { request, result } = response;
    let outcome = self.list_mut(request.feed).complete(request.ticket, result);
    trace!("{:?} page {} -> {:?}", request.feed, request.ticket.page, outcome);
    outcome
  }

  /// Issues the next page of `feed` if its gates allow.
  fn request_next(&mut self, feed: Feed) -> Option<LoadRequest> {
    let query = match feed {
      Feed::Recent => SearchQuery::Recent,
      Feed::Search => self.active_query.clone()?,
    };
    let ticket = self.list_mut(feed).begin_load()?;
    Some(LoadRequest { feed, query, ticket })
  }
}

#[cfg(test)]
mod tests {
  use std::{collections::HashMap, sync::Mutex};

  use super::*;

  /// Serves canned page lengths; a missing entry fails like a dropped connection.
  struct FakeSource {
    /// Page lengths keyed by query and page index
    pages: HashMap<(SearchQuery, usize), usize>,
    /// Every request seen, in order
    calls: Mutex<Vec<(SearchQuery, usize)>>,
  }

  impl FakeSource {
    fn new(pages: &[(SearchQuery, usize, usize)]) -> Self {
      Self {
        pages: pages.iter().map(|(q, page, len)| ((q.clone(), *page), *len)).collect(),
        calls: Mutex::new(Vec::new()),
      }
    }

    fn calls(&self) -> Vec<(SearchQuery, usize)> { self.calls.lock().unwrap().clone() }
  }

  #[async_trait]
  impl PaperSource for FakeSource {
    fn page_size(&self) -> usize { 10 }

    async fn fetch_page(&self, query: &SearchQuery, page: usize) -> Result<Vec<PaperSummary>> {
      self.calls.lock().unwrap().push((query.clone(), page));
      let len = self
        .pages
        .get(&(query.clone(), page))
        .ok_or_else(|| ScholarlyError::Api("connection reset".to_string()))?;
      Ok(
        (0..*len)
          .map(|i| {
            PaperSummary {
              title:            format!("{query} #{}", page * 10 + i),
              authors:          vec!["A. Author".to_string()],
              abstract_text:    String::new(),
              published:        None,
              link:             format!("http://arxiv.org/abs/{page}.{i}"),
              pdf_url:          None,
              primary_category: None,
              origin:           None,
            }
            .with_origin(query, page)
          })
          .collect(),
      )
    }
  }

  fn view() -> SearchView { SearchView::new(&Config::default()) }

  #[tokio::test]
  async fn test_recent_feed_then_search() {
    let source = FakeSource::new(&[
      (SearchQuery::Recent, 0, 10),
      (SearchQuery::text("optics"), 0, 10),
      (SearchQuery::text("optics"), 1, 4),
    ]);
    let mut view = view();
    assert!(view.showing_recent());

    let request = view.start().unwrap();
    assert_eq!(request.feed, Feed::Recent);
    view.apply(request.execute(&source).await);
    assert_eq!(view.active().len(), 10);
    assert!(view.start().is_none());

    view.set_input("optics");
    let request = view.submit().unwrap();
    assert!(!view.showing_recent());
    assert!(view.active().is_empty());
    view.apply(request.execute(&source).await);

    let request = view.load_more().unwrap();
    assert_eq!(request.ticket.page, 1);
    view.apply(request.execute(&source).await);

    assert_eq!(view.active().len(), 14);
    assert!(!view.active().has_more());
    assert!(view.load_more().is_none());
    assert_eq!(view.list(Feed::Recent).len(), 10);
  }

  #[tokio::test]
  async fn test_new_search_clears_before_first_page() {
    let source = FakeSource::new(&[
      (SearchQuery::text("lasers"), 0, 10),
      (SearchQuery::text("masers"), 0, 10),
    ]);
    let mut view = view();

    view.set_input("lasers");
    let request = view.submit().unwrap();
    view.apply(request.execute(&source).await);
    assert_eq!(view.active().len(), 10);

    view.set_input("masers");
    let request = view.submit().unwrap();
    assert!(view.active().is_empty());
    assert!(view.is_loading());

    view.apply(request.execute(&source).await);
    assert!(view.active().items().iter().all(|p| p.title.starts_with("masers")));
  }

  #[tokio::test]
  async fn test_stale_search_is_discarded() {
    let source = FakeSource::new(&[
      (SearchQuery::text("old"), 0, 10),
      (SearchQuery::text("new"), 0, 3),
    ]);
    let mut view = view();

    view.set_input("old");
    let slow = view.submit().unwrap();
    view.set_input("new");
    let fast = view.submit().unwrap();

    view.apply(fast.execute(&source).await);
    assert_eq!(view.apply(slow.execute(&source).await), LoadOutcome::Stale);

    assert_eq!(view.active().len(), 3);
    assert!(view.active().items().iter().all(|p| p.title.starts_with("new")));
  }

  #[tokio::test]
  async fn test_failed_page_keeps_list() {
    let source = FakeSource::new(&[(SearchQuery::text("flaky"), 0, 10)]);
    let mut view = view();

    view.set_input("flaky");
    let request = view.submit().unwrap();
    view.apply(request.execute(&source).await);

    // Page 1 is not served, so it fails.
    let request = view.load_more().unwrap();
    assert_eq!(view.apply(request.execute(&source).await), LoadOutcome::Failed);

    assert_eq!(view.active().len(), 10);
    assert!(view.active().has_more());
    assert!(view.active().last_error().unwrap().contains("connection reset"));
    assert_eq!(view.load_more().unwrap().ticket.page, 1);
  }

  #[test]
  fn test_blank_submit_is_rejected() {
    let mut view = view();
    view.set_input("   ");
    assert!(!view.can_submit());
    assert!(matches!(view.submit(), Err(ScholarlyError::EmptyQuery)));
    assert!(view.showing_recent());
    assert!(view.active_query().is_none());
  }

  #[tokio::test]
  async fn test_category_is_typed_search() {
    let source = FakeSource::new(&[(SearchQuery::text("Mathematics"), 0, 2)]);

    let mut typed = view();
    typed.set_input("Mathematics");
    let typed_request = typed.submit().unwrap();

    let mut shortcut = view();
    let index = shortcut.categories().iter().position(|c| c == "Mathematics").unwrap();
    let shortcut_request = shortcut.select_category_at(index).unwrap().unwrap();

    assert_eq!(typed_request, shortcut_request);
    assert_eq!(shortcut.input(), "Mathematics");

    typed.apply(typed_request.execute(&source).await);
    shortcut.apply(shortcut_request.execute(&source).await);
    assert_eq!(typed.active().items(), shortcut.active().items());
    assert!(shortcut.select_category_at(99).is_none());
  }

  #[tokio::test]
  async fn test_scroll_while_loading_issues_nothing() {
    let source = FakeSource::new(&[
      (SearchQuery::text("ice"), 0, 10),
      (SearchQuery::text("ice"), 1, 10),
    ]);
    let mut view = view();

    view.set_input("ice");
    let request = view.submit().unwrap();
    view.apply(request.execute(&source).await);

    assert!(view.on_scroll(0).is_none());
    let request = view.on_scroll(9).unwrap();
    assert!(view.on_scroll(9).is_none());
    assert!(view.on_scroll(9).is_none());

    view.apply(request.execute(&source).await);
    assert_eq!(source.calls().len(), 2);
    assert_eq!(view.active().len(), 20);
  }

  #[test]
  fn test_input_editing() {
    let mut view = view();
    view.push_input('q');
    view.push_input('c');
    view.push_input('d');
    view.pop_input();
    assert_eq!(view.input(), "qc");
  }
}
