//! Accumulating paginated lists.
//!
//! A [`PagedList`] owns the papers loaded so far for one listing together with
//! its pagination state. Loading is split in two halves so the fetch itself can
//! run anywhere:
//!
//! 1. [`PagedList::begin_load`] checks the gates (not already loading, not
//!    exhausted), marks the list as loading and hands out a [`PageTicket`].
//! 2. [`PagedList::complete`] takes the ticket back with the fetch result.
//!
//! Tickets carry the list's generation. [`PagedList::reset`] bumps the
//! generation, so a response that was in flight when the list was reset is
//! recognised and dropped instead of being mixed into the new listing.
//!
//! Failures are kept apart from exhaustion: a failed page leaves the items,
//! `has_more` and the page counter untouched and records the error, so the
//! next trigger asks for the same page again.
//!
//! # Examples
//!
//! ```
//! use scholarly::pager::{LoadOutcome, PagedList};
//!
//! let mut list = PagedList::new(10);
//! let ticket = list.begin_load().unwrap();
//! assert!(list.begin_load().is_none()); // one fetch at a time
//!
//! let outcome = list.complete(ticket, Ok(Vec::new()));
//! assert_eq!(outcome, LoadOutcome::Appended { added: 0, exhausted: true });
//! assert!(!list.has_more());
//! ```

use super::*;

/// Whether a list is waiting on a fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
  /// No request in flight
  #[default]
  Idle,
  /// A page request has been issued and not yet completed
  Loading,
}

/// Identifies one issued page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
  /// Generation of the list when the request was issued
  pub generation: u64,
  /// Zero-based index of the requested page
  pub page:       usize,
}

/// What [`PagedList::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
  /// The page was appended
  Appended {
    /// Papers added by this page
    added:     usize,
    /// Whether this page was short, ending the listing
    exhausted: bool,
  },
  /// The fetch failed; the list is unchanged apart from its error state
  Failed,
  /// The result belonged to an earlier generation and was discarded
  Stale,
}

/// Papers accumulated page by page for a single listing.
#[derive(Debug, Clone)]
pub struct PagedList {
  /// Papers loaded so far, in page order
  items:      Vec<PaperSummary>,
  /// Expected page length; anything shorter ends the listing
  page_size:  usize,
  /// Index of the next page to request
  next_page:  usize,
  /// False once a short page has been seen
  has_more:   bool,
  /// Whether a request is in flight
  state:      LoadState,
  /// Bumped on every reset
  generation: u64,
  /// Message of the most recent failed load, cleared by the next success
  last_error: Option<String>,
}

impl PagedList {
  /// Creates an empty list expecting pages of `page_size` papers.
  pub fn new(page_size: usize) -> Self {
    Self {
      items: Vec::new(),
      page_size,
      next_page: 0,
      has_more: true,
      state: LoadState::Idle,
      generation: 0,
      last_error: None,
    }
  }

  /// Papers loaded so far.
  pub fn items(&self) -> &[PaperSummary] { &self.items }

  /// Number of papers loaded.
  pub fn len(&self) -> usize { self.items.len() }

  /// Whether nothing has been loaded.
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Whether further pages may exist.
  pub fn has_more(&self) -> bool { self.has_more }

  /// Whether a request is in flight.
  pub fn is_loading(&self) -> bool { self.state == LoadState::Loading }

  /// Current load state.
  pub fn state(&self) -> LoadState { self.state }

  /// Index of the page the next load will request.
  pub fn next_page(&self) -> usize { self.next_page }

  /// Current generation.
  pub fn generation(&self) -> u64 { self.generation }

  /// Message of the last failed load, if the latest load failed.
  pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

  /// Expected page length.
  pub fn page_size(&self) -> usize { self.page_size }

  /// Whether a new page may be requested right now.
  pub fn can_load(&self) -> bool { self.has_more && !self.is_loading() }

  /// Starts loading the next page.
  ///
  /// Returns `None` without changing anything if a request is already in
  /// flight or the listing is exhausted.
  pub fn begin_load(&mut self) -> Option<PageTicket> {
    if !self.can_load() {
      trace!(
        "Load suppressed (loading: {}, has_more: {})",
        self.is_loading(),
        self.has_more
      );
      return None;
    }
    self.state = LoadState::Loading;
    Some(PageTicket { generation: self.generation, page: self.next_page })
  }

  /// Completes the request identified by `ticket`.
  ///
  /// Results from an earlier generation, or for a request that is no longer
  /// outstanding, are discarded.
  pub fn complete(
    &mut self,
    ticket: PageTicket,
    result: Result<Vec<PaperSummary>>,
  ) -> LoadOutcome {
    if ticket.generation != self.generation
      || ticket.page != self.next_page
      || !self.is_loading()
    {
      debug!(
        "Discarding stale page {} (generation {}, current {})",
        ticket.page, ticket.generation, self.generation
      );
      return LoadOutcome::Stale;
    }

    self.state = LoadState::Idle;
    match result {
      Ok(papers) => {
        let added = papers.len();
        let exhausted = added < self.page_size;
        self.items.extend(papers);
        self.next_page += 1;
        self.has_more = !exhausted;
        self.last_error = None;
        debug!("Appended page {} ({} papers, exhausted: {})", ticket.page, added, exhausted);
        LoadOutcome::Appended { added, exhausted }
      },
      Err(e) => {
        error!("Failed to load page {}: {}", ticket.page, e);
        self.last_error = Some(e.to_string());
        LoadOutcome::Failed
      },
    }
  }

  /// Empties the list and starts a new generation.
  ///
  /// Any request still in flight becomes stale.
  pub fn reset(&mut self) {
    self.items.clear();
    self.next_page = 0;
    self.has_more = true;
    self.state = LoadState::Idle;
    self.generation += 1;
    self.last_error = None;
  }

  /// Resets the list and starts loading its first page.
  ///
  /// Unlike [`PagedList::begin_load`] this always yields a ticket, since a
  /// reset list is neither loading nor exhausted.
  pub fn restart(&mut self) -> PageTicket {
    self.reset();
    self.state = LoadState::Loading;
    PageTicket { generation: self.generation, page: 0 }
  }

  /// Whether `position` is within `threshold` rows of the last loaded paper.
  ///
  /// An empty list counts as being at its end.
  pub fn near_end(&self, position: usize, threshold: usize) -> bool {
    self.items.len().saturating_sub(position.saturating_add(1)) <= threshold
  }
}
