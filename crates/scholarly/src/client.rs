//! HTTP access to the arXiv listing API.
//!
//! [`ArxivClient`] turns a [`SearchQuery`] and a zero-based page index into a
//! single `GET` against the configured endpoint and decodes the Atom body.
//! Everything above it talks to the [`PaperSource`] trait instead, so the
//! pagination logic can run against any source of pages.
//!
//! # Examples
//!
//! ```no_run
//! use scholarly::{client::ArxivClient, config::Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new(&Config::default())?;
//!
//! let newest = client.recent(0).await?;
//! let hits = client.search("topological insulators", 1).await?;
//! println!("{} new, {} on the second page of hits", newest.len(), hits.len());
//! # Ok(())
//! # }
//! ```

use super::*;

/// A source of fixed-size pages of papers.
///
/// A page shorter than [`PaperSource::page_size`] means the listing has no
/// further pages.
#[async_trait]
pub trait PaperSource: Send + Sync {
  /// Number of papers requested per page.
  fn page_size(&self) -> usize;

  /// Fetches one page of results.
  ///
  /// # Arguments
  ///
  /// * `query` - The listing to page through
  /// * `page` - Zero-based page index
  async fn fetch_page(&self, query: &SearchQuery, page: usize) -> Result<Vec<PaperSummary>>;
}

/// Client for the arXiv query API.
#[derive(Debug, Clone)]
pub struct ArxivClient {
  /// Shared HTTP connection pool
  http:      reqwest::Client,
  /// Base query URL without parameters
  endpoint:  Url,
  /// Papers requested per page
  page_size: usize,
}

impl ArxivClient {
  /// Builds a client from configuration.
  ///
  /// # Errors
  ///
  /// Fails if the configuration does not validate or the HTTP client cannot
  /// be constructed (for example when no TLS backend is available).
  pub fn new(config: &Config) -> Result<Self> {
    config.validate()?;
    let http = reqwest::Client::builder()
      .timeout(config.timeout())
      .user_agent(config.user_agent.as_str())
      .build()?;
    Ok(Self { http, endpoint: config.endpoint_url()?, page_size: config.page_size })
  }

  /// The URL requested for `page` of `query`.
  ///
  /// # Errors
  ///
  /// Returns [`ScholarlyError::PageOutOfRange`] when the page's first offset
  /// does not fit in a `usize`.
  pub fn page_url(&self, query: &SearchQuery, page: usize) -> Result<Url> {
    let start = page.checked_mul(self.page_size).ok_or(ScholarlyError::PageOutOfRange(page))?;
    let mut url = self.endpoint.clone();
    query.apply_to(&mut url, start, self.page_size);
    Ok(url)
  }

  /// Fetches and decodes one page, including the feed-level counters.
  ///
  /// # Errors
  ///
  /// - [`ScholarlyError::Network`] if the request fails or times out
  /// - [`ScholarlyError::Api`] for a non-success status or an arXiv error entry
  /// - [`ScholarlyError::Xml`] or [`ScholarlyError::Decode`] for an unusable body
  /// - [`ScholarlyError::PageOutOfRange`] for a page with no representable offset
  pub async fn fetch(&self, query: &SearchQuery, page: usize) -> Result<Page> {
    let url = self.page_url(query, page)?;
    debug!("Fetching page {} of {:?} via: {}", page, query, url);

    let response = self.http.get(url).send().await?;
    let status = response.status();
    let data = response.bytes().await?;

    trace!("arXiv response ({}): {}", status, String::from_utf8_lossy(&data));

    if !status.is_success() {
      // arXiv explains rejected queries in an error feed; prefer its message.
      return Err(match decode_feed(&data) {
        Err(e @ ScholarlyError::Api(_)) => e,
        _ => ScholarlyError::Api(format!("arXiv returned HTTP {status}")),
      });
    }

    let mut decoded = decode_feed(&data)?;
    decoded.entries =
      decoded.entries.into_iter().map(|paper| paper.with_origin(query, page)).collect();
    Ok(decoded)
  }

  /// Fetches a page of keyword search results.
  ///
  /// Blank terms are rejected before any request is made.
  pub async fn search(&self, terms: &str, page: usize) -> Result<Page> {
    self.fetch(&SearchQuery::parse(terms)?, page).await
  }

  /// Fetches a page of the most recent submissions.
  pub async fn recent(&self, page: usize) -> Result<Page> {
    self.fetch(&SearchQuery::Recent, page).await
  }
}

#[async_trait]
impl PaperSource for ArxivClient {
  fn page_size(&self) -> usize { self.page_size }

  async fn fetch_page(&self, query: &SearchQuery, page: usize) -> Result<Vec<PaperSummary>> {
    Ok(self.fetch(query, page).await?.entries)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_page_url_offsets() {
    let client = ArxivClient::new(&Config::default()).unwrap();
    let url = client.page_url(&SearchQuery::text("spin glass"), 3).unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    assert_eq!(url.path(), "/api/query");
    assert!(pairs.contains(&("start".to_string(), "30".to_string())));
    assert!(pairs.contains(&("max_results".to_string(), "10".to_string())));
  }

  #[test]
  fn test_page_url_rejects_overflowing_offset() {
    let client = ArxivClient::new(&Config::default()).unwrap();
    let result = client.page_url(&SearchQuery::Recent, usize::MAX);
    assert!(matches!(result, Err(ScholarlyError::PageOutOfRange(usize::MAX))));
  }

  #[tokio::test]
  async fn test_out_of_range_page_makes_no_request() {
    let client =
      ArxivClient::new(&Config::default().with_endpoint("http://127.0.0.1:9/api/query")).unwrap();
    let result = client.recent(usize::MAX / 2).await;
    assert!(matches!(result, Err(ScholarlyError::PageOutOfRange(_))));
  }

  #[test]
  fn test_rejects_invalid_config() {
    let config = Config { page_size: 0, ..Config::default() };
    assert!(ArxivClient::new(&config).is_err());
  }

  #[tokio::test]
  async fn test_blank_search_makes_no_request() {
    // The endpoint is unroutable; an attempted request would surface as a network error.
    let client =
      ArxivClient::new(&Config::default().with_endpoint("http://127.0.0.1:9/api/query")).unwrap();
    assert!(matches!(client.search("   ", 0).await, Err(ScholarlyError::EmptyQuery)));
  }
}
