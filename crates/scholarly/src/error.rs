//! Error types for the scholarly library.
//!
//! Failures fall into two families that callers usually want to tell apart:
//! - Transport failures, where the request never produced a usable body
//! - Response failures, where a body arrived but could not be turned into papers
//!
//! # Examples
//!
//! ```no_run
//! use scholarly::{client::ArxivClient, config::Config, prelude::*};
//!
//! # async fn example() -> Result<(), ScholarlyError> {
//! let client = ArxivClient::new(&Config::default())?;
//! match client.fetch_page(&SearchQuery::text("graph neural networks"), 0).await {
//!   Err(ScholarlyError::Network(e)) => println!("Network error: {}", e),
//!   Err(ScholarlyError::Api(message)) => println!("arXiv refused the query: {}", message),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(papers) => println!("{} papers", papers.len()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`scholarly`](crate) crate.
pub type Result<T> = core::result::Result<T, ScholarlyError>;

/// Errors that can occur when searching arXiv.
#[derive(Error, Debug)]
pub enum ScholarlyError {
  /// A network request failed.
  ///
  /// This covers an unreachable endpoint, timeouts, TLS failures and
  /// connections dropped while reading the body.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The response body was not well-formed XML.
  #[error("Malformed response: {0}")]
  Xml(#[from] quick_xml::Error),

  /// An element carried an attribute that could not be read.
  #[error("Malformed attribute: {0}")]
  Attribute(#[from] quick_xml::events::attributes::AttrError),

  /// The response was well-formed but was not an arXiv Atom feed.
  #[error("Could not decode response: {0}")]
  Decode(String),

  /// The API answered with an error.
  ///
  /// Either the HTTP status was not a success, or arXiv returned its error
  /// feed (an entry whose id points at `/api/errors`). The string carries the
  /// message arXiv gave, or the status line.
  #[error("API error: {0}")]
  Api(String),

  /// A search was submitted with nothing but whitespace in it.
  #[error("Search query is empty")]
  EmptyQuery,

  /// The configured endpoint is not a valid URL.
  #[error(transparent)]
  Url(#[from] url::ParseError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A configuration value is out of range.
  #[error("{0}")]
  Config(String),

  /// The requested page lies past any offset the API can express.
  #[error("Page {0} is out of range")]
  PageOutOfRange(usize),
}

impl ScholarlyError {
  /// Whether the error came from the transport rather than from the response body.
  pub fn is_network(&self) -> bool { matches!(self, Self::Network(_)) }
}
