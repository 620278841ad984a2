//! The decoded summary of a single arXiv listing.
//!
//! A [`PaperSummary`] is built once from an Atom `entry` and never changes
//! afterwards. Lists of summaries are owned by a [`PagedList`] and dropped
//! with it when a new search clears the list.
//!
//! # Examples
//!
//! ```
//! use scholarly::paper::PaperSummary;
//!
//! let paper = PaperSummary {
//!   title:            "Attention Is All You Need".to_string(),
//!   authors:          vec!["Ashish Vaswani".into(), "Noam Shazeer".into(), "Niki Parmar".into()],
//!   abstract_text:    String::new(),
//!   published:        None,
//!   link:             "http://arxiv.org/abs/1706.03762v7".to_string(),
//!   pdf_url:          None,
//!   primary_category: Some("cs.CL".to_string()),
//!   origin:           None,
//! };
//!
//! assert_eq!(paper.arxiv_id(), "1706.03762v7");
//! assert_eq!(paper.display_authors(2), "Ashish Vaswani, Noam Shazeer et al.");
//! ```

use super::*;

/// Metadata for one paper as listed by the arXiv API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperSummary {
  /// The paper's title, with whitespace collapsed
  pub title:            String,
  /// Author names in listing order
  pub authors:          Vec<String>,
  /// Abstract text, with whitespace collapsed
  pub abstract_text:    String,
  /// When the first version was submitted, if arXiv reported a valid timestamp
  pub published:        Option<DateTime<Utc>>,
  /// Canonical abstract page, taken from the entry's `id`
  pub link:             String,
  /// Direct link to the PDF, when the entry lists one
  pub pdf_url:          Option<String>,
  /// Primary arXiv category (e.g. `cs.LG`)
  pub primary_category: Option<String>,
  /// The request that produced this summary
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub origin:           Option<Origin>,
}

/// Where a [`PaperSummary`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
  /// The query that was sent
  pub query: SearchQuery,
  /// Zero-based page index of the request
  pub page:  usize,
}

impl PaperSummary {
  /// The arXiv identifier, i.e. the last path segment of the canonical link.
  ///
  /// Old-style identifiers keep their archive prefix, so
  /// `http://arxiv.org/abs/hep-th/9901001v1` yields `hep-th/9901001v1`.
  pub fn arxiv_id(&self) -> &str {
    let path = self.link.split_once("/abs/").map(|(_, id)| id);
    path.unwrap_or_else(|| self.link.rsplit('/').next().unwrap_or(&self.link))
  }

  /// Author names joined for display, truncated after `limit` names.
  ///
  /// Anything past the limit is replaced by "et al."; a limit of zero shows
  /// every author.
  pub fn display_authors(&self, limit: usize) -> String {
    if limit == 0 || self.authors.len() <= limit {
      return self.authors.join(", ");
    }
    format!("{} et al.", self.authors[..limit].join(", "))
  }

  /// Tags this summary with the request that produced it.
  pub fn with_origin(mut self, query: &SearchQuery, page: usize) -> Self {
    self.origin = Some(Origin { query: query.clone(), page });
    self
  }
}

impl Display for PaperSummary {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({})", self.title, self.arxiv_id())
  }
}
