//! What to ask the arXiv API for.
//!
//! There are exactly two kinds of listing: a keyword search, passed through to
//! arXiv as `all:<keywords>`, and the query-less feed of the most recently
//! submitted papers. Both page the same way.

use super::*;

/// `search_query` value used for the recent-submissions feed.
const RECENT_SEARCH_QUERY: &str = "all";

/// A listing request, independent of which page is wanted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "terms", rename_all = "snake_case")]
pub enum SearchQuery {
  /// Free-text keywords matched against every field
  Text(String),
  /// The newest submissions, sorted by submission date descending
  Recent,
}

impl SearchQuery {
  /// A keyword search. The text is sent as typed.
  pub fn text(terms: impl Into<String>) -> Self { Self::Text(terms.into()) }

  /// Parses user input into a keyword search.
  ///
  /// Surrounding whitespace is trimmed. Input that is empty after trimming is
  /// rejected with [`ScholarlyError::EmptyQuery`].
  pub fn parse(input: &str) -> Result<Self> {
    let terms = input.trim();
    if terms.is_empty() {
      return Err(ScholarlyError::EmptyQuery);
    }
    Ok(Self::text(terms))
  }

  /// Appends the query parameters for the page starting at `start` to `url`.
  pub fn apply_to(&self, url: &mut Url, start: usize, max_results: usize) {
    let mut pairs = url.query_pairs_mut();
    match self {
      Self::Text(terms) => {
        pairs.append_pair("search_query", &format!("all:{terms}"));
      },
      Self::Recent => {
        pairs
          .append_pair("search_query", RECENT_SEARCH_QUERY)
          .append_pair("sortBy", "submittedDate")
          .append_pair("sortOrder", "descending");
      },
    }
    pairs
      .append_pair("start", &start.to_string())
      .append_pair("max_results", &max_results.to_string());
  }
}

impl Display for SearchQuery {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Text(terms) => write!(f, "{terms}"),
      Self::Recent => write!(f, "recent submissions"),
    }
  }
}
