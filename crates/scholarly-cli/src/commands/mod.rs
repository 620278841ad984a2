use super::*;

pub mod categories;
pub mod init;
pub mod recent;
pub mod search;

pub use categories::categories;
pub use init::{init, InitOptions};
pub use recent::recent;
pub use search::{search, SearchOptions};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Launch the Terminal User Interface (default when no command specified)
  #[cfg(feature = "tui")]
  #[clap(hide = true)] // Hide from help since it's the default
  Tui,

  /// Write the default configuration file
  Init(InitOptions),

  /// Search arXiv by keyword
  Search(SearchOptions),

  /// List the most recent submissions
  Recent(PageOptions),

  /// List the configured category shortcuts
  Categories,
}

/// Which pages to fetch and how to print them.
#[derive(Args, Clone, Debug)]
pub struct PageOptions {
  /// Zero-based index of the first page to fetch
  #[arg(long, default_value_t = 0)]
  pub page: usize,

  /// Number of consecutive pages to fetch; stops early once arXiv runs out
  #[arg(long, default_value_t = 1)]
  pub pages: usize,

  /// Show every field of each paper
  #[arg(long)]
  pub detailed: bool,

  /// Print the papers as a JSON array
  #[arg(long, conflicts_with = "detailed")]
  pub json: bool,
}

/// Fetches up to `pages` pages of `query` starting at page `first`.
///
/// Stops after the first short page. Returns the papers together with the
/// total result count arXiv reported on the first page. A range running past
/// the last representable page index is rejected before any request.
async fn fetch_pages(
  client: &ArxivClient,
  query: &SearchQuery,
  first: usize,
  pages: usize,
) -> Result<(Vec<PaperSummary>, Option<u64>)> {
  let end = first.checked_add(pages.max(1)).ok_or(ScholarlyError::PageOutOfRange(first))?;
  let mut papers = Vec::new();
  let mut total = None;

  for page in first..end {
    let Page { entries, total_results, .. } = client.fetch(query, page).await?;
    debug!("Page {} of {} returned {} papers", page, query, entries.len());
    total = total.or(total_results);

    let exhausted = entries.len() < client.page_size();
    papers.extend(entries);
    if exhausted {
      break;
    }
  }
  Ok((papers, total))
}

/// Prints a listing fetched by [`fetch_pages`].
fn show_papers<I: UserInteraction>(
  interaction: &I,
  config: &Config,
  options: &PageOptions,
  papers: &[PaperSummary],
  total: Option<u64>,
) -> Result<()> {
  if options.json {
    return interaction.reply(ResponseContent::Json(papers));
  }
  if papers.is_empty() {
    return interaction.reply(ResponseContent::Info("No papers found"));
  }

  if options.detailed {
    for paper in papers {
      interaction.reply(ResponseContent::Paper(paper))?;
    }
  } else {
    interaction
      .reply(ResponseContent::Papers { papers, author_limit: config.author_limit })?;
  }

  let first = options.page.saturating_mul(config.page_size).saturating_add(1);
  let last = first.saturating_add(papers.len() - 1);
  let summary = match total {
    Some(total) => format!("Showing {first}-{last} of {total}"),
    None => format!("Showing {first}-{last}"),
  };
  interaction.reply(ResponseContent::Info(&summary))
}
