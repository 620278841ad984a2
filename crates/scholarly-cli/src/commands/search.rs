//! Module for the one-shot keyword search.

use super::*;

/// Options for [`Commands::Search`].
#[derive(Args, Clone, Debug)]
pub struct SearchOptions {
  /// Search terms; prompted for when omitted
  pub query: Option<String>,

  /// Paging and output options
  #[command(flatten)]
  pub pages: PageOptions,
}

/// Function for the [`Commands::Search`] in the CLI.
pub async fn search<I: UserInteraction>(
  interaction: &I,
  config: &Config,
  search_options: SearchOptions,
) -> Result<()> {
  let SearchOptions { query, pages } = search_options;

  let input = match query {
    Some(query) => query,
    None => interaction.prompt("Search arXiv for")?,
  };
  let query = SearchQuery::parse(&input)?;

  if !pages.json {
    interaction.reply(ResponseContent::Info(&format!("Searching arXiv for: {}", input.trim())))?;
  }

  let client = ArxivClient::new(config)?;
  let (papers, total) = fetch_pages(&client, &query, pages.page, pages.pages).await?;
  show_papers(interaction, config, &pages, &papers, total)
}
