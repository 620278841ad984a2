//! Module for listing the newest submissions.

use super::*;

/// Function for the [`Commands::Recent`] in the CLI.
pub async fn recent<I: UserInteraction>(
  interaction: &I,
  config: &Config,
  page_options: PageOptions,
) -> Result<()> {
  if !page_options.json {
    interaction.reply(ResponseContent::Info("Most recent arXiv submissions"))?;
  }

  let client = ArxivClient::new(config)?;
  let (papers, total) =
    fetch_pages(&client, &SearchQuery::Recent, page_options.page, page_options.pages).await?;
  show_papers(interaction, config, &page_options, &papers, total)
}
