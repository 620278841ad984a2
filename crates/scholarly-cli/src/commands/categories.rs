//! Module for showing the category shortcuts.

use super::*;

/// Function for the [`Commands::Categories`] in the CLI.
///
/// Shortcuts are numbered the way the interactive view binds them to `F1`..`F9`.
pub async fn categories<I: UserInteraction>(interaction: &I, config: &Config) -> Result<()> {
  if config.categories.is_empty() {
    return interaction.reply(ResponseContent::Info("No category shortcuts configured"));
  }

  for (i, name) in config.categories.iter().enumerate() {
    let key = if i < 9 { format!("F{}", i + 1) } else { "  ".to_string() };
    interaction.reply(ResponseContent::Info(&format!("{key:>3}  {name}")))?;
  }
  Ok(())
}
