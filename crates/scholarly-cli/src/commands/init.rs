//! Module for writing a configuration file.

use super::*;

/// Options for [`Commands::Init`].
#[derive(Args, Clone, Debug)]
pub struct InitOptions {
  /// Overwrite an existing configuration without asking
  #[arg(long)]
  pub force: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
///
/// Writes the default configuration to `path`, keeping an `--endpoint`
/// override if one was given.
pub async fn init<I: UserInteraction>(
  interaction: &I,
  path: &Path,
  endpoint: Option<&str>,
  init_options: InitOptions,
) -> Result<()> {
  if path.exists()
    && !init_options.force
    && !interaction.confirm(&format!(
      "A configuration already exists at {}, do you want to overwrite it?",
      path.display()
    ))?
  {
    return interaction.reply(ResponseContent::Info("Kept the existing configuration"));
  }

  let mut config = Config::default();
  if let Some(endpoint) = endpoint {
    config = config.with_endpoint(endpoint);
  }
  config.validate()?;
  config.save(path)?;

  interaction.reply(ResponseContent::Success(&format!("Wrote configuration to {}", path.display())))
}
