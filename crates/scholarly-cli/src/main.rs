//! Command line interface and terminal search view for arXiv listings.
//!
//! This crate drives the `scholarly` library from a terminal. Running it with
//! no command opens the interactive search view; the subcommands print
//! listings for use in scripts.
//!
//! # Usage
//!
//! ```bash
//! # Browse recent submissions and search interactively
//! scholarly
//!
//! # Print the first two pages of results for a query
//! scholarly search "neural networks" --pages 2
//!
//! # Newest submissions as JSON
//! scholarly recent --json
//!
//! # Show the category shortcuts
//! scholarly categories
//!
//! # Write the default configuration file
//! scholarly init
//! ```
//!
//! Logging detail is raised with repeated `-v` flags. In the interactive view
//! logs are written to a file in the data directory instead of the terminal.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use scholarly::{
  client::ArxivClient,
  config::Config,
  error::ScholarlyError,
  feed::{normalize_whitespace, Page},
  prelude::*,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;
#[cfg(feature = "tui")] pub mod tui;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Search arXiv and browse recent submissions")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default platform-specific
  /// configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// arXiv query endpoint, overriding the configuration file and `SCHOLARLY_ENDPOINT`
  #[arg(long, global = true)]
  endpoint: Option<String>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Option<Commands>,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// Where the configuration file lives for this invocation.
  fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }

  /// Loads the configuration and applies the environment and `--endpoint` overrides.
  fn load_config(&self) -> Result<Config> {
    let mut config = Config::load_or_default(self.config_path())?.with_env_overrides();
    if let Some(endpoint) = &self.endpoint {
      config = config.with_endpoint(endpoint.as_str());
    }
    config.validate()?;
    Ok(config)
  }
}

/// Maps the number of `-v` flags to a default filter directive.
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn log_filter(verbosity: u8) -> EnvFilter {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}

/// Configures logging to stderr for the one-shot commands.
///
/// Stdout is left to command output so `--json` stays parseable.
fn setup_logging(verbosity: u8) {
  tracing_subscriber::fmt()
    .with_env_filter(log_filter(verbosity))
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Configures logging to a daily rolling file for the interactive view.
///
/// The returned guard flushes buffered lines when dropped and must outlive the view.
#[cfg(feature = "tui")]
fn setup_file_logging(verbosity: u8) -> Result<tracing_appender::non_blocking::WorkerGuard> {
  use tracing_appender::rolling::{RollingFileAppender, Rotation};

  let dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("scholarly").join("logs");
  std::fs::create_dir_all(&dir)?;
  let appender = RollingFileAppender::builder()
    .rotation(Rotation::DAILY)
    .filename_prefix("scholarly")
    .filename_suffix("log")
    .build(&dir)?;
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(log_filter(verbosity))
    .with_writer(writer)
    .with_ansi(false)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();

  debug!("Logging to {}", dir.display());
  Ok(guard)
}

/// Runs the selected command to completion.
async fn run(cli: &Cli, command: Commands) -> Result<()> {
  trace!("Configuration path: {}", cli.config_path().display());
  match command {
    Commands::Init(init_options) =>
      init(cli, &cli.config_path(), cli.endpoint.as_deref(), init_options).await,
    Commands::Search(search_options) => search(cli, &cli.load_config()?, search_options).await,
    Commands::Recent(page_options) => recent(cli, &cli.load_config()?, page_options).await,
    Commands::Categories => categories(cli, &cli.load_config()?).await,
    #[cfg(feature = "tui")]
    Commands::Tui => tui::run(cli.load_config()?).await,
  }
}

/// Entry point for the scholarly CLI application
///
/// Parses the command line, sets up logging, and runs the requested command,
/// opening the interactive view when none is given. Failures are reported on
/// stderr and turn into a non-zero exit status.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  // Handle the command, using TUI as default when enabled
  let command = match cli.command.clone() {
    Some(command) => command,
    #[cfg(feature = "tui")]
    None => Commands::Tui,
    #[cfg(not(feature = "tui"))]
    None => {
      println!("Please specify a command. Use --help for usage information.");
      return ExitCode::FAILURE;
    },
  };

  #[cfg(feature = "tui")]
  let _guard = if let Commands::Tui = command {
    match setup_file_logging(cli.verbose) {
      Ok(guard) => Some(guard),
      Err(e) => {
        eprintln!("{} Could not open the log file: {}", style(ERROR_PREFIX).red(), e);
        return ExitCode::FAILURE;
      },
    }
  } else {
    setup_logging(cli.verbose);
    None
  };

  #[cfg(not(feature = "tui"))]
  setup_logging(cli.verbose);

  match run(&cli, command).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      // Nothing sensible is left to do if stderr itself is gone.
      let _ = cli.reply(ResponseContent::Error(e));
      ExitCode::FAILURE
    },
  }
}
