//! Error types for the scholarly command line.

use thiserror::Error;

use super::*;

/// Error type alias used for the CLI.
pub type Result<T> = core::result::Result<T, ScholarlyCliError>;

/// Errors surfaced by the CLI commands.
#[derive(Error, Debug)]
pub enum ScholarlyCliError {
  /// A search, decode or configuration failure from the library.
  #[error(transparent)]
  Scholarly(#[from] ScholarlyError),

  /// Terminal or file system I/O failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt could not be shown.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Results could not be written as JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The log file could not be created.
  #[error("Could not set up logging: {0}")]
  LogInit(#[from] tracing_appender::rolling::InitError),
}
