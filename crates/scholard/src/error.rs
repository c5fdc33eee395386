//! Error types for the scholar command line interface.

use thiserror::Error;

use super::*;

/// Error type alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, ScholardError>;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum ScholardError {
  /// A library operation failed.
  #[error(transparent)]
  Scholar(#[from] ScholarError),

  /// Reading from the interactive terminal failed.
  #[error(transparent)]
  Interaction(#[from] dialoguer::Error),

  /// Reading from stdin or writing to stdout failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A record could not be rendered as JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}
