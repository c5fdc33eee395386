//! Subcommands of the `scholar` binary.

use super::*;

pub mod fetch;
pub mod latest;
pub mod tags;

pub use fetch::{fetch, FetchArgs};
pub use latest::{latest, LatestArgs};
pub use tags::tags;

/// Available commands for the CLI
#[derive(Subcommand, Clone, Debug, Default)]
pub enum Commands {
  /// Interactively inspect and edit user tags (default when no command is given)
  #[default]
  Tags,

  /// Fetch records from the arXiv API and print them
  Fetch(FetchArgs),

  /// Print the latest version of each paper among the given identifiers
  Latest(LatestArgs),
}
