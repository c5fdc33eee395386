//! Command line interface for the scholar paper tools.
//!
//! This crate provides the `scholar` binary on top of the `scholar` library. It
//! supports:
//! - Interactive management of per-user paper tags
//! - Fetching and normalizing records from the arXiv API
//! - Reducing identifier lists to the latest version of each paper
//!
//! # Usage
//!
//! ```bash
//! # Open the interactive tag manager (the default command)
//! scholar
//! scholar tags --tags-path ./tags.db
//!
//! # Fetch records by identifier or by search query
//! scholar fetch --id 1512.08756v2 --id 2505.11111
//! scholar fetch --query "cat:cs.LG" --start 100 --summary
//!
//! # Keep only the latest versions
//! scholar latest 1v1 1v3 2v1 1v2
//! ```
//!
//! Logging is controlled with the repeatable `-v` flag or `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, process::ExitCode};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use scholar::{
  error::ScholarError,
  prelude::*,
  retriever::FeedRequest,
  store::SqliteStore,
  tags::{PaperOutcome, TagOutcome, TagStore, Tags},
  version::keep_latest,
  Config, Record, Retriever,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;
#[cfg(test)] use tracing_test::traced_test;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch arXiv records and manage personal paper tags")]
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
  /// config directory.
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Path to the tag database, overriding the configuration file.
  #[arg(long, global = true)]
  tags_path: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Option<Commands>,
}

impl Cli {
  /// Loads the configuration file and applies command line overrides.
  fn load_config(&self) -> Result<Config> {
    let path = self.config.clone().unwrap_or_else(Config::default_path);
    trace!("Loading configuration from {}", path.display());
    let mut config = Config::load(&path)?;
    if let Some(tags_path) = &self.tags_path {
      config = config.with_tags_path(tags_path);
    }
    Ok(config)
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Runs the selected command against the terminal.
async fn run(cli: Cli, interaction: &mut Terminal) -> Result<()> {
  let config = cli.load_config()?;
  debug!("Using configuration: {config:?}");

  match cli.command.unwrap_or_default() {
    Commands::Tags => tags(interaction, &config),
    Commands::Fetch(fetch_args) => fetch(interaction, &config, fetch_args).await,
    Commands::Latest(latest_args) => latest(interaction, latest_args),
  }
}

/// Entry point for the scholar CLI application
///
/// Parses arguments, sets up logging and runs the requested command, defaulting
/// to the interactive tag manager. Failures are reported on stderr with a
/// non-zero exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let mut terminal = Terminal;
  match run(cli, &mut terminal).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      // Printing to stderr cannot usefully fail here.
      let _ = terminal.reply(ResponseContent::Error(&e));
      ExitCode::FAILURE
    },
  }
}
