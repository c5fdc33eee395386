//! Module for the "latest" command.

use super::*;

/// Arguments that can be used for the [`Commands::Latest`]
#[derive(Args, Clone, Debug)]
pub struct LatestArgs {
  /// Versioned identifiers such as "1512.08756v2"
  #[arg(required = true)]
  pub identifiers: Vec<String>,
}

/// Function for the [`Commands::Latest`] in the CLI.
///
/// Prints one identifier per line, in the order each paper first appears.
pub fn latest<I: UserInteraction>(interaction: &mut I, latest_args: LatestArgs) -> Result<()> {
  for identifier in keep_latest(&latest_args.identifiers)? {
    interaction.reply(ResponseContent::Text(&identifier))?;
  }
  Ok(())
}
