//! Module for the "fetch" command: pull records from the arXiv API and print them.

use super::*;

/// Arguments that can be used for the [`Commands::Fetch`]
#[derive(Args, Clone, Debug, Default)]
pub struct FetchArgs {
  /// Search query in the API's `search_query` syntax, e.g. "cat:cs.LG"
  #[arg(long)]
  pub query: Option<String>,

  /// Paper identifier to look up; repeat for several
  #[arg(long = "id", value_name = "ID")]
  pub ids: Vec<String>,

  /// Offset into the search results
  #[arg(long, default_value_t = 0)]
  pub start: usize,

  /// Print one line per record instead of JSON
  #[arg(long)]
  pub summary: bool,

  /// Keep only the latest version of each paper
  #[arg(long)]
  pub latest: bool,
}

impl FetchArgs {
  /// Builds the feed request. Whether the combination is valid is left to the library.
  fn request(&self) -> FeedRequest {
    let mut request = FeedRequest::new().with_start(self.start);
    if let Some(query) = &self.query {
      request = request.with_query(query);
    }
    if !self.ids.is_empty() {
      request = request.with_ids(self.ids.iter().map(String::as_str));
    }
    request
  }
}

/// Function for the [`Commands::Fetch`] in the CLI.
pub async fn fetch<I: UserInteraction>(
  interaction: &mut I,
  config: &Config,
  fetch_args: FetchArgs,
) -> Result<()> {
  let retriever = Retriever::from_config(config);
  let records = retriever.fetch_records(&fetch_args.request()).await?;
  let records = if fetch_args.latest { latest_records(records)? } else { records };

  if fetch_args.summary {
    if records.is_empty() {
      return interaction.reply(ResponseContent::Info("No records returned"));
    }
    interaction.reply(ResponseContent::Summary(&records))
  } else {
    interaction.reply(ResponseContent::Records(&records))
  }
}

/// Drops every record superseded by a later version of the same paper in `records`.
fn latest_records(records: Vec<Record>) -> Result<Vec<Record>> {
  let kept = keep_latest(records.iter().filter_map(Record::idv))?;
  Ok(
    records
      .into_iter()
      .filter(|record| record.idv().is_some_and(|idv| kept.iter().any(|k| k == idv)))
      .collect(),
  )
}
