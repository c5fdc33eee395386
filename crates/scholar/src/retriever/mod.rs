//! Feed retrieval from the arXiv query API.
//!
//! A [`FeedRequest`] describes what to ask for: either a search query (paginated
//! and sorted by last update) or an explicit list of identifiers. A [`Retriever`]
//! turns that request into a single HTTP GET and hands back the raw feed body,
//! or normalized [`Record`]s via [`Retriever::fetch_records`].
//!
//! The remote does not always signal failures through its status code, so a
//! non-200 response is logged at `warn` level and its body is returned anyway.
//! Only transport failures surface as [`ScholarError::Network`].
//!
//! # Examples
//!
//! ```no_run
//! use scholar::{retriever::FeedRequest, Retriever};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let retriever = Retriever::new();
//!
//! // Page through a search
//! let page = FeedRequest::query("cat:cs.LG").with_start(100);
//! let body = retriever.fetch(&page).await?;
//! println!("{} bytes", body.len());
//!
//! // Or look papers up directly
//! let records = retriever.fetch_records(&FeedRequest::ids(["1512.08756v2"])).await?;
//! println!("{:?}", records[0].title());
//! # Ok(())
//! # }
//! ```

use reqwest::StatusCode;

use super::*;

mod request;

pub use self::request::FeedRequest;

/// Sends [`FeedRequest`]s to an arXiv-compatible endpoint.
#[derive(Debug, Clone)]
pub struct Retriever {
  /// HTTP client reused across requests
  client:      reqwest::Client,
  /// Query endpoint, without a query string
  base_url:    String,
  /// Page size for search requests
  max_results: usize,
}

impl Default for Retriever {
  fn default() -> Self {
    Self {
      client:      reqwest::Client::new(),
      base_url:    configuration::DEFAULT_API_URL.to_string(),
      max_results: configuration::DEFAULT_MAX_RESULTS,
    }
  }
}

impl Retriever {
  /// A retriever against the public arXiv endpoint with default page size.
  pub fn new() -> Self { Self::default() }

  /// A retriever using the endpoint and page size from `config`.
  pub fn from_config(config: &Config) -> Self {
    Self::new().with_base_url(&config.api_url).with_max_results(config.max_results)
  }

  /// Sets the query endpoint.
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Sets the search page size.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// The query endpoint.
  pub fn base_url(&self) -> &str { &self.base_url }

  /// Fetches the raw feed body for `request`.
  ///
  /// # Errors
  ///
  /// This method will return an error if:
  /// - The request sets neither or both of a query and an id list
  /// - The HTTP request fails or the body cannot be read
  ///
  /// A response with a status other than 200 is not an error.
  pub async fn fetch(&self, request: &FeedRequest) -> Result<Vec<u8>> {
    let url = request.to_url(&self.base_url, self.max_results)?;
    debug!("Fetching feed via: {url}");

    let response = self.client.get(&url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
      warn!("arxiv did not return status 200 response (got {status})");
    }
    let data = response.bytes().await?;

    trace!("arxiv response: {}", String::from_utf8_lossy(&data));
    Ok(data.to_vec())
  }

  /// Fetches `request` and normalizes every entry of the returned feed.
  pub async fn fetch_records(&self, request: &FeedRequest) -> Result<Vec<Record>> {
    let data = self.fetch(request).await?;
    let records = normalize(&data)?;
    debug!("Normalized {} records", records.len());
    Ok(records)
  }
}
