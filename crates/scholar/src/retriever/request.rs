use super::*;

/// Parameters of a single feed request.
///
/// A request targets either an explicit list of identifiers or a search query,
/// never both. Search results are sorted by last update and paginated from
/// `start`; identifier lookups ignore pagination.
///
/// # Examples
///
/// ```
/// use scholar::retriever::FeedRequest;
///
/// let url = FeedRequest::query("cat:cs.LG").with_start(200).to_url("http://h/api/query", 100)?;
/// assert_eq!(
///   url,
///   "http://h/api/query?search_query=cat:cs.LG&sortBy=lastUpdatedDate&start=200&max_results=100"
/// );
///
/// let url = FeedRequest::ids(["1512.08756v2", "2505.11111"]).to_url("http://h/api/query", 100)?;
/// assert_eq!(url, "http://h/api/query?id_list=1512.08756v2,2505.11111");
/// # Ok::<(), scholar::error::ScholarError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRequest {
  /// Search query in the remote's `search_query` syntax
  query: Option<String>,
  /// Explicit identifiers, in request order
  ids:   Option<Vec<String>>,
  /// Offset into the remote result set
  start: usize,
}

impl FeedRequest {
  /// An empty request; set exactly one of a query or an id list before sending.
  pub fn new() -> Self { Self::default() }

  /// A search request starting at the first result.
  pub fn query(query: impl Into<String>) -> Self { Self::new().with_query(query) }

  /// A lookup of the given identifiers.
  pub fn ids<I, S>(ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    Self::new().with_ids(ids)
  }

  /// Sets the search query.
  pub fn with_query(mut self, query: impl Into<String>) -> Self {
    self.query = Some(query.into());
    self
  }

  /// Sets a single identifier to look up.
  pub fn with_id(self, id: impl Into<String>) -> Self { self.with_ids([id]) }

  /// Sets the identifiers to look up.
  pub fn with_ids<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    self.ids = Some(ids.into_iter().map(Into::into).collect());
    self
  }

  /// Sets the result offset for search requests.
  pub fn with_start(mut self, start: usize) -> Self {
    self.start = start;
    self
  }

  /// The result offset.
  pub fn start(&self) -> usize { self.start }

  /// Builds the request URL against `base_url`.
  ///
  /// # Errors
  ///
  /// Returns [`ScholarError::InvalidRequest`] unless exactly one of a query or a
  /// non-empty id list was set.
  pub fn to_url(&self, base_url: &str, max_results: usize) -> Result<String> {
    match (&self.query, &self.ids) {
      (None, None) =>
        Err(ScholarError::InvalidRequest("must provide either a search query or an id list".into())),
      (Some(_), Some(_)) => Err(ScholarError::InvalidRequest(
        "a search query and an id list cannot be combined".into(),
      )),
      (None, Some(ids)) if ids.is_empty() =>
        Err(ScholarError::InvalidRequest("the id list is empty".into())),
      (None, Some(ids)) => Ok(format!("{base_url}?id_list={}", ids.join(","))),
      (Some(query), None) => Ok(format!(
        "{base_url}?search_query={query}&sortBy=lastUpdatedDate&start={}&max_results={max_results}",
        self.start
      )),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BASE: &str = "http://export.arxiv.org/api/query";

  #[traced_test]
  #[test]
  fn test_neither_query_nor_ids() {
    assert!(matches!(FeedRequest::new().to_url(BASE, 100), Err(ScholarError::InvalidRequest(_))));
  }

  #[traced_test]
  #[test]
  fn test_both_query_and_ids() {
    let request = FeedRequest::query("all:attention").with_id("1512.08756");
    assert!(matches!(request.to_url(BASE, 100), Err(ScholarError::InvalidRequest(_))));
  }

  #[traced_test]
  #[test]
  fn test_empty_id_list() {
    let request = FeedRequest::ids(Vec::<String>::new());
    assert!(matches!(request.to_url(BASE, 100), Err(ScholarError::InvalidRequest(_))));
  }

  #[traced_test]
  #[test]
  fn test_single_id_has_no_pagination() {
    let url = FeedRequest::new().with_id("1512.08756v2").with_start(50).to_url(BASE, 100).unwrap();
    assert_eq!(url, "http://export.arxiv.org/api/query?id_list=1512.08756v2");
  }

  #[traced_test]
  #[test]
  fn test_id_list_keeps_order() {
    let url = FeedRequest::ids(vec!["b".to_string(), "a".to_string()]).to_url(BASE, 100).unwrap();
    assert!(url.ends_with("id_list=b,a"));
  }

  #[traced_test]
  #[test]
  fn test_query_url() {
    let url = FeedRequest::query("cat:cs.CV+OR+cat:cs.LG").to_url(BASE, 100).unwrap();
    assert_eq!(
      url,
      "http://export.arxiv.org/api/query?search_query=cat:cs.CV+OR+cat:cs.LG&sortBy=lastUpdatedDate&\
       start=0&max_results=100"
    );
  }
}
