use super::*;

mod tagging;

#[traced_test]
#[test]
fn test_normalize_recorded_feed() -> TestResult<()> {
  let records = fixture_records()?;
  assert_eq!(records.len(), 3);

  let idvs: Vec<&str> = records.iter().filter_map(Record::idv).collect();
  assert_eq!(idvs, vec!["1512.08756v2", "2505.11111v1", "1512.08756v1"]);

  let first = &records[0];
  assert_eq!(first.id(), Some("1512.08756"));
  assert_eq!(first.version(), Some(2));
  assert_eq!(first.time_str(), Some("Dec 29 2015"));
  assert_eq!(first.time(), Some(1_451_419_922.0));
  assert!(first.get("summary_detail").is_none());
  assert!(first.get("title_detail").is_none());
  assert_eq!(first.get("arxiv_comment").and_then(|v| v.as_str()), Some("12 pages, 4 figures"));
  assert_eq!(first.get("author").and_then(|v| v.as_str()), Some("Charles Babbage"));
  assert_eq!(first.get("link").and_then(|v| v.as_str()), Some("http://arxiv.org/abs/1512.08756v2"));

  let authors = first.get("authors").and_then(|v| v.as_array()).context("authors missing")?;
  assert_eq!(authors.len(), 2);
  assert_eq!(authors[0]["arxiv_affiliation"], "Analytical Engine Lab");

  let tags = first.get("tags").and_then(|v| v.as_array()).context("tags missing")?;
  let terms: Vec<&str> = tags.iter().filter_map(|t| t["term"].as_str()).collect();
  assert_eq!(terms, vec!["cs.LG", "stat.ML"]);
  Ok(())
}

#[traced_test]
#[test]
fn test_records_survive_json() -> TestResult<()> {
  let records = fixture_records()?;
  let json = serde_json::to_string(&records)?;
  let back: Vec<Record> = serde_json::from_str(&json)?;
  assert_eq!(back, records);
  Ok(())
}

#[traced_test]
#[test]
fn test_latest_versions_of_fetched_records() -> TestResult<()> {
  let records = fixture_records()?;
  let latest = keep_latest(records.iter().filter_map(Record::idv))?;
  assert_eq!(latest, vec!["1512.08756v2", "2505.11111v1"]);
  Ok(())
}

#[traced_test]
#[test]
fn test_malformed_entry_aborts_normalize() {
  let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom">
    <entry><id>http://arxiv.org/abs/2505.11111v1</id><updated>2024-01-15T00:00:00Z</updated></entry>
    <entry><id>http://arxiv.org/abs/15120875</id><updated>2024-01-15T00:00:00Z</updated></entry>
  </feed>"#;
  assert!(matches!(normalize(feed.as_bytes()), Err(ScholarError::MalformedIdentifier(_))));
}

#[traced_test]
#[test]
fn test_error_shaped_body_fails_cleanly() {
  assert!(matches!(normalize(b"Rate exceeded."), Err(ScholarError::Feed(_))));
  assert!(normalize(br#"<feed xmlns="http://www.w3.org/2005/Atom"></feed>"#).unwrap().is_empty());
}
