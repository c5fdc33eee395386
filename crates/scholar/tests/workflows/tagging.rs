use super::*;

#[traced_test]
#[test]
fn test_tag_fetched_papers() -> TestResult<()> {
  let records = fixture_records()?;
  let latest = keep_latest(records.iter().filter_map(Record::idv))?;

  let dir = tempdir()?;
  let path = dir.path().join("tags.db");
  {
    let mut tags = TagStore::new(SqliteStore::<Tags>::open(&path, false)?);
    assert_eq!(tags.add_tag("alice", "reading")?, TagOutcome::Added);
    for idv in &latest {
      assert_eq!(tags.add_paper("alice", "reading", idv)?, PaperOutcome::Added { created_tag: false });
    }
    assert_eq!(
      tags.add_paper("bob", "later", "2505.11111")?,
      PaperOutcome::Added { created_tag: true }
    );
    tags.flush()?;
  }

  let mut tags = TagStore::new(SqliteStore::<Tags>::open(&path, true)?);
  assert_eq!(tags.users()?, vec!["alice", "bob"]);

  let alice = tags.user_tags("alice")?.context("alice missing")?;
  assert_eq!(alice["reading"].iter().collect::<Vec<_>>(), vec!["1512.08756v2", "2505.11111v1"]);

  assert_eq!(tags.remove_paper("alice", "reading", "1512.08756v2")?, PaperOutcome::Removed);
  assert_eq!(tags.remove_paper("alice", "reading", "1512.08756v2")?, PaperOutcome::NotFound);
  assert_eq!(tags.remove_paper("alice", "missing", "1512.08756v2")?, PaperOutcome::NotFound);
  Ok(())
}

#[traced_test]
#[test]
fn test_backings_are_interchangeable() -> TestResult<()> {
  /// Runs the same session against any backing and returns the resulting tags.
  fn session(store: impl KeyValueStore<Tags>) -> scholar::error::Result<Option<Tags>> {
    let mut tags = TagStore::new(store);
    tags.add_paper("alice", "reading", "1234.5678")?;
    tags.add_paper("alice", "reading", "1234.5678")?;
    tags.add_tag("alice", "later")?;
    tags.remove_paper("alice", "later", "1234.5678")?;
    tags.user_tags("alice")
  }

  let memory = session(MemoryStore::new())?;
  let sqlite = session(SqliteStore::<Tags>::open_in_memory(true)?)?;
  assert_eq!(memory, sqlite);
  assert_eq!(memory.context("alice missing")?["reading"].len(), 1);
  Ok(())
}
