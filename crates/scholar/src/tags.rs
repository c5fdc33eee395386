//! Per-user tag collections.
//!
//! Each user owns a mapping from tag name to a set of paper identifiers. The
//! whole mapping is stored as a single value under the username, so every
//! mutation here reads the user's [`Tags`], changes it and writes all of it back.
//!
//! "Already exists" and "not found" conditions are reported through the returned
//! outcome rather than as errors; only the underlying store can fail.
//!
//! # Examples
//!
//! ```
//! use scholar::{
//!   store::MemoryStore,
//!   tags::{PaperOutcome, TagStore},
//! };
//!
//! let mut tags = TagStore::new(MemoryStore::new());
//! assert_eq!(
//!   tags.add_paper("alice", "reading", "1234.5678").unwrap(),
//!   PaperOutcome::Added { created_tag: true }
//! );
//! assert_eq!(tags.add_paper("alice", "reading", "1234.5678").unwrap(), PaperOutcome::AlreadyPresent);
//! ```

use super::*;

/// A user's tags: tag name to the set of paper identifiers carrying it.
pub type Tags = BTreeMap<String, BTreeSet<String>>;

/// Result of adding a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
  /// The tag was created empty.
  Added,
  /// The user already had this tag; nothing changed.
  AlreadyExists,
}

/// Result of adding a paper to, or removing one from, a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperOutcome {
  /// The paper was added; `created_tag` is set when the tag did not exist before.
  Added {
    /// Whether the tag was created to hold the paper
    created_tag: bool,
  },
  /// The paper was already tagged; nothing changed.
  AlreadyPresent,
  /// The paper was removed from the tag.
  Removed,
  /// The tag or the paper was absent; nothing changed.
  NotFound,
}

/// Tag operations over any [`KeyValueStore`] holding [`Tags`] per username.
pub struct TagStore<S> {
  /// Backing store keyed by username
  store: S,
}

impl<S: KeyValueStore<Tags>> TagStore<S> {
  /// Wraps a backing store.
  pub fn new(store: S) -> Self { Self { store } }

  /// All usernames with stored tags.
  pub fn users(&self) -> Result<Vec<String>> { self.store.keys() }

  /// A user's tags, or `None` for an unknown user.
  pub fn user_tags(&self, user: &str) -> Result<Option<Tags>> {
    if !self.store.contains(user)? {
      return Ok(None);
    }
    self.store.get(user, Tags::new()).map(Some)
  }

  /// Creates an empty tag for `user`, creating the user if needed.
  pub fn add_tag(&mut self, user: &str, tag: &str) -> Result<TagOutcome> {
    let mut tags = self.store.get(user, Tags::new())?;
    if tags.contains_key(tag) {
      return Ok(TagOutcome::AlreadyExists);
    }
    tags.insert(tag.to_string(), BTreeSet::new());
    self.store.set(user, tags)?;
    debug!("Added tag {tag:?} for user {user:?}");
    Ok(TagOutcome::Added)
  }

  /// Tags a paper, creating the tag if it does not exist yet.
  pub fn add_paper(&mut self, user: &str, tag: &str, pid: &str) -> Result<PaperOutcome> {
    let mut tags = self.store.get(user, Tags::new())?;
    let created_tag = !tags.contains_key(tag);
    let inserted = tags.entry(tag.to_string()).or_default().insert(pid.to_string());
    if !inserted {
      return Ok(PaperOutcome::AlreadyPresent);
    }
    self.store.set(user, tags)?;
    debug!("Added paper {pid:?} to tag {tag:?} for user {user:?}");
    Ok(PaperOutcome::Added { created_tag })
  }

  /// Removes a paper from a tag. The tag itself is kept even when it becomes empty.
  pub fn remove_paper(&mut self, user: &str, tag: &str, pid: &str) -> Result<PaperOutcome> {
    let mut tags = self.store.get(user, Tags::new())?;
    let removed = tags.get_mut(tag).is_some_and(|papers| papers.remove(pid));
    if !removed {
      return Ok(PaperOutcome::NotFound);
    }
    self.store.set(user, tags)?;
    debug!("Removed paper {pid:?} from tag {tag:?} for user {user:?}");
    Ok(PaperOutcome::Removed)
  }

  /// Commits pending writes in the backing store.
  pub fn flush(&mut self) -> Result<()> { self.store.flush() }

  /// Returns the backing store.
  pub fn into_inner(self) -> S { self.store }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::{MemoryStore, SqliteStore};

  /// A store that counts writes so tests can check nothing was written.
  #[derive(Default)]
  struct CountingStore {
    /// Wrapped store
    inner:  MemoryStore<Tags>,
    /// Number of `set` calls
    writes: usize,
  }

  impl KeyValueStore<Tags> for CountingStore {
    fn contains(&self, key: &str) -> Result<bool> { self.inner.contains(key) }

    fn get(&self, key: &str, default: Tags) -> Result<Tags> { self.inner.get(key, default) }

    fn set(&mut self, key: &str, value: Tags) -> Result<()> {
      self.writes += 1;
      self.inner.set(key, value)
    }

    fn keys(&self) -> Result<Vec<String>> { self.inner.keys() }

    fn flush(&mut self) -> Result<()> { self.inner.flush() }
  }

  #[traced_test]
  #[test]
  fn test_add_paper_twice_is_idempotent() {
    let mut tags = TagStore::new(MemoryStore::new());
    assert_eq!(
      tags.add_paper("alice", "reading", "1234.5678").unwrap(),
      PaperOutcome::Added { created_tag: true }
    );
    assert_eq!(tags.add_paper("alice", "reading", "1234.5678").unwrap(), PaperOutcome::AlreadyPresent);

    let alice = tags.user_tags("alice").unwrap().unwrap();
    assert_eq!(alice["reading"].len(), 1);
    assert!(alice["reading"].contains("1234.5678"));
  }

  #[traced_test]
  #[test]
  fn test_remove_paper_twice_reports_not_found() {
    let mut tags = TagStore::new(MemoryStore::new());
    tags.add_paper("alice", "reading", "1234.5678").unwrap();

    assert_eq!(tags.remove_paper("alice", "reading", "1234.5678").unwrap(), PaperOutcome::Removed);
    assert!(tags.user_tags("alice").unwrap().unwrap()["reading"].is_empty());
    assert_eq!(tags.remove_paper("alice", "reading", "1234.5678").unwrap(), PaperOutcome::NotFound);
  }

  #[traced_test]
  #[test]
  fn test_add_tag_reports_existing() {
    let mut tags = TagStore::new(MemoryStore::new());
    assert_eq!(tags.add_tag("alice", "reading").unwrap(), TagOutcome::Added);
    assert_eq!(tags.add_tag("alice", "reading").unwrap(), TagOutcome::AlreadyExists);
    assert_eq!(
      tags.add_paper("alice", "reading", "2505.11111").unwrap(),
      PaperOutcome::Added { created_tag: false }
    );
  }

  #[traced_test]
  #[test]
  fn test_unknown_user_and_tag() {
    let mut tags = TagStore::new(MemoryStore::new());
    assert!(tags.user_tags("nobody").unwrap().is_none());
    assert_eq!(tags.remove_paper("nobody", "reading", "1").unwrap(), PaperOutcome::NotFound);
    // Reporting "not found" must not create the user as a side effect.
    assert!(tags.users().unwrap().is_empty());
  }

  #[traced_test]
  #[test]
  fn test_no_ops_do_not_write() {
    let mut tags = TagStore::new(CountingStore::default());
    tags.add_tag("alice", "reading").unwrap();
    tags.add_paper("alice", "reading", "1").unwrap();
    assert_eq!(tags.store.writes, 2);

    tags.add_tag("alice", "reading").unwrap();
    tags.add_paper("alice", "reading", "1").unwrap();
    tags.remove_paper("alice", "later", "1").unwrap();
    tags.remove_paper("alice", "reading", "2").unwrap();
    assert_eq!(tags.into_inner().writes, 2);
  }

  #[traced_test]
  #[test]
  fn test_users_are_listed_in_first_write_order() {
    let mut tags = TagStore::new(MemoryStore::new());
    tags.add_tag("bob", "a").unwrap();
    tags.add_tag("alice", "b").unwrap();
    tags.add_tag("bob", "c").unwrap();
    assert_eq!(tags.users().unwrap(), vec!["bob", "alice"]);
  }

  #[traced_test]
  #[test]
  fn test_tags_persist_in_sqlite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tags.db");
    {
      let mut tags = TagStore::new(SqliteStore::open(&path, false).unwrap());
      tags.add_paper("alice", "reading", "1234.5678").unwrap();
      tags.add_tag("alice", "later").unwrap();
      tags.flush().unwrap();
    }

    let tags = TagStore::new(SqliteStore::<Tags>::open(&path, false).unwrap());
    let alice = tags.user_tags("alice").unwrap().unwrap();
    assert_eq!(alice.keys().collect::<Vec<_>>(), vec!["later", "reading"]);
    assert!(alice["reading"].contains("1234.5678"));
  }
}
