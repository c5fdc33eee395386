//! Dictionary-like key-value storage.
//!
//! [`KeyValueStore`] is the narrow interface the tag store is written against:
//! membership, get-with-default, assignment, key iteration and an explicit flush.
//! Values are always written whole; a store only ever sees top-level key writes.
//!
//! Two backings are provided:
//! - [`MemoryStore`]: an in-process map, useful for tests and dry runs
//! - [`SqliteStore`]: a single SQLite table holding JSON-encoded values

use super::*;

pub mod memory;
pub mod sqlite;

pub use self::{memory::MemoryStore, sqlite::SqliteStore};

/// A persistent (or not) mapping from string keys to values of type `V`.
pub trait KeyValueStore<V> {
  /// Whether `key` has a value.
  fn contains(&self, key: &str) -> Result<bool>;

  /// The value stored under `key`, or `default` if there is none.
  fn get(&self, key: &str, default: V) -> Result<V>;

  /// Stores `value` under `key`, replacing any previous value.
  fn set(&mut self, key: &str, value: V) -> Result<()>;

  /// All keys, in the order they were first written.
  fn keys(&self) -> Result<Vec<String>>;

  /// Makes every write so far durable.
  fn flush(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Exercises the shared contract against any backing.
  fn check_contract(store: &mut impl KeyValueStore<Vec<String>>) {
    assert!(!store.contains("alice").unwrap());
    assert_eq!(store.get("alice", vec!["fallback".to_string()]).unwrap(), vec!["fallback"]);

    store.set("bob", vec!["x".to_string()]).unwrap();
    store.set("alice", vec!["y".to_string()]).unwrap();
    store.set("bob", vec!["z".to_string()]).unwrap();

    assert!(store.contains("alice").unwrap());
    assert_eq!(store.get("bob", Vec::new()).unwrap(), vec!["z"]);
    assert_eq!(store.keys().unwrap(), vec!["bob", "alice"]);
    store.flush().unwrap();
  }

  #[traced_test]
  #[test]
  fn test_memory_store_contract() { check_contract(&mut MemoryStore::new()); }

  #[traced_test]
  #[test]
  fn test_sqlite_store_contract() {
    check_contract(&mut SqliteStore::open_in_memory(false).unwrap());
  }
}
