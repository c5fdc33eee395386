//! SQLite-backed key-value storage.
//!
//! Values are serialized to JSON and kept in a single `kv` table. Writes are
//! grouped into one open transaction that [`KeyValueStore::flush`] commits; with
//! autocommit enabled every [`KeyValueStore::set`] is committed immediately.
//! Dropping the store flushes anything still pending.

use rusqlite::{params, Connection, OptionalExtension};

use super::*;

/// A [`KeyValueStore`] persisted in a SQLite database file.
pub struct SqliteStore<V> {
  /// Connection to the database file
  conn:       Connection,
  /// Commit after every write instead of waiting for [`KeyValueStore::flush`]
  autocommit: bool,
  /// Stored value type
  _value:     PhantomData<fn() -> V>,
}

impl<V> SqliteStore<V> {
  /// Opens an existing store or creates a new one at the specified path.
  ///
  /// Missing parent directories are created.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// # use scholar::{store::SqliteStore, tags::Tags};
  /// let store: SqliteStore<Tags> = SqliteStore::open("tags.db", true)?;
  /// # Ok::<(), scholar::error::ScholarError>(())
  /// ```
  pub fn open(path: impl AsRef<Path>, autocommit: bool) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    debug!("Opening key-value store at {}", path.display());
    Self::init(Connection::open(path)?, autocommit)
  }

  /// Opens a store that lives only as long as this value.
  pub fn open_in_memory(autocommit: bool) -> Result<Self> {
    Self::init(Connection::open_in_memory()?, autocommit)
  }

  /// Applies the schema.
  fn init(conn: Connection, autocommit: bool) -> Result<Self> {
    conn
      .execute_batch(include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/migrations/init.sql")))?;
    Ok(Self { conn, autocommit, _value: PhantomData })
  }

  /// Whether writes are waiting for a commit.
  pub fn has_pending_writes(&self) -> bool { !self.conn.is_autocommit() }
}

impl<V: Serialize + DeserializeOwned> KeyValueStore<V> for SqliteStore<V> {
  fn contains(&self, key: &str) -> Result<bool> {
    let found = self
      .conn
      .query_row("SELECT 1 FROM kv WHERE key = ?1", params![key], |_| Ok(()))
      .optional()?;
    Ok(found.is_some())
  }

  fn get(&self, key: &str, default: V) -> Result<V> {
    let raw: Option<String> = self
      .conn
      .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
      .optional()?;
    match raw {
      Some(raw) => Ok(serde_json::from_str(&raw)?),
      None => Ok(default),
    }
  }

  fn set(&mut self, key: &str, value: V) -> Result<()> {
    let raw = serde_json::to_string(&value)?;
    if self.conn.is_autocommit() {
      self.conn.execute_batch("BEGIN")?;
    }
    self.conn.execute(
      "INSERT INTO kv (key, value) VALUES (?1, ?2)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value",
      params![key, raw],
    )?;
    trace!("Wrote {} bytes under key {key:?}", raw.len());
    if self.autocommit {
      self.flush()?;
    }
    Ok(())
  }

  fn keys(&self) -> Result<Vec<String>> {
    let mut stmt = self.conn.prepare_cached("SELECT key FROM kv ORDER BY rowid")?;
    let keys = stmt.query_map([], |row| row.get(0))?.collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(keys)
  }

  fn flush(&mut self) -> Result<()> {
    if !self.conn.is_autocommit() {
      self.conn.execute_batch("COMMIT")?;
    }
    Ok(())
  }
}

impl<V> Drop for SqliteStore<V> {
  fn drop(&mut self) {
    if !self.conn.is_autocommit() {
      if let Err(e) = self.conn.execute_batch("COMMIT") {
        warn!("Failed to commit pending writes on close: {e}");
      }
    }
  }
}
