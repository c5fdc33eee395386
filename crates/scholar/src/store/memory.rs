use super::*;

/// An in-process [`KeyValueStore`]. Flushing is a no-op.
#[derive(Debug, Clone)]
pub struct MemoryStore<V> {
  /// Stored values
  values: HashMap<String, V>,
  /// Keys in first-write order
  order:  Vec<String>,
}

impl<V> Default for MemoryStore<V> {
  fn default() -> Self { Self { values: HashMap::new(), order: Vec::new() } }
}

impl<V> MemoryStore<V> {
  /// Creates an empty store.
  pub fn new() -> Self { Self::default() }
}

impl<V: Clone> KeyValueStore<V> for MemoryStore<V> {
  fn contains(&self, key: &str) -> Result<bool> { Ok(self.values.contains_key(key)) }

  fn get(&self, key: &str, default: V) -> Result<V> {
    Ok(self.values.get(key).cloned().unwrap_or(default))
  }

  fn set(&mut self, key: &str, value: V) -> Result<()> {
    if self.values.insert(key.to_string(), value).is_none() {
      self.order.push(key.to_string());
    }
    Ok(())
  }

  fn keys(&self) -> Result<Vec<String>> { Ok(self.order.clone()) }

  fn flush(&mut self) -> Result<()> { Ok(()) }
}
