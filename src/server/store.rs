use std::collections::HashMap;

use tokio::sync::Mutex;

use super::error::StoreError;

/// Key passed to `delete` to clear every entry.
pub const WILDCARD: &str = "*";

/// The shared key-value mapping.
///
/// Every operation takes the lock exactly once, so each one is atomic with
/// respect to all others regardless of which session issues it.
#[derive(Debug)]
pub struct Store {
    entries: Mutex<HashMap<String, String>>,
    max_key_len: usize,
}

impl Store {
    pub fn new(max_key_len: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_key_len,
        }
    }

    /// Length is counted in characters, not bytes.
    pub fn validate_key(&self, key: &str) -> Result<(), StoreError> {
        if key.chars().count() > self.max_key_len {
            return Err(StoreError::KeyTooLong {
                key: key.to_string(),
                max: self.max_key_len,
            });
        }
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.validate_key(key)?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    pub async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.validate_key(key)?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Removes `key`, or everything when `key` is [`WILDCARD`].
    ///
    /// Returns whether a removal occurred. Clearing always reports `true`,
    /// even on an empty store.
    pub async fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        if key == WILDCARD {
            entries.clear();
            return true;
        }
        entries.remove(key).is_some()
    }

    /// Snapshot of the current keys, in no particular order.
    pub async fn list_keys(&self) -> Vec<String> {
        self.entries.lock().await.keys().cloned().collect()
    }
}
