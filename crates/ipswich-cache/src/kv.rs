//! Key-value store with automatic serialization.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::CacheError;

/// A stored value and the revision it was written at.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    value: serde_json::Value,
    revision: u64,
}

/// Type-safe in-process key-value cache.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning a `Cache` yields another
/// handle onto the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    entries: Arc<Mutex<BTreeMap<String, Entry>>>,
}

impl Cache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a cache persisted at `path`, or an empty one if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let entries: BTreeMap<String, Entry> = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "cache snapshot loaded");
        Ok(Self {
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    /// Write every entry to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CacheError> {
        let content = {
            let entries = self.lock()?;
            serde_json::to_string_pretty(&*entries)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        Ok(self.get_with_revision(key)?.map(|(value, _)| value))
    }

    /// Get a value together with the revision it was stored at.
    pub fn get_with_revision<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<(T, u64)>, CacheError> {
        let entry = self.lock()?.get(key).cloned();
        match entry {
            Some(entry) => Ok(Some((serde_json::from_value(entry.value)?, entry.revision))),
            None => Ok(None),
        }
    }

    /// Set a value in the cache unconditionally.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.lock()?;
        let revision = entries.get(key).map(|e| e.revision + 1).unwrap_or(1);
        entries.insert(key.to_string(), Entry { value, revision });
        Ok(())
    }

    /// Write `value` only if the key is still at `expected` revision
    /// (`None` meaning the key must not exist yet).
    ///
    /// Returns `Ok(false)` when another writer got there first.
    pub fn compare_and_set<T: Serialize>(
        &self,
        key: &str,
        expected: Option<u64>,
        value: &T,
    ) -> Result<bool, CacheError> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.lock()?;
        let current = entries.get(key).map(|e| e.revision);
        if current != expected {
            return Ok(false);
        }
        let revision = current.map(|r| r + 1).unwrap_or(1);
        entries.insert(key.to_string(), Entry { value, revision });
        Ok(true)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.lock()?.contains_key(key))
    }

    /// Get all keys in the cache, in sorted order.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Entry>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::StoreError("cache lock poisoned".to_string()))
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use ipswich_cache::cache_key;
///
/// let key = cache_key!("cart", "sess_123");
/// assert_eq!(key, "cart:sess_123");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
