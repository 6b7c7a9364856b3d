//! Durable string-keyed storage.
//!
//! A `Store` behaves like a small key-value area that outlives the process. `FileStore` keeps the
//! whole area in one JSON object on disk and re-reads it on every call, so separate invocations
//! always see the latest snapshot and the last write wins.

use crate::{utils, Result};
use anyhow::Context;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::trace;

/// A durable key-value area holding string values.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the value under `key`, or `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Erases `key`. Erasing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Erases every key in the area.
    async fn clear(&self) -> Result<()>;
}

type Slots = BTreeMap<String, String>;

/// A `Store` backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_slots(&self) -> Result<Slots> {
        let Some(content) = utils::read_optional(&self.path).await? else {
            return Ok(Slots::new());
        };
        if content.trim().is_empty() {
            return Ok(Slots::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse the storage file at {}", self.path.display()))
    }

    /// Writes through a sibling temp file that is then renamed over the original.
    async fn write_slots(&self, slots: &Slots) -> Result<()> {
        let data = serde_json::to_string_pretty(slots).context("Unable to serialize storage")?;
        let tmp = self.path.with_extension("json.tmp");
        utils::write(&tmp, data).await?;
        utils::rename(&tmp, &self.path).await?;
        trace!("Wrote {} keys to {}", slots.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl Store for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_slots().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut slots = self.read_slots().await?;
        slots.insert(key.to_string(), value);
        self.write_slots(&slots).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.read_slots().await?;
        if slots.remove(key).is_some() {
            self.write_slots(&slots).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.write_slots(&Slots::new()).await
    }
}

/// A `Store` that lives only as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<Slots>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, Slots> {
        // A poisoned map is still a valid map.
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.slots().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.slots().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.slots().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("items").await.unwrap(), None);
        store.remove("items").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileStore::new(&path);
        store.set("items", "[]".to_string()).await.unwrap();
        store.set("other", "x".to_string()).await.unwrap();
        assert_eq!(store.get("items").await.unwrap().as_deref(), Some("[]"));

        // A second handle sees the same data.
        let again = FileStore::new(&path);
        assert_eq!(again.get("other").await.unwrap().as_deref(), Some("x"));

        store.remove("items").await.unwrap();
        assert_eq!(store.get("items").await.unwrap(), None);
        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("x"));
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        store.set("items", "[]".to_string()).await.unwrap();
        store.set("other", "x".to_string()).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get("items").await.unwrap(), None);
        assert_eq!(store.get("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        let err = store.get("items").await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse the storage file"));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("items", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("items").await.unwrap().as_deref(), Some("[]"));
        store.clear().await.unwrap();
        assert_eq!(store.get("items").await.unwrap(), None);
    }
}
