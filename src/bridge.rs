//! Mirrors the ledger's entries into one named slot of a `Store`.

use crate::error::{ErrorType, IntoResult};
use crate::model::Entry;
use crate::store::Store;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The slot the item list is kept under unless configured otherwise.
pub const DEFAULT_KEY: &str = "items";

/// How much of the store `Bridge::clear` erases.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearScope {
    /// Only the bridge's own slot.
    #[default]
    Key,
    /// Every key in the store.
    All,
}

serde_plain::derive_display_from_serialize!(ClearScope);
serde_plain::derive_fromstr_from_deserialize!(ClearScope);

/// Reads, writes and erases the stored copy of the entry list. Holds no state of its own beyond
/// the store handle and the slot name.
#[derive(Debug, Clone)]
pub struct Bridge<S> {
    store: S,
    key: String,
}

impl<S> Bridge<S>
where
    S: Store,
{
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored entries, or `None` if the slot was never written or is empty.
    ///
    /// # Errors
    /// - `ErrorType::Storage` if the store cannot be read.
    /// - `ErrorType::Deserialization` if the slot does not hold a valid entry list.
    pub async fn load(&self) -> Result<Option<Vec<Entry>>> {
        let text = self
            .store
            .get(&self.key)
            .await
            .pub_result(ErrorType::Storage)?;
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            debug!("No stored entries under '{}'", self.key);
            return Ok(None);
        };
        let entries: Vec<Entry> = serde_json::from_str(&text)
            .with_context(|| format!("The value stored under '{}' is not an item list", self.key))
            .pub_result(ErrorType::Deserialization)?;
        debug!("Loaded {} entries from '{}'", entries.len(), self.key);
        Ok(Some(entries))
    }

    /// Overwrites the slot with a snapshot of `entries`.
    pub async fn save(&self, entries: &[Entry]) -> Result<()> {
        let text = serde_json::to_string(entries).context("Unable to serialize the item list")?;
        self.store
            .set(&self.key, text)
            .await
            .pub_result(ErrorType::Storage)?;
        debug!("Saved {} entries to '{}'", entries.len(), self.key);
        Ok(())
    }

    pub async fn clear(&self, scope: ClearScope) -> Result<()> {
        let result = match scope {
            ClearScope::Key => self.store.remove(&self.key).await,
            ClearScope::All => self.store.clear().await,
        };
        result.pub_result(ErrorType::Storage)?;
        debug!("Cleared storage ({scope})");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use crate::model::Amount;
    use crate::store::MemoryStore;
    use std::str::FromStr;

    fn bridge() -> Bridge<MemoryStore> {
        Bridge::new(MemoryStore::new(), DEFAULT_KEY)
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("apple", Amount::from(3)),
            Entry::new("bread", Amount::from_str("2.5").unwrap()),
            Entry::new("milk", Amount::ZERO),
        ]
    }

    #[tokio::test]
    async fn test_load_absent() {
        assert_eq!(bridge().load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_empty_value_is_absent() {
        let bridge = bridge();
        bridge.store().set(DEFAULT_KEY, String::new()).await.unwrap();
        assert_eq!(bridge.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let bridge = bridge();
        bridge.save(&entries()).await.unwrap();
        assert_eq!(bridge.load().await.unwrap(), Some(entries()));
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let bridge = bridge();
        bridge.save(&entries()).await.unwrap();
        bridge.save(&entries()[..1]).await.unwrap();
        assert_eq!(bridge.load().await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stored_format() {
        let bridge = bridge();
        bridge.save(&entries()[..2]).await.unwrap();
        let text = bridge.store().get(DEFAULT_KEY).await.unwrap().unwrap();
        assert_eq!(
            text,
            r#"[{"name":"Apple","price":3},{"name":"Bread","price":2.5}]"#
        );
    }

    #[tokio::test]
    async fn test_load_malformed() {
        let bridge = bridge();
        bridge
            .store()
            .set(DEFAULT_KEY, "[{\"name\":".to_string())
            .await
            .unwrap();
        let err = bridge.load().await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Deserialization));
    }

    #[tokio::test]
    async fn test_clear_key_leaves_other_keys() {
        let bridge = bridge();
        bridge.save(&entries()).await.unwrap();
        bridge.store().set("other", "x".to_string()).await.unwrap();
        bridge.clear(ClearScope::Key).await.unwrap();
        assert_eq!(bridge.load().await.unwrap(), None);
        assert!(bridge.store().get("other").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_all() {
        let bridge = bridge();
        bridge.save(&entries()).await.unwrap();
        bridge.store().set("other", "x".to_string()).await.unwrap();
        bridge.clear(ClearScope::All).await.unwrap();
        assert_eq!(bridge.load().await.unwrap(), None);
        assert!(bridge.store().get("other").await.unwrap().is_none());
    }

    #[test]
    fn test_clear_scope_from_str() {
        assert_eq!(ClearScope::from_str("all").unwrap(), ClearScope::All);
        assert_eq!(ClearScope::Key.to_string(), "key");
    }
}
