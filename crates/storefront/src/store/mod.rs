//! Per-shopper persistent key-value blob.
//!
//! The cart and wishlist each live under one key as a JSON text list. The
//! production backend is the shopper's `tower-sessions` session (persisted
//! in `PostgreSQL`), so the blob survives reloads and restarts.
//!
//! Reads are forgiving: an absent key, a value that is not text, or text
//! that does not parse as the expected list all read as an empty list.
//! Writes always replace the whole list.

mod session;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// The two logical keys in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Cart,
    Wishlist,
}

impl StoreKey {
    /// Key name in the backing store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to load or save.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A list could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Text key-value storage scoped to one shopper.
pub trait LocalStore: Send + Sync {
    /// Read the raw text under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or holds something other
    /// than text.
    fn read(&self, key: StoreKey) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Replace the value under `key`.
    fn write(&self, key: StoreKey, value: String) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete `key`.
    fn remove(&self, key: StoreKey) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Read the list under `key`, treating anything unreadable as empty.
pub async fn read_list<T, S>(store: &S, key: StoreKey) -> Vec<T>
where
    T: DeserializeOwned,
    S: LocalStore,
{
    let raw = match store.read(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read stored list, using empty");
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key = %key, error = %e, "Stored list is malformed, using empty");
        Vec::new()
    })
}

/// Serialize `items` and write them under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub async fn write_list<T, S>(store: &S, key: StoreKey, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize + Sync,
    S: LocalStore,
{
    let raw = serde_json::to_string(items)?;
    store.write(key, raw).await
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use comforty_core::{CartItem, WishlistItem};

    use super::testing::RecordingStore;
    use super::*;

    #[tokio::test]
    async fn test_absent_key_reads_empty() {
        let store = RecordingStore::default();
        let items: Vec<CartItem> = read_list(&store, StoreKey::Cart).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_reads_empty() {
        for raw in ["not json", "{\"id\": 1}", "[{\"id\": 1}]", "", "null"] {
            let store = RecordingStore::with(StoreKey::Wishlist, raw);
            let items: Vec<WishlistItem> = read_list(&store, StoreKey::Wishlist).await;
            assert!(items.is_empty(), "expected empty for {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = RecordingStore::default();
        let items = vec![serde_json::json!({"id": "a"})];
        write_list(&store, StoreKey::Cart, &items).await.unwrap();
        assert_eq!(store.raw(StoreKey::Cart).unwrap(), r#"[{"id":"a"}]"#);
        assert_eq!(store.write_count(StoreKey::Cart), 1);
        assert_eq!(store.write_count(StoreKey::Wishlist), 0);
    }
}
