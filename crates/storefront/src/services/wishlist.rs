//! Wishlist provider.
//!
//! The provider reads the stored list the first time something asks for it.
//! An empty or missing list is never written back on its own; the `wishlist`
//! key only appears after the first add that actually changes the list.

use axum::{extract::FromRequestParts, http::request::Parts};
use comforty_core::wishlist;
use comforty_core::{ProductId, WishlistAdd, WishlistItem};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::store::{self, LocalStore, StoreError, StoreKey};

/// Shared wishlist access for one request.
pub struct WishlistProvider<S> {
    store: S,
    items: Option<Vec<WishlistItem>>,
}

/// Wishlist backed by the shopper's session.
pub type SessionWishlist = WishlistProvider<Session>;

impl<S: LocalStore> WishlistProvider<S> {
    /// Wrap `store` without reading it yet.
    pub const fn new(store: S) -> Self {
        Self { store, items: None }
    }

    async fn loaded(&mut self) -> &mut Vec<WishlistItem> {
        if self.items.is_none() {
            let items = store::read_list(&self.store, StoreKey::Wishlist).await;
            tracing::debug!(count = items.len(), "Wishlist seeded from store");
            self.items = Some(items);
        }
        self.items.get_or_insert_with(Vec::new)
    }

    /// Current entries.
    pub async fn items(&mut self) -> &[WishlistItem] {
        self.loaded().await
    }

    /// Save `item` unless its id is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub async fn add(&mut self, item: WishlistItem) -> Result<WishlistAdd, StoreError> {
        let outcome = wishlist::add(self.loaded().await, item);
        if outcome.changed() {
            self.persist().await?;
        }
        Ok(outcome)
    }

    /// Drop the entry for `id`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: &ProductId) -> Result<bool, StoreError> {
        let removed = wishlist::remove(self.loaded().await, id);
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let items = self.items.as_deref().unwrap_or_default();
        store::write_list(&self.store, StoreKey::Wishlist, items).await
    }
}

impl<S> FromRequestParts<S> for SessionWishlist
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;
        Ok(Self::new(session))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use comforty_core::Price;

    use super::*;
    use crate::store::testing::RecordingStore;

    fn item(id: &str) -> WishlistItem {
        WishlistItem {
            id: ProductId::new(id),
            name: "Citrus Edge".to_string(),
            image_url: None,
            price: Price::from_cents(2500),
            slug: "citrus-edge".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_store_is_not_written_until_first_add() {
        let store = RecordingStore::default();
        let mut wishlist = WishlistProvider::new(store.clone());

        assert!(wishlist.items().await.is_empty());
        assert_eq!(store.write_count(StoreKey::Wishlist), 0);
        assert_eq!(store.raw(StoreKey::Wishlist), None);

        wishlist.add(item("1")).await.unwrap();
        assert_eq!(store.write_count(StoreKey::Wishlist), 1);
        assert!(store.raw(StoreKey::Wishlist).unwrap().contains("\"_id\":\"1\""));
    }

    #[tokio::test]
    async fn test_add_twice_keeps_one_entry() {
        let store = RecordingStore::default();
        let mut wishlist = WishlistProvider::new(store.clone());

        assert_eq!(wishlist.add(item("1")).await.unwrap(), WishlistAdd::Added);
        assert_eq!(
            wishlist.add(item("1")).await.unwrap(),
            WishlistAdd::AlreadyPresent
        );
        assert_eq!(wishlist.items().await.len(), 1);
        assert_eq!(store.write_count(StoreKey::Wishlist), 1);
    }

    #[tokio::test]
    async fn test_seeds_from_store() {
        let store = RecordingStore::with(
            StoreKey::Wishlist,
            r#"[{"_id":7,"name":"Stool","imageUrl":"x.png","price":20,"slug":"stool"}]"#,
        );
        let mut wishlist = WishlistProvider::new(store);

        assert_eq!(
            wishlist
                .add(WishlistItem {
                    id: ProductId::new("7"),
                    ..item("7")
                })
                .await
                .unwrap(),
            WishlistAdd::AlreadyPresent
        );
    }

    #[tokio::test]
    async fn test_remove_writes_only_on_change() {
        let store = RecordingStore::default();
        let mut wishlist = WishlistProvider::new(store.clone());

        assert!(!wishlist.remove(&ProductId::new("1")).await.unwrap());
        assert_eq!(store.write_count(StoreKey::Wishlist), 0);

        wishlist.add(item("1")).await.unwrap();
        assert!(wishlist.remove(&ProductId::new("1")).await.unwrap());
        assert_eq!(store.write_count(StoreKey::Wishlist), 2);
        assert_eq!(store.raw(StoreKey::Wishlist).unwrap(), "[]");
    }
}
