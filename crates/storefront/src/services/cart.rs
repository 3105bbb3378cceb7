//! Write-through cart container.
//!
//! `CartStore` is the only code that writes the `cart` key. Every dispatch
//! applies the pure transition from [`comforty_core::cart`] and then
//! re-serializes the whole list before returning, so the stored blob and
//! the in-memory list never disagree once a call completes.
//!
//! Handlers receive a session-backed cart through the [`SessionCart`]
//! extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use comforty_core::cart;
use comforty_core::{CartAction, CartItem, Price};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::store::{self, LocalStore, StoreError, StoreKey};

/// The cart as seen by one request.
pub struct CartStore<S> {
    store: S,
    items: Vec<CartItem>,
}

/// Cart backed by the shopper's session.
pub type SessionCart = CartStore<Session>;

impl<S: LocalStore> CartStore<S> {
    /// Load the current cart snapshot from `store`.
    pub async fn load(store: S) -> Self {
        let items = store::read_list(&store, StoreKey::Cart).await;
        Self { store, items }
    }

    /// Current lines.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ unit price × quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        cart::subtotal(&self.items)
    }

    /// Total units across lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        cart::item_count(&self.items)
    }

    /// Apply `action` and write the whole list through to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. The in-memory list has already
    /// changed at that point; callers should drop this value rather than
    /// keep using it.
    #[instrument(skip(self, action), fields(action = action.name(), product_id = %action.product_id()))]
    pub async fn dispatch(&mut self, action: CartAction) -> Result<&[CartItem], StoreError> {
        cart::apply(&mut self.items, action);
        store::write_list(&self.store, StoreKey::Cart, &self.items).await?;
        tracing::debug!(lines = self.items.len(), "Cart written");
        Ok(&self.items)
    }

    /// Delete the stored cart entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the delete.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(StoreKey::Cart).await?;
        self.items.clear();
        Ok(())
    }
}

impl<S> FromRequestParts<S> for SessionCart
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
        Ok(Self::load(session).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use comforty_core::{CartProduct, ProductId};

    use super::*;
    use crate::store::testing::RecordingStore;

    fn product(id: &str, cents: u32) -> CartProduct {
        CartProduct {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_writes_through() {
        let store = RecordingStore::default();
        let mut cart = CartStore::load(store.clone()).await;

        cart.dispatch(CartAction::Add(product("a", 1000)))
            .await
            .unwrap();
        cart.dispatch(CartAction::Add(product("a", 1000)))
            .await
            .unwrap();

        assert_eq!(store.write_count(StoreKey::Cart), 2);

        let reloaded = CartStore::load(store).await;
        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(reloaded.items()[0].quantity.get(), 2);
    }

    #[tokio::test]
    async fn test_noop_still_writes() {
        let store = RecordingStore::default();
        let mut cart = CartStore::load(store.clone()).await;
        cart.dispatch(CartAction::Remove(ProductId::new("missing")))
            .await
            .unwrap();
        assert_eq!(store.write_count(StoreKey::Cart), 1);
        assert_eq!(store.raw(StoreKey::Cart).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_from_store() {
        let store = RecordingStore::with(
            StoreKey::Cart,
            r#"[{"id":"a","name":"A","price":"10","quantity":1}]"#,
        );
        let mut cart = CartStore::load(store.clone()).await;
        cart.dispatch(CartAction::Decrement(ProductId::new("a")))
            .await
            .unwrap();
        assert!(cart.is_empty());
        assert_eq!(store.raw(StoreKey::Cart).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_subtotal_and_count() {
        let store = RecordingStore::with(
            StoreKey::Cart,
            r#"[{"id":"a","name":"A","price":10,"quantity":2},{"id":"b","name":"B","price":5,"quantity":3}]"#,
        );
        let cart = CartStore::load(store).await;
        assert_eq!(cart.subtotal(), Price::from_cents(3500));
        assert_eq!(cart.item_count(), 5);
    }

    #[tokio::test]
    async fn test_malformed_store_loads_empty() {
        let store = RecordingStore::with(StoreKey::Cart, "{broken");
        let cart = CartStore::load(store).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_key() {
        let store = RecordingStore::with(
            StoreKey::Cart,
            r#"[{"id":"a","name":"A","price":"10","quantity":1}]"#,
        );
        let mut cart = CartStore::load(store.clone()).await;
        cart.clear().await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(store.raw(StoreKey::Cart), None);
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let store = RecordingStore::failing();
        let mut cart = CartStore::load(store).await;
        let result = cart.dispatch(CartAction::Add(product("a", 100))).await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }
}
