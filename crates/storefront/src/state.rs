//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::sanity::{ContentClient, ContentError};
use crate::services::{LogOrderSink, OrderSink};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Per-shopper data (cart, wishlist) is not
/// here; it lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    content: ContentClient,
    orders: Arc<dyn OrderSink>,
}

impl AppState {
    /// Create the application state with the logging order sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the Sanity configuration does not form a valid
    /// endpoint URL.
    pub fn new(config: &StorefrontConfig, pool: PgPool) -> Result<Self, ContentError> {
        let content = ContentClient::new(&config.sanity)?;
        Ok(Self::from_parts(pool, content, Arc::new(LogOrderSink)))
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn from_parts(pool: PgPool, content: ContentClient, orders: Arc<dyn OrderSink>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                content,
                orders,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Sanity content client.
    #[must_use]
    pub fn content(&self) -> &ContentClient {
        &self.inner.content
    }

    /// Where placed orders go.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderSink {
        self.inner.orders.as_ref()
    }
}
