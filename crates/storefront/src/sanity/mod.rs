//! Sanity content API client.
//!
//! # Architecture
//!
//! - GROQ queries over the HTTP query endpoint (`GET /data/query/{dataset}`)
//! - Sanity is the source of truth for products; nothing is stored locally
//! - In-memory caching via `moka` for found products (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use comforty_storefront::sanity::ContentClient;
//!
//! let client = ContentClient::new(&config.sanity)?;
//!
//! if let Some(product) = client.get_product("library-stool-chair").await? {
//!     let related = client.related_products(&product).await?;
//! }
//! ```

mod cache;
mod client;
pub mod queries;
pub mod types;

pub use client::ContentClient;
pub use types::{Dimensions, Product, ProductSummary};

use thiserror::Error;

/// Errors that can occur when talking to the content backend.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Content API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured project or dataset does not form a valid URL.
    #[error("Invalid content endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Rate limited by the content API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}
