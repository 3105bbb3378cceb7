//! Cache types for content API responses.

use super::types::{Product, ProductSummary};

/// Cache key for content lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Related { category: String, exclude: String },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Related(Vec<ProductSummary>),
}
