//! GROQ query client.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::ContentError;
use super::cache::{CacheKey, CacheValue};
use super::queries;
use super::types::{Product, ProductSummary};
use crate::config::SanityConfig;

/// Envelope of every query response.
#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Error body returned with 4xx/5xx responses.
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    description: Option<String>,
}

// =============================================================================
// ContentClient
// =============================================================================

/// Client for the Sanity HTTP query API.
///
/// Found products and related-product lists are cached for 5 minutes.
/// Missing products are not cached so newly published documents show up
/// without waiting for expiry.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

struct ContentClientInner {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl ContentClient {
    /// Create a client for the configured project and dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the project ID or dataset does not form a valid URL.
    pub fn new(config: &SanityConfig) -> Result<Self, ContentError> {
        let host = if config.use_cdn { "apicdn" } else { "api" };
        let endpoint = Url::parse(&format!(
            "https://{}.{host}.sanity.io/v{}/data/query/{}",
            config.project_id, config.api_version, config.dataset
        ))?;
        Ok(Self::with_endpoint(endpoint, config.token.clone()))
    }

    /// Create a client against an explicit query endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: Url, token: Option<SecretString>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(ContentClientInner {
                client: reqwest::Client::new(),
                endpoint,
                token,
                cache,
            }),
        }
    }

    /// Query URL with the GROQ text and JSON-encoded `$` parameters.
    fn query_url(&self, query: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.inner.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                let encoded = serde_json::Value::from(*value).to_string();
                pairs.append_pair(&format!("${name}"), &encoded);
            }
        }
        url
    }

    /// Run a GROQ query and decode its `result`.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ContentError> {
        let mut request = self.inner.client.get(self.query_url(query, params));
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ContentError::RateLimited(retry_after));
        }

        // Read as text first so failures can log the body
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Content API returned non-success status"
            );
            let message = serde_json::from_str::<ErrorResponse>(&response_text)
                .ok()
                .and_then(|body| body.error.description)
                .unwrap_or_else(|| response_text.chars().take(200).collect());
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match serde_json::from_str::<QueryResponse<T>>(&response_text) {
            Ok(body) => Ok(body.result),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse content API response"
                );
                Err(ContentError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its slug. `Ok(None)` when no product has that slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product(&self, slug: &str) -> Result<Option<Product>, ContentError> {
        let cache_key = CacheKey::Product(slug.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let product: Option<Product> = self
            .execute(queries::PRODUCT_BY_SLUG, &[("slug", slug)])
            .await?;

        if let Some(product) = &product {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
                .await;
        } else {
            debug!("No product with this slug");
        }

        Ok(product)
    }

    /// Products sharing `product`'s category, excluding `product` itself.
    ///
    /// Uncategorized products have no related products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, product), fields(slug = %product.slug))]
    pub async fn related_products(
        &self,
        product: &Product,
    ) -> Result<Vec<ProductSummary>, ContentError> {
        let Some(category) = product.category_slug.as_deref() else {
            return Ok(Vec::new());
        };

        let cache_key = CacheKey::Related {
            category: category.to_string(),
            exclude: product.slug.clone(),
        };

        if let Some(CacheValue::Related(related)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for related products");
            return Ok(related);
        }

        let related: Vec<ProductSummary> = self
            .execute(
                queries::RELATED_PRODUCTS,
                &[("category", category), ("slug", product.slug.as_str())],
            )
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Related(related.clone()))
            .await;

        Ok(related)
    }

    /// Seed the cache so lookups succeed without a backend.
    #[cfg(test)]
    pub(crate) async fn prime(&self, product: Product, related: Vec<ProductSummary>) {
        if let Some(category) = product.category_slug.clone() {
            self.inner
                .cache
                .insert(
                    CacheKey::Related {
                        category,
                        exclude: product.slug.clone(),
                    },
                    CacheValue::Related(related),
                )
                .await;
        }
        self.inner
            .cache
            .insert(
                CacheKey::Product(product.slug.clone()),
                CacheValue::Product(Box::new(product)),
            )
            .await;
    }
}
