//! Content backend check.
//!
//! Runs the same product query the storefront detail page runs and prints
//! the result, which is handy when a page shows the loading state and you
//! need to know whether the slug exists in the dataset.
//!
//! # Environment Variables
//!
//! - `SANITY_PROJECT_ID`, `SANITY_DATASET` (required)
//! - `SANITY_API_VERSION`, `SANITY_API_TOKEN`, `SANITY_USE_CDN` (optional)

use comforty_storefront::config::SanityConfig;
use comforty_storefront::sanity::ContentClient;

/// Fetch `slug` and print it as JSON, optionally with its related products.
///
/// # Errors
///
/// Returns an error if configuration is missing, the query fails, or no
/// product has the slug.
pub async fn show(slug: &str, related: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = SanityConfig::from_env()?;
    let client = ContentClient::new(&config)?;

    let product = client
        .get_product(slug)
        .await?
        .ok_or_else(|| format!("No product with slug '{slug}'"))?;

    tracing::info!(id = %product.id, name = %product.name, "Product found");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&product)?);
    }

    if related {
        let related = client.related_products(&product).await?;
        tracing::info!(count = related.len(), "Related products");

        #[allow(clippy::print_stdout)]
        {
            println!("{}", serde_json::to_string_pretty(&related)?);
        }
    }

    Ok(())
}
