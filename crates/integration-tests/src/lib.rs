//! End-to-end tests against a running storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and create the session table
//! cargo run -p comforty-cli -- migrate
//!
//! # Start the storefront
//! cargo run -p comforty-storefront
//!
//! # Run the ignored tests
//! STOREFRONT_URL=http://127.0.0.1:3000 \
//! TEST_PRODUCT_SLUG=library-stool-chair \
//!     cargo test -p comforty-integration-tests -- --ignored
//! ```
//!
//! Each [`Shopper`] has its own cookie jar, so tests get independent carts.

use reqwest::{Client, Response, redirect};

/// Default storefront address.
pub const DEFAULT_STOREFRONT_URL: &str = "http://127.0.0.1:3000";

/// Slug used when `TEST_PRODUCT_SLUG` is unset.
pub const DEFAULT_PRODUCT_SLUG: &str = "library-stool-chair";

/// Base URL of the storefront under test.
#[must_use]
pub fn storefront_url() -> String {
    std::env::var("STOREFRONT_URL").unwrap_or_else(|_| DEFAULT_STOREFRONT_URL.to_string())
}

/// A product slug that exists in the dataset the storefront queries.
#[must_use]
pub fn product_slug() -> String {
    std::env::var("TEST_PRODUCT_SLUG").unwrap_or_else(|_| DEFAULT_PRODUCT_SLUG.to_string())
}

/// One browser session: a cookie jar and the storefront's base URL.
///
/// Redirects are not followed so tests can assert on them.
pub struct Shopper {
    client: Client,
    base_url: String,
}

impl Shopper {
    /// Create a shopper with an empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            base_url: storefront_url(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Plain GET.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    /// Form post as a browser without HTMX sends it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).form(form).send().await
    }

    /// Form post with `HX-Request: true`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
    }

    /// Current cart badge count.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cart_count(&self) -> reqwest::Result<Option<u32>> {
        let body = self.get("/cart/count").await?.text().await?;
        Ok(parse_count(&body))
    }
}

/// Pull the number out of the cart badge fragment.
fn parse_count(fragment: &str) -> Option<u32> {
    let start = fragment.find('>')? + 1;
    let end = start + fragment.get(start..)?.find('<')?;
    fragment.get(start..end)?.trim().parse().ok()
}

/// A shipping form that passes validation.
#[must_use]
pub fn valid_shipping_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("phone", "5551234567"),
        ("address", "12 Analytical Way"),
        ("city", "London"),
        ("state", "LN"),
        ("zipCode", "90210"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(
            parse_count(r#"<span class="cart-count" aria-label="Items in cart">3</span>"#),
            Some(3)
        );
        assert_eq!(parse_count("<span></span>"), None);
    }
}
