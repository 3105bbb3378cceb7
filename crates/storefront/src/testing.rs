//! Router test harness.
//!
//! Builds the full middleware stack over an in-memory session store and a
//! content client pointed at an unreachable endpoint. Tests seed the content
//! cache with [`prime_catalog`] when they need products.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use sqlx::postgres::PgPoolOptions;
use tower_sessions::MemoryStore;
use url::Url;

use crate::middleware::session;
use crate::sanity::{ContentClient, Product, ProductSummary};
use crate::services::{LogOrderSink, OrderSink};
use crate::state::AppState;

/// State with the logging order sink.
pub fn state() -> AppState {
    state_with_sink(Arc::new(LogOrderSink))
}

pub fn state_with_sink(orders: Arc<dyn OrderSink>) -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/comforty_test")
        .unwrap();
    // Port 9 (discard) refuses connections, so uncached lookups fail fast
    let content = ContentClient::with_endpoint(
        Url::parse("http://127.0.0.1:9/v2025-01-21/data/query/test").unwrap(),
        None,
    );
    AppState::from_parts(pool, content, orders)
}

pub fn app(state: AppState) -> Router {
    crate::app(state, session::configure(MemoryStore::default(), false))
}

/// Cache a chair with one related product.
pub async fn prime_catalog(state: &AppState) {
    let product: Product = serde_json::from_str(
        r#"{
            "_id": 42,
            "name": "Library Stool Chair",
            "slug": "library-stool-chair",
            "imageUrl": "https://cdn.sanity.io/images/p/d/stool.png",
            "categoryName": "Chairs",
            "categorySlug": "chairs",
            "description": "A sturdy stool.",
            "price": 99.5,
            "dimensions": {"width": 40, "height": 65, "depth": 45},
            "tags": ["oak"],
            "features": ["Solid oak"]
        }"#,
    )
    .unwrap();
    let related: Vec<ProductSummary> = serde_json::from_str(
        r#"[{"_id": "7", "name": "Citrus Edge", "slug": "citrus-edge",
             "imageUrl": null, "price": 20}]"#,
    )
    .unwrap();
    state.content().prime(product, related).await;
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// Form post without the `HX-Request` header.
pub fn post(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

/// Form post as HTMX sends it.
pub fn htmx_post(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut request = post(uri, form, cookie);
    request
        .headers_mut()
        .insert("HX-Request", header::HeaderValue::from_static("true"));
    request
}

/// `name=value` of the session cookie set by `response`.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(session::SESSION_COOKIE_NAME))
        .and_then(|value| value.split(';').next())
        .map(String::from)
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
