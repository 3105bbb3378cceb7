//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database)
//!
//! # Products
//! GET  /products/{slug}             - Product detail (loading state if missing)
//! POST /products/{slug}/cart        - Add to cart (toast, triggers cart-updated)
//! POST /products/{slug}/wishlist    - Save to wishlist (toast)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                        - Cart page
//! POST /cart/increment              - Quantity +1 (returns cart_items fragment)
//! POST /cart/decrement              - Quantity -1, removes at zero
//! POST /cart/remove                 - Remove line
//! GET  /cart/count                  - Cart count badge (fragment)
//!
//! # Wishlist
//! GET  /wishlist                    - Wishlist page
//! POST /wishlist/remove             - Remove entry (returns wishlist_items fragment)
//!
//! # Checkout
//! GET  /checkout                    - Shipping form and order summary
//! POST /checkout                    - Place order (303 to /thankyou, or 422 with errors)
//! GET  /thankyou                    - Confirmation (consumes the success flash)
//! ```
//!
//! Mutating endpoints answer HTMX requests with fragments. Plain form posts
//! (no `HX-Request` header) get the toast as a flash and a redirect back.

pub mod cart;
pub mod checkout;
pub mod health;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;

use crate::notifications::{Toast, ToastTemplate, set_flash};
use crate::state::AppState;

/// HTMX event fired after every cart mutation.
pub const CART_UPDATED: &str = "cart-updated";

/// Whether the request came from HTMX.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Show `toast` to the shopper.
///
/// HTMX requests get the toast fragment (plus `HX-Trigger: event` when
/// given). Plain posts get the toast as a flash and a redirect to `back_to`.
pub(crate) async fn toast_response(
    session: &Session,
    headers: &HeaderMap,
    back_to: &str,
    toast: Toast,
    event: Option<&'static str>,
) -> Response {
    if is_htmx(headers) {
        let fragment = ToastTemplate::from(toast);
        return match event {
            Some(event) => (AppendHeaders([("HX-Trigger", event)]), fragment).into_response(),
            None => fragment.into_response(),
        };
    }

    if let Err(e) = set_flash(session, &toast).await {
        tracing::warn!(error = %e, "Failed to store flash");
    }
    Redirect::to(back_to).into_response()
}

/// Create the health routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .route("/ready", get(health::readiness))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(products::show))
        .route("/{slug}/cart", post(products::add_to_cart))
        .route("/{slug}/wishlist", post(products::add_to_wishlist))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/remove", post(wishlist::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/thankyou", get(checkout::thank_you))
}
