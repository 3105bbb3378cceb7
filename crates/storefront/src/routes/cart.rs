//! Cart route handlers.
//!
//! Quantity changes use HTMX and answer with the refreshed items fragment
//! plus `HX-Trigger: cart-updated`, which the header badge listens for.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use comforty_core::{CartAction, CartItem, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{CART_UPDATED, is_htmx};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::notifications::{Toast, take_flash};
use crate::services::SessionCart;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity.get(),
            price: item.price.display(),
            line_price: item.line_total().display(),
            image: item.image.clone(),
        }
    }
}

impl From<&SessionCart> for CartView {
    fn from(cart: &SessionCart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Form body naming one cart line.
#[derive(Debug, Deserialize)]
pub struct CartLineForm {
    pub id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub toast: Option<Toast>,
    pub nonce: String,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip_all)]
pub async fn show(session: Session, cart: SessionCart, CspNonce(nonce): CspNonce) -> impl IntoResponse {
    CartShowTemplate {
        cart: CartView::from(&cart),
        toast: take_flash(&session).await,
        nonce,
    }
}

/// Apply `action` and answer with the refreshed items fragment.
async fn mutate(headers: &HeaderMap, mut cart: SessionCart, action: CartAction) -> Result<Response> {
    let name = action.name();
    let product_id = action.product_id().to_string();

    cart.dispatch(action).await?;
    add_breadcrumb("cart", name, Some(&[("product_id", product_id.as_str())]));

    if !is_htmx(headers) {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED)]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Increase a line's quantity by one (HTMX).
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[instrument(skip(headers, cart))]
pub async fn increment(
    headers: HeaderMap,
    cart: SessionCart,
    Form(form): Form<CartLineForm>,
) -> Result<Response> {
    mutate(&headers, cart, CartAction::Increment(ProductId::new(form.id))).await
}

/// Decrease a line's quantity by one, removing it at zero (HTMX).
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[instrument(skip(headers, cart))]
pub async fn decrement(
    headers: HeaderMap,
    cart: SessionCart,
    Form(form): Form<CartLineForm>,
) -> Result<Response> {
    mutate(&headers, cart, CartAction::Decrement(ProductId::new(form.id))).await
}

/// Remove a line (HTMX).
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[instrument(skip(headers, cart))]
pub async fn remove(
    headers: HeaderMap,
    cart: SessionCart,
    Form(form): Form<CartLineForm>,
) -> Result<Response> {
    mutate(&headers, cart, CartAction::Remove(ProductId::new(form.id))).await
}

/// Get cart count badge (HTMX).
pub async fn count(cart: SessionCart) -> impl IntoResponse {
    CartCountTemplate {
        count: cart.item_count(),
    }
}
