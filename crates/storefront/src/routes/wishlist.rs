//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use comforty_core::{ProductId, WishlistItem};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::is_htmx;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::notifications::{Toast, take_flash};
use crate::services::SessionWishlist;

/// Wishlist entry display data for templates.
#[derive(Clone)]
pub struct WishlistItemView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl From<&WishlistItem> for WishlistItemView {
    fn from(item: &WishlistItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            slug: item.slug.clone(),
            price: item.price.display(),
            image_url: item.image_url.clone(),
        }
    }
}

fn views(items: &[WishlistItem]) -> Vec<WishlistItemView> {
    items.iter().map(WishlistItemView::from).collect()
}

/// Form body naming one wishlist entry.
#[derive(Debug, Deserialize)]
pub struct WishlistEntryForm {
    pub id: String,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub items: Vec<WishlistItemView>,
    pub toast: Option<Toast>,
    pub nonce: String,
}

/// Wishlist items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_items.html")]
pub struct WishlistItemsTemplate {
    pub items: Vec<WishlistItemView>,
}

/// Display wishlist page.
#[instrument(skip_all)]
pub async fn show(
    session: Session,
    mut wishlist: SessionWishlist,
    CspNonce(nonce): CspNonce,
) -> impl IntoResponse {
    WishlistShowTemplate {
        items: views(wishlist.items().await),
        toast: take_flash(&session).await,
        nonce,
    }
}

/// Remove an entry (HTMX).
///
/// # Errors
///
/// Returns an error if the wishlist cannot be saved.
#[instrument(skip(headers, wishlist))]
pub async fn remove(
    headers: HeaderMap,
    mut wishlist: SessionWishlist,
    Form(form): Form<WishlistEntryForm>,
) -> Result<Response> {
    let id = ProductId::new(form.id);
    if wishlist.remove(&id).await? {
        add_breadcrumb("wishlist", "Removed from wishlist", Some(&[("product_id", id.as_str())]));
    }

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/wishlist").into_response());
    }

    Ok(WishlistItemsTemplate {
        items: views(wishlist.items().await),
    }
    .into_response())
}
