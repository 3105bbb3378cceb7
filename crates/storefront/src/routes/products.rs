//! Product route handlers.
//!
//! The detail page never errors: a missing product and a failed lookup both
//! render the loading presentation. The add-to-cart and add-to-wishlist
//! actions answer with a toast either way.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use comforty_core::{CartAction, WishlistAdd};
use tower_sessions::Session;
use tracing::instrument;

use super::{CART_UPDATED, toast_response};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::notifications::{
    ADDED_TO_CART, ADDED_TO_WISHLIST, ALREADY_IN_WISHLIST, PRODUCT_UNAVAILABLE, Toast, take_flash,
};
use crate::sanity::{Dimensions, Product, ProductSummary};
use crate::services::{SessionCart, SessionWishlist};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub slug: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category_name: Option<String>,
    pub dimensions: Option<String>,
    pub tags: Vec<String>,
    pub features: Vec<String>,
}

/// Related product card data for templates.
#[derive(Clone)]
pub struct RelatedView {
    pub slug: String,
    pub name: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            price: product.price.display(),
            description: product.description.clone().unwrap_or_default(),
            image_url: product.image_url.clone(),
            category_name: product.category_name.clone(),
            dimensions: product.dimensions.as_ref().and_then(format_dimensions),
            tags: product.tags.clone(),
            features: product.features.clone(),
        }
    }
}

impl From<&ProductSummary> for RelatedView {
    fn from(summary: &ProductSummary) -> Self {
        Self {
            slug: summary.slug.clone(),
            name: summary.name.clone(),
            price: summary.price.display(),
            image_url: summary.image_url.clone(),
        }
    }
}

/// "W 40 × H 65 × D 50", skipping unknown measurements.
fn format_dimensions(dimensions: &Dimensions) -> Option<String> {
    if !dimensions.is_known() {
        return None;
    }
    let parts: Vec<String> = [
        ("W", dimensions.width),
        ("H", dimensions.height),
        ("D", dimensions.depth),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label} {v}")))
    .collect();
    Some(parts.join(" × "))
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub related_products: Vec<RelatedView>,
    pub toast: Option<Toast>,
    pub nonce: String,
}

/// Shown while a product cannot be displayed.
#[derive(Template, WebTemplate)]
#[template(path = "products/loading.html")]
pub struct ProductLoadingTemplate {
    pub toast: Option<Toast>,
    pub nonce: String,
}

/// Look up a product for an action, logging backend failures.
async fn resolve(state: &AppState, slug: &str) -> Option<Product> {
    match state.content().get_product(slug).await {
        Ok(product) => product,
        Err(e) => {
            tracing::error!(error = %e, slug = %slug, "Failed to fetch product");
            None
        }
    }
}

/// Display product detail page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Response {
    let toast = take_flash(&session).await;

    let product = match state.content().get_product(&slug).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            tracing::debug!("No product for slug, showing loading state");
            return ProductLoadingTemplate { toast, nonce }.into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch product");
            return ProductLoadingTemplate { toast, nonce }.into_response();
        }
    };

    let related_products = match state.content().related_products(&product).await {
        Ok(related) => related.iter().map(RelatedView::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch related products");
            Vec::new()
        }
    };

    add_breadcrumb("navigation", "Viewed product", Some(&[("slug", slug.as_str())]));

    ProductShowTemplate {
        product: ProductView::from(&product),
        related_products,
        toast,
        nonce,
    }
    .into_response()
}

/// Add the product to the cart (HTMX).
///
/// Responds with the toast and `HX-Trigger: cart-updated`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[instrument(skip(state, headers, session, cart))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    session: Session,
    mut cart: SessionCart,
) -> Result<Response> {
    let back_to = format!("/products/{slug}");

    let Some(product) = resolve(&state, &slug).await else {
        let toast = Toast::error(PRODUCT_UNAVAILABLE);
        return Ok(toast_response(&session, &headers, &back_to, toast, None).await);
    };

    cart.dispatch(CartAction::Add(product.to_cart_product()))
        .await?;
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product.id.as_str())]),
    );

    let toast = Toast::success(ADDED_TO_CART);
    Ok(toast_response(&session, &headers, &back_to, toast, Some(CART_UPDATED)).await)
}

/// Save the product to the wishlist (HTMX).
///
/// # Errors
///
/// Returns an error if the wishlist cannot be saved.
#[instrument(skip(state, headers, session, wishlist))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    session: Session,
    mut wishlist: SessionWishlist,
) -> Result<Response> {
    let back_to = format!("/products/{slug}");

    let Some(product) = resolve(&state, &slug).await else {
        let toast = Toast::error(PRODUCT_UNAVAILABLE);
        return Ok(toast_response(&session, &headers, &back_to, toast, None).await);
    };

    let message = match wishlist.add(product.to_wishlist_item()).await? {
        WishlistAdd::Added => {
            add_breadcrumb(
                "wishlist",
                "Added to wishlist",
                Some(&[("product_id", product.id.as_str())]),
            );
            ADDED_TO_WISHLIST
        }
        WishlistAdd::AlreadyPresent => ALREADY_IN_WISHLIST,
    };

    Ok(toast_response(&session, &headers, &back_to, Toast::success(message), None).await)
}
