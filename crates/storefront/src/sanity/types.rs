//! Product projections returned by the content backend.
//!
//! GROQ projections return `null` for fields a document does not have, so
//! optional text is `Option` and lists go through [`null_as_empty`].

use comforty_core::{CartProduct, Price, ProductId, WishlistItem};
use serde::{Deserialize, Deserializer, Serialize};

/// A product as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub description: Option<String>,
    pub price: Price,
    pub dimensions: Option<Dimensions>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<String>,
}

/// Physical size. Units are whatever the content editors entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

impl Dimensions {
    /// Whether any measurement is present.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.width.is_some() || self.height.is_some() || self.depth.is_some()
    }
}

/// A related product card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub price: Price,
}

impl Product {
    /// Payload for adding this product to the cart.
    #[must_use]
    pub fn to_cart_product(&self) -> CartProduct {
        CartProduct {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.image_url.clone(),
        }
    }

    /// Entry for saving this product to the wishlist.
    #[must_use]
    pub fn to_wishlist_item(&self) -> WishlistItem {
        WishlistItem {
            id: self.id.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            price: self.price,
            slug: self.slug.clone(),
        }
    }
}

/// Deserialize a list, treating `null` as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
