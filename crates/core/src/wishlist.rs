//! Wishlist items and their add/remove rules.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A saved-for-later product reference.
///
/// Field names match the stored representation (`_id`, `imageUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    pub price: Price,
    pub slug: String,
}

/// Result of adding to the wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAdd {
    /// The item was appended.
    Added,
    /// An item with the same id was already saved; nothing changed.
    AlreadyPresent,
}

impl WishlistAdd {
    /// Whether the list changed.
    #[must_use]
    pub const fn changed(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Append `item` unless an entry with the same id exists.
pub fn add(items: &mut Vec<WishlistItem>, item: WishlistItem) -> WishlistAdd {
    if items.iter().any(|existing| existing.id == item.id) {
        return WishlistAdd::AlreadyPresent;
    }
    items.push(item);
    WishlistAdd::Added
}

/// Drop the entry for `id`. Returns `true` if something was removed.
pub fn remove(items: &mut Vec<WishlistItem>, id: &ProductId) -> bool {
    let before = items.len();
    items.retain(|item| &item.id != id);
    items.len() != before
}
