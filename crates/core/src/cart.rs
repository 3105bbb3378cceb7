//! Cart items and the cart reducer.
//!
//! [`apply`] is the only way a cart list changes. It is a pure, total
//! function: every action produces a valid list, and the list never holds
//! two entries for the same product or an entry with quantity zero.
//!
//! # Example
//!
//! ```rust
//! use comforty_core::{CartAction, CartProduct, Price, ProductId};
//! use comforty_core::cart::apply;
//!
//! let chair = CartProduct {
//!     id: ProductId::new("chair"),
//!     name: "Library Stool Chair".to_string(),
//!     price: Price::from_cents(2000),
//!     image: None,
//! };
//!
//! let mut items = Vec::new();
//! apply(&mut items, CartAction::Add(chair.clone()));
//! apply(&mut items, CartAction::Add(chair));
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].quantity.get(), 2);
//! ```

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// One line of the cart.
///
/// This is also the stored representation: the whole cart is persisted as a
/// JSON list of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Price,
    pub quantity: NonZeroU32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Line total (unit price × quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Product data needed to put something in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<CartProduct> for CartItem {
    fn from(product: CartProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity: NonZeroU32::MIN,
            image: product.image,
        }
    }
}

/// A cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a product, creating the line if needed.
    Add(CartProduct),
    /// Drop the line for a product.
    Remove(ProductId),
    /// Add one unit to an existing line.
    Increment(ProductId),
    /// Take one unit off an existing line, dropping it at zero.
    Decrement(ProductId),
}

impl CartAction {
    /// Short name used in logs and breadcrumbs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
        }
    }

    /// The product this action targets.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        match self {
            Self::Add(product) => &product.id,
            Self::Remove(id) | Self::Increment(id) | Self::Decrement(id) => id,
        }
    }
}

/// Apply `action` to `items` in place.
///
/// Actions that target a product not in the cart (other than `Add`) leave
/// the list unchanged.
pub fn apply(items: &mut Vec<CartItem>, action: CartAction) {
    match action {
        CartAction::Add(product) => {
            if let Some(item) = items.iter_mut().find(|item| item.id == product.id) {
                item.quantity = item.quantity.saturating_add(1);
            } else {
                items.push(CartItem::from(product));
            }
        }
        CartAction::Remove(id) => items.retain(|item| item.id != id),
        CartAction::Increment(id) => {
            if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                item.quantity = item.quantity.saturating_add(1);
            }
        }
        CartAction::Decrement(id) => {
            let Some(item) = items.iter_mut().find(|item| item.id == id) else {
                return;
            };
            if let Some(quantity) = NonZeroU32::new(item.quantity.get() - 1) {
                item.quantity = quantity;
            } else {
                items.retain(|item| item.id != id);
            }
        }
    }
}

/// Sum of price × quantity over all lines.
#[must_use]
pub fn subtotal(items: &[CartItem]) -> Price {
    items.iter().map(CartItem::line_total).sum()
}

/// Total number of units across all lines.
#[must_use]
pub fn item_count(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0_u32, |acc, item| acc.saturating_add(item.quantity.get()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn product(id: &str, cents: u32) -> CartProduct {
        CartProduct {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents),
            image: None,
        }
    }

    fn item(id: &str, cents: u32, quantity: u32) -> CartItem {
        CartItem {
            quantity: NonZeroU32::new(quantity).unwrap(),
            ..CartItem::from(product(id, cents))
        }
    }

    #[test]
    fn test_add_new_item_starts_at_one() {
        let mut items = Vec::new();
        apply(&mut items, CartAction::Add(product("a", 1000)));
        assert_eq!(items, vec![item("a", 1000, 1)]);
    }

    #[test]
    fn test_add_existing_item_increments_without_new_entry() {
        let mut items = vec![item("a", 1000, 3), item("b", 500, 1)];
        apply(&mut items, CartAction::Add(product("a", 1000)));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity.get(), 4);
        assert_eq!(items[1].quantity.get(), 1);
    }

    #[test]
    fn test_remove() {
        let mut items = vec![item("a", 1000, 3), item("b", 500, 1)];
        apply(&mut items, CartAction::Remove(ProductId::new("a")));
        assert_eq!(items, vec![item("b", 500, 1)]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut items = vec![item("a", 1000, 1)];
        apply(&mut items, CartAction::Remove(ProductId::new("zzz")));
        assert_eq!(items, vec![item("a", 1000, 1)]);
    }

    #[test]
    fn test_increment() {
        let mut items = vec![item("a", 1000, 1)];
        apply(&mut items, CartAction::Increment(ProductId::new("a")));
        assert_eq!(items[0].quantity.get(), 2);
    }

    #[test]
    fn test_increment_absent_is_noop() {
        let mut items = Vec::new();
        apply(&mut items, CartAction::Increment(ProductId::new("a")));
        assert!(items.is_empty());
    }

    #[test]
    fn test_decrement_above_one_keeps_entry() {
        let mut items = vec![item("a", 1000, 2)];
        apply(&mut items, CartAction::Decrement(ProductId::new("a")));
        assert_eq!(items, vec![item("a", 1000, 1)]);
    }

    #[test]
    fn test_decrement_at_one_removes_entry() {
        let mut items = vec![item("a", 1000, 1), item("b", 500, 2)];
        apply(&mut items, CartAction::Decrement(ProductId::new("a")));
        assert_eq!(items, vec![item("b", 500, 2)]);
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let mut items = vec![item("b", 500, 2)];
        apply(&mut items, CartAction::Decrement(ProductId::new("a")));
        assert_eq!(items, vec![item("b", 500, 2)]);
    }

    #[test]
    fn test_increment_saturates() {
        let mut items = vec![item("a", 1, u32::MAX)];
        apply(&mut items, CartAction::Increment(ProductId::new("a")));
        assert_eq!(items[0].quantity.get(), u32::MAX);
    }

    #[test]
    fn test_action_sequences_keep_invariants() {
        // Small deterministic generator so the sequence covers every action
        // against a handful of ids.
        let ids = ["a", "b", "c"];
        let mut items = Vec::new();
        let mut seed: u32 = 17;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = ids[(seed >> 8) as usize % ids.len()];
            let action = match (seed >> 16) % 4 {
                0 => CartAction::Add(product(id, 100)),
                1 => CartAction::Remove(ProductId::new(id)),
                2 => CartAction::Increment(ProductId::new(id)),
                _ => CartAction::Decrement(ProductId::new(id)),
            };
            apply(&mut items, action);

            let unique: HashSet<_> = items.iter().map(|i| i.id.clone()).collect();
            assert_eq!(unique.len(), items.len());
            assert!(items.iter().all(|i| i.quantity.get() >= 1));
        }
    }

    #[test]
    fn test_subtotal() {
        let items = vec![item("a", 1000, 2), item("b", 500, 3)];
        assert_eq!(subtotal(&items), Price::from_cents(3500));
        assert_eq!(subtotal(&[]), Price::ZERO);
    }

    #[test]
    fn test_item_count() {
        let items = vec![item("a", 1000, 2), item("b", 500, 3)];
        assert_eq!(item_count(&items), 5);
    }

    #[test]
    fn test_stored_shape() {
        let json = serde_json::to_value(vec![item("a", 1000, 2)]).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"id": "a", "name": "Product a", "price": "10.00", "quantity": 2}])
        );
    }

    #[test]
    fn test_stored_zero_quantity_is_rejected() {
        let raw = r#"[{"id": 1, "name": "x", "price": 5, "quantity": 0}]"#;
        assert!(serde_json::from_str::<Vec<CartItem>>(raw).is_err());
    }

    #[test]
    fn test_stored_numeric_id_and_price() {
        let raw = r#"[{"id": 1, "name": "x", "price": 5, "quantity": 2, "description": "ignored"}]"#;
        let items: Vec<CartItem> = serde_json::from_str(raw).unwrap();
        assert_eq!(items[0].id.as_str(), "1");
        assert_eq!(items[0].line_total(), Price::from_cents(1000));
    }
}
