//! Comforty Core - Shared domain types and rules.
//!
//! This crate provides the types and pure state transitions used by the
//! Comforty components:
//! - `storefront` - Public-facing e-commerce site
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types, validation, and pure functions - no
//! I/O, no sessions, no HTTP clients. Persistence of the cart and wishlist
//! lives in the storefront; the rules for how they change live here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and emails
//! - [`cart`] - Cart items and the add/remove/increment/decrement reducer
//! - [`wishlist`] - Wishlist items and idempotent add/remove
//! - [`checkout`] - Shipping form validation and the order payload

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;
pub mod wishlist;

pub use cart::{CartAction, CartItem, CartProduct};
pub use checkout::{CheckoutPhase, FieldErrors, Order, ShippingDetails, ShippingField, ShippingForm};
pub use types::*;
pub use wishlist::{WishlistAdd, WishlistItem};
