//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Write-through cart container (the only writer of the `cart` key)
//! - `wishlist` - Lazily seeded wishlist provider
//! - `checkout` - Form validation, order emission, cart clearing
//! - `orders` - Destinations for placed orders

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod wishlist;

pub use cart::{CartStore, SessionCart};
pub use checkout::{CheckoutError, CheckoutOutcome, submit_order};
pub use orders::{LogOrderSink, OrderSink, OrderSinkError};
pub use wishlist::{SessionWishlist, WishlistProvider};
