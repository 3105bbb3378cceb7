//! Toast notifications.
//!
//! There is one toast slot (`#toast`) per page. A new toast replaces the
//! current one and restarts its dismiss timer; nothing queues. HTMX handlers
//! return [`ToastTemplate`] as an out-of-band swap into that slot.
//!
//! A toast that has to survive a redirect is stored as the session flash and
//! rendered (and removed) by the next page that reads it.

use askama::Template;
use askama_web::WebTemplate;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::store::StoreError;

/// Milliseconds a toast stays on screen.
pub const TOAST_DURATION_MS: u64 = 3000;

/// Session key holding the pending flash.
const FLASH_KEY: &str = "flash";

pub const ADDED_TO_CART: &str = "Item added to cart!";
pub const ADDED_TO_WISHLIST: &str = "Item added to wishlist!";
pub const ALREADY_IN_WISHLIST: &str = "Item already in wishlist!";
pub const ORDER_PLACED: &str = "Order placed successfully!";
pub const CHECKOUT_FAILED: &str = "An error occurred during checkout. Please try again.";
pub const PRODUCT_UNAVAILABLE: &str = "This product is unavailable right now.";

/// Toast severity, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// CSS modifier class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
        }
    }
}

/// A transient message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// Dismiss delay, rendered into the slot for the client script.
    #[must_use]
    pub const fn duration_ms(&self) -> u64 {
        TOAST_DURATION_MS
    }
}

/// Toast fragment swapped into `#toast` out of band.
///
/// Full pages include the same partial, so the slot markup is identical
/// whether it arrives with the page or in an HTMX response.
#[derive(Template, WebTemplate)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate {
    pub toast: Option<Toast>,
}

impl From<Toast> for ToastTemplate {
    fn from(toast: Toast) -> Self {
        Self { toast: Some(toast) }
    }
}

/// Store `toast` as the flash, replacing any pending one.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn set_flash(session: &Session, toast: &Toast) -> Result<(), StoreError> {
    session.insert(FLASH_KEY, toast).await?;
    Ok(())
}

/// Remove and return the pending flash, if any.
///
/// A flash that cannot be read is dropped.
pub async fn take_flash(session: &Session) -> Option<Toast> {
    match session.remove::<Toast>(FLASH_KEY).await {
        Ok(toast) => toast,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable flash");
            None
        }
    }
}
