//! Order placement.
//!
//! One submission walks the checkout phases: the form is validated while
//! `Idle`, the order is built and emitted while `Submitting`, and the cart
//! is cleared on the way to `Done`. Any failure after validation drops back
//! to `Idle` with the cart untouched.

use comforty_core::{CheckoutPhase, FieldErrors, Order, ShippingForm};
use thiserror::Error;
use tracing::instrument;

use super::cart::CartStore;
use super::orders::{OrderSink, OrderSinkError};
use crate::store::{LocalStore, StoreError};

/// Errors while submitting a valid order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The order sink failed.
    #[error(transparent)]
    Sink(#[from] OrderSinkError),

    /// The cart could not be cleared.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happened to one checkout submission.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// The form failed validation. Carries the messages and what was typed.
    Invalid(FieldErrors, ShippingForm),
    /// The order was emitted and the cart cleared.
    Placed(Order),
    /// Submission failed after validation.
    Failed(CheckoutError),
}

impl CheckoutOutcome {
    /// Phase the checkout view ends up in.
    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        match self {
            Self::Placed(_) => CheckoutPhase::Done,
            Self::Invalid(..) | Self::Failed(_) => CheckoutPhase::Idle,
        }
    }
}

/// Validate `form` and place an order from the cart snapshot.
///
/// The snapshot is whatever `cart` held when it was loaded; the order total
/// is computed from that same snapshot.
#[instrument(skip_all, fields(lines = cart.items().len()))]
pub async fn submit_order<S: LocalStore>(
    cart: &mut CartStore<S>,
    sink: &dyn OrderSink,
    form: ShippingForm,
) -> CheckoutOutcome {
    let customer = match form.clone().validate() {
        Ok(customer) => customer,
        Err(errors) => {
            tracing::debug!(failing = errors.len(), "Checkout form invalid");
            return CheckoutOutcome::Invalid(errors, form);
        }
    };

    let phase = CheckoutPhase::Submitting;
    tracing::debug!(?phase, "Checkout form valid");

    let order = Order::new(customer, cart.items().to_vec(), cart.subtotal());

    if let Err(e) = sink.emit(&order) {
        tracing::error!(error = %e, ?phase, "Order sink failed");
        return CheckoutOutcome::Failed(e.into());
    }

    if let Err(e) = cart.clear().await {
        tracing::error!(error = %e, order_id = %order.id, "Failed to clear cart after order");
        return CheckoutOutcome::Failed(e.into());
    }

    tracing::debug!(order_id = %order.id, phase = ?CheckoutPhase::Done, "Cart cleared");
    CheckoutOutcome::Placed(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use comforty_core::{Price, ShippingField};

    use super::*;
    use crate::services::orders::testing::{CapturingSink, FailingSink};
    use crate::store::StoreKey;
    use crate::store::testing::RecordingStore;

    const CART: &str = r#"[{"id":"a","name":"A","price":"10","quantity":2},{"id":"b","name":"B","price":"5","quantity":3}]"#;

    fn valid_form() -> ShippingForm {
        ShippingForm {
            name: "Al".to_string(),
            email: "al@example.com".to_string(),
            phone: "5551234567".to_string(),
            address: "1 Main St".to_string(),
            city: "LA".to_string(),
            state: "CA".to_string(),
            zip_code: "90001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_submission_emits_once_and_clears_cart() {
        let store = RecordingStore::with(StoreKey::Cart, CART);
        let mut cart = CartStore::load(store.clone()).await;
        let sink = CapturingSink::default();

        let outcome = submit_order(&mut cart, &sink, valid_form()).await;

        assert_eq!(outcome.phase(), CheckoutPhase::Done);
        let orders = sink.orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total_amount, Price::from_cents(3500));
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].customer.name, "Al");
        assert_eq!(store.raw(StoreKey::Cart), None);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_phone_emits_nothing() {
        let store = RecordingStore::with(StoreKey::Cart, CART);
        let mut cart = CartStore::load(store.clone()).await;
        let sink = CapturingSink::default();
        let form = ShippingForm {
            phone: "12345".to_string(),
            ..valid_form()
        };

        let outcome = submit_order(&mut cart, &sink, form).await;

        let CheckoutOutcome::Invalid(errors, entered) = outcome else {
            panic!("expected invalid outcome");
        };
        assert_eq!(
            errors.get(ShippingField::Phone),
            Some("Phone number must be at least 10 digits")
        );
        assert_eq!(entered.phone, "12345");
        assert!(sink.orders().is_empty());
        assert_eq!(store.raw(StoreKey::Cart).as_deref(), Some(CART));
    }

    #[tokio::test]
    async fn test_empty_cart_still_places_order() {
        let store = RecordingStore::default();
        let mut cart = CartStore::load(store).await;
        let sink = CapturingSink::default();

        let outcome = submit_order(&mut cart, &sink, valid_form()).await;

        let CheckoutOutcome::Placed(order) = outcome else {
            panic!("expected placed outcome");
        };
        assert!(order.items.is_empty());
        assert_eq!(order.total_amount, Price::ZERO);
    }

    #[tokio::test]
    async fn test_failing_sink_keeps_cart() {
        let store = RecordingStore::with(StoreKey::Cart, CART);
        let mut cart = CartStore::load(store.clone()).await;

        let outcome = submit_order(&mut cart, &FailingSink, valid_form()).await;

        assert!(matches!(
            outcome,
            CheckoutOutcome::Failed(CheckoutError::Sink(_))
        ));
        assert_eq!(outcome.phase(), CheckoutPhase::Idle);
        assert_eq!(store.raw(StoreKey::Cart).as_deref(), Some(CART));
        assert_eq!(cart.items().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_failure_reports_store_error() {
        let store = RecordingStore::failing();
        let mut cart = CartStore::load(store).await;
        let sink = CapturingSink::default();

        let outcome = submit_order(&mut cart, &sink, valid_form()).await;

        assert!(matches!(
            outcome,
            CheckoutOutcome::Failed(CheckoutError::Store(_))
        ));
    }
}
