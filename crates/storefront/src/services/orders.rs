//! Order sinks.
//!
//! Checkout hands each placed order to an [`OrderSink`]. The storefront has
//! no order backend; the default sink writes the order payload to the log.

use comforty_core::Order;
use thiserror::Error;

/// Errors from emitting an order.
#[derive(Debug, Error)]
pub enum OrderSinkError {
    /// The order could not be serialized.
    #[error("failed to serialize order: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The sink refused the order.
    #[error("order sink rejected order: {0}")]
    Rejected(String),
}

/// Destination for placed orders.
pub trait OrderSink: Send + Sync {
    /// Emit `order` exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the order could not be delivered.
    fn emit(&self, order: &Order) -> Result<(), OrderSinkError>;
}

/// Writes each order as a JSON payload at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOrderSink;

impl OrderSink for LogOrderSink {
    fn emit(&self, order: &Order) -> Result<(), OrderSinkError> {
        let payload = serde_json::to_string(order)?;
        tracing::info!(
            order_id = %order.id,
            total = %order.total_amount,
            lines = order.items.len(),
            payload = %payload,
            "Order placed"
        );
        Ok(())
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use comforty_core::ShippingForm;

    use super::*;

    #[test]
    fn test_log_sink_accepts_order() {
        let customer = ShippingForm {
            name: "Al".to_string(),
            email: "al@example.com".to_string(),
            phone: "5551234567".to_string(),
            address: "1 Main St".to_string(),
            city: "LA".to_string(),
            state: "CA".to_string(),
            zip_code: "90001".to_string(),
        }
        .validate()
        .unwrap();
        let order = Order::from_items(customer, Vec::new());
        assert!(LogOrderSink.emit(&order).is_ok());
    }
}
