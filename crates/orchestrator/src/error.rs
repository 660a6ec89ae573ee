//! Orchestrator error types.

use std::time::Duration;

use common::{OrderId, PartId, Version};
use domain::DomainError;
use order_store::StoreError;
use thiserror::Error;

/// Errors reported by the inventory and payment collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The remote service could not be reached or failed.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The payment method is outside the supported set.
    #[error("Payment method {0} is not supported")]
    UnsupportedPaymentMethod(String),

    /// The payment service refused the charge.
    #[error("Payment declined: {0}")]
    Declined(String),

    /// The call did not complete within the caller's deadline.
    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// No order exists with the identifier.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order is already paid.
    #[error("Order {0} is already paid")]
    OrderAlreadyPaid(OrderId),

    /// The order was cancelled and can no longer be paid.
    #[error("Order {0} is cancelled")]
    OrderCancelled(OrderId),

    /// The order request lists no parts.
    #[error("Order must contain at least one part")]
    NoParts,

    /// Some requested parts do not exist in the catalog.
    #[error("Parts not found: {}", format_ids(.missing))]
    PartNotFound { missing: Vec<PartId> },

    /// The summed part prices do not fit in a money amount.
    #[error("Order total price is too large")]
    TotalPriceOverflow,

    /// The inventory service failed, timed out or returned invalid prices.
    #[error("Inventory unavailable: {0}")]
    InventoryUnavailable(String),

    /// The payment method is outside the supported set.
    #[error("Payment method {0} is not supported")]
    UnsupportedPaymentMethod(String),

    /// The payment service failed, declined or timed out.
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// Another request wrote the order between our read and our write.
    #[error(
        "Order {order_id} was modified concurrently (expected version {expected}, found {actual})"
    )]
    ConcurrentModification {
        order_id: OrderId,
        expected: Version,
        actual: Version,
    },

    /// Domain rule violation.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl OrderError {
    /// Short label identifying the error kind, used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::OrderNotFound(_) => "order_not_found",
            OrderError::OrderAlreadyPaid(_) => "order_already_paid",
            OrderError::OrderCancelled(_) => "order_cancelled",
            OrderError::NoParts => "no_parts",
            OrderError::PartNotFound { .. } => "part_not_found",
            OrderError::TotalPriceOverflow => "total_price_overflow",
            OrderError::InventoryUnavailable(_) => "inventory_unavailable",
            OrderError::UnsupportedPaymentMethod(_) => "unsupported_payment_method",
            OrderError::PaymentFailed(_) => "payment_failed",
            OrderError::ConcurrentModification { .. } => "concurrent_modification",
            OrderError::Domain(_) => "domain",
        }
    }
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(order_id) => OrderError::OrderNotFound(order_id),
            StoreError::ConcurrencyConflict {
                order_id,
                expected,
                actual,
            } => OrderError::ConcurrentModification {
                order_id,
                expected,
                actual,
            },
        }
    }
}

fn format_ids(ids: &[PartId]) -> String {
    ids.iter()
        .map(PartId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrderError>;
