use thiserror::Error;

use crate::{OrderId, Version};

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No order is stored under the identifier.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// A conditional write found the record at a different version than
    /// expected. Nothing was written.
    #[error(
        "Concurrency conflict for order {order_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        order_id: OrderId,
        expected: Version,
        actual: Version,
    },
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
