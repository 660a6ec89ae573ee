//! Domain error types.

use thiserror::Error;

use crate::order::{Money, OrderStatus};

/// Errors raised when an order rule is violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The order is not in a state that allows the requested action.
    #[error("Invalid state transition: cannot {action} from {current} state")]
    InvalidStateTransition {
        current: OrderStatus,
        action: &'static str,
    },

    /// An order must reference at least one part.
    #[error("Order has no parts")]
    NoParts,

    /// The total price of an order cannot be negative.
    #[error("Order total {0} is negative")]
    NegativeTotal(Money),
}
