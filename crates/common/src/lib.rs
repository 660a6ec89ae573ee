//! Shared identifier and version types for the order, inventory and payment
//! services.

mod types;
mod version;

pub use types::{OrderId, PartId, TransactionId, UserId};
pub use version::Version;
