//! Order orchestration core.
//!
//! This crate turns purchase requests into an order lifecycle by composing
//! the order store with two remote collaborators:
//! 1. Inventory, which prices the requested parts at creation
//! 2. Payment, which charges the order and returns a transaction
//!
//! Every write the orchestrator makes after a read is conditioned on the
//! version it read, so concurrent pay/cancel calls on one order cannot both
//! succeed.

pub mod error;
pub mod orchestrator;
pub mod services;

pub use error::{GatewayError, OrderError};
pub use orchestrator::{CreatedOrder, OrderOrchestrator};
pub use services::{
    InMemoryInventoryService, InMemoryPaymentService, InventoryGateway, PaymentGateway,
};
