//! Collaborator contracts and in-memory implementations.

pub mod inventory;
pub mod payment;

pub use inventory::{
    HYPERDRIVE_ENGINE_ID, InMemoryInventoryService, InventoryGateway, QUANTUM_SHIELD_ID,
    default_catalog,
};
pub use payment::{InMemoryPaymentService, PaymentGateway};
