//! Domain layer for the order services.
//!
//! This crate provides the core domain types:
//! - `Order` record with its payment state machine
//! - Value objects (`Money`, `PaymentMethod`)
//! - Catalog records (`Part`, `PartSnapshot`, `PartsFilter`) owned by the
//!   inventory service

pub mod catalog;
pub mod error;
pub mod order;

pub use catalog::{
    Category, Dimensions, Manufacturer, MetadataValue, Part, PartSnapshot, PartsFilter,
};
pub use error::DomainError;
pub use order::{
    Money, Order, OrderStatus, PaymentDetails, PaymentMethod, UnsupportedPaymentMethod,
};
