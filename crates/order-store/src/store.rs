use async_trait::async_trait;
use domain::Order;

use crate::{OrderId, Result, Version};

/// Options for writing an order to the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PutOptions {
    /// Expected stored version for optimistic concurrency control.
    /// If None, the write unconditionally inserts or overwrites.
    pub expected_version: Option<Version>,
}

impl PutOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the record to be at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }

    /// Creates options expecting no record to exist yet.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(Version::initial()),
        }
    }
}

/// Storage of order records addressable by order identifier.
///
/// The store holds no business rules. `get` and `put` are linearizable with
/// respect to each other, and a `put` with an expected version checks and
/// writes atomically, which is what makes read-modify-write safe for callers.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Returns a copy of the stored order, stamped with its current version.
    async fn get(&self, order_id: OrderId) -> Result<Order>;

    /// Inserts or fully overwrites the record at `order.id()`.
    ///
    /// If `options.expected_version` is set, the write fails with
    /// `ConcurrencyConflict` unless the stored version matches.
    ///
    /// Returns the new version of the record.
    async fn put(&self, order: Order, options: PutOptions) -> Result<Version>;
}

/// Extension trait providing convenience methods for order stores.
#[async_trait]
pub trait OrderStoreExt: OrderStore {
    /// Writes an order that must not exist yet.
    async fn insert_new(&self, order: Order) -> Result<Version> {
        self.put(order, PutOptions::expect_new()).await
    }

    /// Writes an order back only if nobody wrote it since it was read.
    async fn update(&self, order: Order) -> Result<Version> {
        let expected = order.version();
        self.put(order, PutOptions::expect_version(expected)).await
    }
}

// Blanket implementation for all OrderStore implementations
impl<T: OrderStore + ?Sized> OrderStoreExt for T {}
