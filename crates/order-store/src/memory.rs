use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::Order;
use tokio::sync::RwLock;

use crate::{
    OrderId, Result, StoreError, Version,
    store::{OrderStore, PutOptions},
};

/// In-memory order store.
///
/// Records live for the lifetime of the process. Reads take the shared lock,
/// writes take the exclusive lock, and a conditional write checks the version
/// under that same exclusive lock.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns true if no order has been stored.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get(&self, order_id: OrderId) -> Result<Order> {
        let orders = self.orders.read().await;
        orders
            .get(&order_id)
            .cloned()
            .ok_or(StoreError::NotFound(order_id))
    }

    async fn put(&self, mut order: Order, options: PutOptions) -> Result<Version> {
        let order_id = order.id();
        let mut orders = self.orders.write().await;

        let current = orders
            .get(&order_id)
            .map(Order::version)
            .unwrap_or(Version::initial());

        if let Some(expected) = options.expected_version
            && current != expected
        {
            tracing::debug!(%order_id, %expected, actual = %current, "conditional write rejected");
            metrics::counter!("order_store_conflicts_total").increment(1);
            return Err(StoreError::ConcurrencyConflict {
                order_id,
                expected,
                actual: current,
            });
        }

        let version = current.next();
        order.set_version(version);
        orders.insert(order_id, order);

        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use common::{PartId, TransactionId, UserId};
    use domain::{Money, OrderStatus, PaymentMethod};

    use super::*;
    use crate::store::OrderStoreExt;

    fn new_order() -> Order {
        Order::place(UserId::new(), vec![PartId::new()], Money::from_units(10)).unwrap()
    }

    #[tokio::test]
    async fn get_missing_order_is_not_found() {
        let store = InMemoryOrderStore::new();
        let order_id = OrderId::new();

        let result = store.get(order_id).await;
        assert_eq!(result.unwrap_err(), StoreError::NotFound(order_id));
    }

    #[tokio::test]
    async fn put_then_get_returns_copy_with_version() {
        let store = InMemoryOrderStore::new();
        let order = new_order();

        let version = store.put(order.clone(), PutOptions::new()).await.unwrap();
        assert_eq!(version, Version::first());

        let stored = store.get(order.id()).await.unwrap();
        assert_eq!(stored.id(), order.id());
        assert_eq!(stored.version(), Version::first());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn mutating_a_copy_does_not_touch_the_store() {
        let store = InMemoryOrderStore::new();
        let order = new_order();
        store.insert_new(order.clone()).await.unwrap();

        let mut copy = store.get(order.id()).await.unwrap();
        copy.pay(PaymentMethod::Card, TransactionId::new()).unwrap();

        let stored = store.get(order.id()).await.unwrap();
        assert_eq!(stored.status(), OrderStatus::PendingPayment);
    }

    #[tokio::test]
    async fn unconditional_put_overwrites() {
        let store = InMemoryOrderStore::new();
        let order = new_order();
        store.put(order.clone(), PutOptions::new()).await.unwrap();

        let version = store.put(order.clone(), PutOptions::new()).await.unwrap();
        assert_eq!(version, Version::new(2));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn insert_new_rejects_existing_record() {
        let store = InMemoryOrderStore::new();
        let order = new_order();
        store.insert_new(order.clone()).await.unwrap();

        let result = store.insert_new(order.clone()).await;
        assert_eq!(
            result.unwrap_err(),
            StoreError::ConcurrencyConflict {
                order_id: order.id(),
                expected: Version::initial(),
                actual: Version::first(),
            }
        );
    }

    #[tokio::test]
    async fn stale_update_is_rejected_and_leaves_record_untouched() {
        let store = InMemoryOrderStore::new();
        let order = new_order();
        store.insert_new(order.clone()).await.unwrap();

        let mut first = store.get(order.id()).await.unwrap();
        let mut second = store.get(order.id()).await.unwrap();

        first.cancel().unwrap();
        store.update(first).await.unwrap();

        second.pay(PaymentMethod::Sbp, TransactionId::new()).unwrap();
        let result = store.update(second).await;
        assert!(matches!(
            result,
            Err(StoreError::ConcurrencyConflict { expected, actual, .. })
                if expected == Version::first() && actual == Version::new(2)
        ));

        let stored = store.get(order.id()).await.unwrap();
        assert_eq!(stored.status(), OrderStatus::Cancelled);
        assert!(stored.payment().is_none());
    }
}
