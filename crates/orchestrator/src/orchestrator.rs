//! Order orchestrator enforcing the order lifecycle across collaborators.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::{Duration, Instant};

use common::{OrderId, PartId, TransactionId, UserId};
use domain::{DomainError, Money, Order, OrderStatus};
use order_store::{OrderStore, OrderStoreExt};

use crate::error::{GatewayError, OrderError, Result};
use crate::services::inventory::InventoryGateway;
use crate::services::payment::PaymentGateway;

/// Outcome of a successful order creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedOrder {
    pub order_id: OrderId,
    pub total_price: Money,
}

/// Coordinates order creation, payment and cancellation.
///
/// The orchestrator is the only writer of order records. Each operation runs
/// on the caller's task and performs at most one gateway call and one store
/// write. There are no retries: every failure is returned to the caller.
pub struct OrderOrchestrator<S, I, P>
where
    S: OrderStore,
    I: InventoryGateway,
    P: PaymentGateway,
{
    store: S,
    inventory: I,
    payment: P,
    gateway_timeout: Option<Duration>,
}

impl<S, I, P> OrderOrchestrator<S, I, P>
where
    S: OrderStore,
    I: InventoryGateway,
    P: PaymentGateway,
{
    /// Creates a new orchestrator with unbounded gateway calls.
    pub fn new(store: S, inventory: I, payment: P) -> Self {
        Self {
            store,
            inventory,
            payment,
            gateway_timeout: None,
        }
    }

    /// Bounds every gateway call by `timeout`. An expired call fails the
    /// operation as if the collaborator had errored.
    pub fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = Some(timeout);
        self
    }

    /// Returns a reference to the underlying order store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Prices the requested parts and records a new order awaiting payment.
    ///
    /// Creation is all-or-nothing: if any part is unknown or the inventory
    /// cannot be reached, nothing is written. A part listed twice is priced
    /// twice.
    #[tracing::instrument(skip(self, part_ids), fields(%user_id, parts = part_ids.len()))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        part_ids: Vec<PartId>,
    ) -> Result<CreatedOrder> {
        let started = Instant::now();
        let result = self.try_create_order(user_id, part_ids).await;
        observe("create_order", started, &result);
        result
    }

    async fn try_create_order(
        &self,
        user_id: UserId,
        part_ids: Vec<PartId>,
    ) -> Result<CreatedOrder> {
        if part_ids.is_empty() {
            return Err(OrderError::NoParts);
        }

        let mut seen = HashSet::with_capacity(part_ids.len());
        let distinct: Vec<PartId> = part_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let snapshots = self
            .bounded(self.inventory.list_parts(&distinct))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "inventory lookup failed");
                OrderError::InventoryUnavailable(e.to_string())
            })?;

        if let Some(bad) = snapshots.iter().find(|s| s.price.is_negative()) {
            tracing::warn!(
                part_id = %bad.id,
                price = %bad.price,
                "inventory returned negative price"
            );
            return Err(OrderError::InventoryUnavailable(format!(
                "part {} has negative price {}",
                bad.id, bad.price
            )));
        }

        let prices: HashMap<PartId, Money> = snapshots
            .into_iter()
            .map(|snapshot| (snapshot.id, snapshot.price))
            .collect();

        let missing: Vec<PartId> = distinct
            .iter()
            .copied()
            .filter(|id| !prices.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(OrderError::PartNotFound { missing });
        }

        let total_price = part_ids
            .iter()
            .filter_map(|id| prices.get(id).copied())
            .try_fold(Money::zero(), Money::checked_add)
            .ok_or(OrderError::TotalPriceOverflow)?;

        let order = Order::place(user_id, part_ids, total_price)?;
        let order_id = order.id();
        self.store.insert_new(order).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(%order_id, %total_price, "order created");

        Ok(CreatedOrder {
            order_id,
            total_price,
        })
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        Ok(self.store.get(order_id).await?)
    }

    /// Charges a pending order and marks it paid.
    ///
    /// The payment method arrives as requested by the client and is checked
    /// against the supported set before the payment service is contacted.
    /// If another request writes the order while the charge is in flight,
    /// the write is rejected with `ConcurrentModification`.
    #[tracing::instrument(skip(self))]
    pub async fn pay_order(
        &self,
        order_id: OrderId,
        payment_method: &str,
    ) -> Result<TransactionId> {
        let started = Instant::now();
        let result = self.try_pay_order(order_id, payment_method).await;
        observe("pay_order", started, &result);
        result
    }

    async fn try_pay_order(
        &self,
        order_id: OrderId,
        payment_method: &str,
    ) -> Result<TransactionId> {
        let mut order = self.store.get(order_id).await?;

        match order.status() {
            OrderStatus::PendingPayment => {}
            OrderStatus::Paid => return Err(OrderError::OrderAlreadyPaid(order_id)),
            OrderStatus::Cancelled => return Err(OrderError::OrderCancelled(order_id)),
        }

        let method = self
            .payment
            .supported_method(payment_method)
            .map_err(payment_error)?;

        let transaction_id = self
            .bounded(self.payment.pay_order(order.user_id(), order_id, method))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "payment failed");
                payment_error(e)
            })?;

        order
            .pay(method, transaction_id)
            .map_err(|e| transition_error(order_id, e))?;

        if let Err(e) = self.store.update(order).await {
            tracing::error!(
                %transaction_id,
                error = %e,
                "payment captured but order was modified concurrently"
            );
            return Err(e.into());
        }

        metrics::counter!("orders_paid_total").increment(1);
        tracing::info!(%transaction_id, %method, "order paid");

        Ok(transaction_id)
    }

    /// Cancels an order that has not been paid.
    ///
    /// Cancelling an already cancelled order succeeds without a write.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Order> {
        let started = Instant::now();
        let result = self.try_cancel_order(order_id).await;
        observe("cancel_order", started, &result);
        result
    }

    async fn try_cancel_order(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.store.get(order_id).await?;

        let changed = order.cancel().map_err(|e| transition_error(order_id, e))?;
        if changed {
            let version = self.store.update(order.clone()).await?;
            order.set_version(version);

            metrics::counter!("orders_cancelled_total").increment(1);
            tracing::info!("order cancelled");
        }

        Ok(order)
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = std::result::Result<T, GatewayError>>,
    ) -> std::result::Result<T, GatewayError> {
        match self.gateway_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| GatewayError::DeadlineExceeded(limit))?,
            None => call.await,
        }
    }
}

fn payment_error(err: GatewayError) -> OrderError {
    match err {
        GatewayError::UnsupportedPaymentMethod(method) => {
            OrderError::UnsupportedPaymentMethod(method)
        }
        other => OrderError::PaymentFailed(other.to_string()),
    }
}

fn transition_error(order_id: OrderId, err: DomainError) -> OrderError {
    match err {
        DomainError::InvalidStateTransition {
            current: OrderStatus::Paid,
            ..
        } => OrderError::OrderAlreadyPaid(order_id),
        DomainError::InvalidStateTransition {
            current: OrderStatus::Cancelled,
            ..
        } => OrderError::OrderCancelled(order_id),
        other => OrderError::Domain(other),
    }
}

fn observe<T>(operation: &'static str, started: Instant, result: &Result<T>) {
    metrics::histogram!("order_operation_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
    if let Err(e) = result {
        metrics::counter!(
            "order_operation_failures_total",
            "operation" => operation,
            "kind" => e.kind()
        )
        .increment(1);
    }
}
