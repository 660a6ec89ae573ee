//! Payment service contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use common::{OrderId, TransactionId, UserId};
use domain::PaymentMethod;

use crate::error::GatewayError;

/// Trait for payment processing operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Resolves a requested payment method against the supported set.
    ///
    /// Runs locally: an unsupported method never reaches the remote service.
    fn supported_method(&self, requested: &str) -> Result<PaymentMethod, GatewayError> {
        requested
            .parse()
            .map_err(|_| GatewayError::UnsupportedPaymentMethod(requested.to_string()))
    }

    /// Charges the user for an order and returns the allocated transaction.
    async fn pay_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
        method: PaymentMethod,
    ) -> Result<TransactionId, GatewayError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: HashMap<TransactionId, (UserId, OrderId, PaymentMethod)>,
    fail_on_pay: bool,
    latency: Option<Duration>,
    calls: usize,
}

/// In-memory payment service that allocates a transaction per charge.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentService {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentService {
    /// Creates a new in-memory payment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail subsequent charges.
    pub fn set_fail_on_pay(&self, fail: bool) {
        self.state_mut().fail_on_pay = fail;
    }

    /// Delays every charge, simulating a slow remote.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.state_mut().latency = latency;
    }

    /// Returns the number of recorded payments.
    pub fn payment_count(&self) -> usize {
        self.state().payments.len()
    }

    /// Returns true if a payment exists with the given transaction.
    pub fn has_payment(&self, transaction_id: TransactionId) -> bool {
        self.state().payments.contains_key(&transaction_id)
    }

    /// Returns how many charges reached the service.
    pub fn call_count(&self) -> usize {
        self.state().calls
    }

    fn state(&self) -> RwLockReadGuard<'_, InMemoryPaymentState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, InMemoryPaymentState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentService {
    async fn pay_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
        method: PaymentMethod,
    ) -> Result<TransactionId, GatewayError> {
        let latency = {
            let mut state = self.state_mut();
            state.calls += 1;
            state.latency
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.state_mut();
        if state.fail_on_pay {
            return Err(GatewayError::Declined("payment processor error".to_string()));
        }

        let transaction_id = TransactionId::new();
        state
            .payments
            .insert(transaction_id, (user_id, order_id, method));

        Ok(transaction_id)
    }
}
