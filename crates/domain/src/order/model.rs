//! The order record.

use chrono::{DateTime, Utc};
use common::{OrderId, PartId, TransactionId, UserId, Version};
use serde::{Deserialize, Serialize};

use super::{Money, OrderStatus, PaymentMethod};
use crate::error::DomainError;

/// Payment outcome recorded on a paid order.
///
/// Method and transaction are kept together so an order can never carry one
/// without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub transaction_id: TransactionId,
}

/// A purchase tracked from creation to payment or cancellation.
///
/// Identity, purchaser, parts and total price are fixed at creation. Only the
/// status, the payment details, the update timestamp and the store-managed
/// version ever change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    part_ids: Vec<PartId>,
    total_price: Money,
    status: OrderStatus,
    payment: Option<PaymentDetails>,

    /// Version of the stored record this copy was read from.
    #[serde(default)]
    version: Version,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Places a new order awaiting payment under a fresh identifier.
    pub fn place(
        user_id: UserId,
        part_ids: Vec<PartId>,
        total_price: Money,
    ) -> Result<Self, DomainError> {
        if part_ids.is_empty() {
            return Err(DomainError::NoParts);
        }
        if total_price.is_negative() {
            return Err(DomainError::NegativeTotal(total_price));
        }

        let now = Utc::now();
        Ok(Self {
            id: OrderId::new(),
            user_id,
            part_ids,
            total_price,
            status: OrderStatus::PendingPayment,
            payment: None,
            version: Version::initial(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn part_ids(&self) -> &[PartId] {
        &self.part_ids
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment(&self) -> Option<&PaymentDetails> {
        self.payment.as_ref()
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment.map(|p| p.method)
    }

    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.payment.map(|p| p.transaction_id)
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Records the version returned by a store write, so the copy can be
    /// written again conditionally.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the order as paid with the given method and transaction.
    pub fn pay(
        &mut self,
        method: PaymentMethod,
        transaction_id: TransactionId,
    ) -> Result<(), DomainError> {
        if !self.status.can_pay() {
            return Err(DomainError::InvalidStateTransition {
                current: self.status,
                action: "pay",
            });
        }

        self.status = OrderStatus::Paid;
        self.payment = Some(PaymentDetails {
            method,
            transaction_id,
        });
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancels the order.
    ///
    /// Returns `Ok(false)` when the order was already cancelled and nothing
    /// changed.
    pub fn cancel(&mut self) -> Result<bool, DomainError> {
        if !self.status.can_cancel() {
            return Err(DomainError::InvalidStateTransition {
                current: self.status,
                action: "cancel",
            });
        }
        if self.status == OrderStatus::Cancelled {
            return Ok(false);
        }

        self.status = OrderStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_order() -> Order {
        Order::place(
            UserId::new(),
            vec![PartId::new(), PartId::new()],
            Money::from_units(625_000),
        )
        .unwrap()
    }

    #[test]
    fn test_place_starts_pending_without_payment() {
        let order = pending_order();
        assert_eq!(order.status(), OrderStatus::PendingPayment);
        assert_eq!(order.part_ids().len(), 2);
        assert_eq!(order.total_price(), Money::from_units(625_000));
        assert!(order.payment().is_none());
        assert_eq!(order.version(), Version::initial());
        assert_eq!(order.created_at(), order.updated_at());
    }

    #[test]
    fn test_place_requires_parts() {
        let result = Order::place(UserId::new(), vec![], Money::zero());
        assert_eq!(result.unwrap_err(), DomainError::NoParts);
    }

    #[test]
    fn test_place_rejects_negative_total() {
        let total = Money::from_cents(-500);
        let result = Order::place(UserId::new(), vec![PartId::new()], total);
        assert_eq!(result.unwrap_err(), DomainError::NegativeTotal(total));
    }

    #[test]
    fn test_place_assigns_unique_ids() {
        assert_ne!(pending_order().id(), pending_order().id());
    }

    #[test]
    fn test_pay_records_method_and_transaction() {
        let mut order = pending_order();
        let tx = TransactionId::new();
        order.pay(PaymentMethod::Card, tx).unwrap();

        assert_eq!(order.status(), OrderStatus::Paid);
        assert_eq!(order.payment_method(), Some(PaymentMethod::Card));
        assert_eq!(order.transaction_id(), Some(tx));
    }

    #[test]
    fn test_pay_twice_is_rejected() {
        let mut order = pending_order();
        order.pay(PaymentMethod::Sbp, TransactionId::new()).unwrap();
        let first = order.clone();

        let err = order
            .pay(PaymentMethod::Card, TransactionId::new())
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStateTransition {
                current: OrderStatus::Paid,
                action: "pay",
            }
        );
        assert_eq!(order, first);
    }

    #[test]
    fn test_pay_cancelled_is_rejected() {
        let mut order = pending_order();
        order.cancel().unwrap();
        assert!(order.pay(PaymentMethod::Card, TransactionId::new()).is_err());
        assert!(order.payment().is_none());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut order = pending_order();
        assert_eq!(order.cancel(), Ok(true));
        assert_eq!(order.cancel(), Ok(false));
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_paid_is_rejected() {
        let mut order = pending_order();
        order
            .pay(PaymentMethod::CreditCard, TransactionId::new())
            .unwrap();

        let err = order.cancel().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidStateTransition {
                current: OrderStatus::Paid,
                ..
            }
        ));
        assert_eq!(order.status(), OrderStatus::Paid);
    }
}
