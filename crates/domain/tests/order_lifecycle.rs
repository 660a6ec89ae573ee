//! Lifecycle and serialization tests for the order record.

use common::{PartId, TransactionId, UserId, Version};
use domain::{DomainError, Money, Order, OrderStatus, PaymentMethod};

fn place() -> Order {
    Order::place(
        UserId::new(),
        vec![PartId::new(), PartId::new()],
        Money::from_units(625_000),
    )
    .unwrap()
}

#[test]
fn paid_order_serializes_wire_names() {
    let mut order = place();
    let tx = TransactionId::new();
    order.pay(PaymentMethod::CreditCard, tx).unwrap();

    let json = serde_json::to_value(&order).unwrap();

    assert_eq!(json["id"], order.id().to_string());
    assert_eq!(json["status"], "PAID");
    assert_eq!(json["payment"]["method"], "CREDIT_CARD");
    assert_eq!(json["payment"]["transaction_id"], tx.to_string());
    assert_eq!(json["total_price"]["cents"], 62_500_000);
}

#[test]
fn stored_json_without_version_reads_as_never_written() {
    let order = place();
    let mut json = serde_json::to_value(&order).unwrap();
    json.as_object_mut().unwrap().remove("version");

    let restored: Order = serde_json::from_value(json).unwrap();

    assert_eq!(restored.version(), Version::initial());
    assert_eq!(restored.id(), order.id());
    assert_eq!(restored.status(), OrderStatus::PendingPayment);
}

#[test]
fn terminal_orders_reject_every_further_transition() {
    let mut paid = place();
    paid.pay(PaymentMethod::Sbp, TransactionId::new()).unwrap();
    assert!(paid.status().is_terminal());
    assert!(matches!(
        paid.cancel(),
        Err(DomainError::InvalidStateTransition {
            current: OrderStatus::Paid,
            ..
        })
    ));
    assert!(paid.pay(PaymentMethod::Card, TransactionId::new()).is_err());

    let mut cancelled = place();
    assert!(cancelled.cancel().unwrap());
    assert!(cancelled.status().is_terminal());
    assert!(!cancelled.cancel().unwrap());
    assert!(matches!(
        cancelled.pay(PaymentMethod::InvestorMoney, TransactionId::new()),
        Err(DomainError::InvalidStateTransition {
            current: OrderStatus::Cancelled,
            ..
        })
    ));
    assert!(cancelled.payment().is_none());
}

#[test]
fn immutable_fields_survive_payment() {
    let mut order = place();
    let (id, user, parts, total, created) = (
        order.id(),
        order.user_id(),
        order.part_ids().to_vec(),
        order.total_price(),
        order.created_at(),
    );

    order.pay(PaymentMethod::Card, TransactionId::new()).unwrap();

    assert_eq!(order.id(), id);
    assert_eq!(order.user_id(), user);
    assert_eq!(order.part_ids(), parts.as_slice());
    assert_eq!(order.total_price(), total);
    assert_eq!(order.created_at(), created);
    assert!(order.updated_at() >= created);
}
