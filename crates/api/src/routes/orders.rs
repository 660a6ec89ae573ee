//! Order endpoints: create, get, pay and cancel.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{OrderId, PartId, TransactionId, UserId};
use domain::{Order, OrderStatus, PaymentMethod};
use order_store::InMemoryOrderStore;
use orchestrator::{InMemoryInventoryService, InMemoryPaymentService, OrderOrchestrator};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Orchestrator wired to the in-memory store and collaborators.
pub type Orchestrator =
    OrderOrchestrator<InMemoryOrderStore, InMemoryInventoryService, InMemoryPaymentService>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub inventory: InMemoryInventoryService,
    pub payment: InMemoryPaymentService,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub user_uuid: String,
    pub part_uuids: Vec<String>,
}

#[derive(Deserialize)]
pub struct PayOrderRequest {
    pub payment_method: String,
}

// -- Response types --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_uuid: OrderId,
    pub total_price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayOrderResponse {
    pub transaction_uuid: TransactionId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_uuid: OrderId,
    pub user_uuid: UserId,
    pub part_uuids: Vec<PartId>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_uuid: Option<TransactionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            order_uuid: order.id(),
            user_uuid: order.user_id(),
            part_uuids: order.part_ids().to_vec(),
            total_price: order.total_price().as_f64(),
            status: order.status(),
            payment_method: order.payment_method(),
            transaction_uuid: order.transaction_id(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

// -- Handlers --

/// POST /api/v1/orders: price the parts and create a pending order.
#[tracing::instrument(skip(state, req), fields(parts = req.part_uuids.len()))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let user_id: UserId = parse_id(&req.user_uuid, "user_uuid")?;
    let part_ids = req
        .part_uuids
        .iter()
        .map(|id| parse_id::<PartId>(id, "part_uuids"))
        .collect::<Result<Vec<_>, _>>()?;

    let created = state.orchestrator.create_order(user_id, part_ids).await?;

    Ok(Json(CreateOrderResponse {
        order_uuid: created.order_id,
        total_price: created.total_price.as_f64(),
    }))
}

/// GET /api/v1/orders/{order_uuid}: load an order.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_id(&id, "order_uuid")?;
    let order = state.orchestrator.get_order(order_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /api/v1/orders/{order_uuid}/pay: charge a pending order.
#[tracing::instrument(skip(state, req), fields(payment_method = %req.payment_method))]
pub async fn pay(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PayOrderRequest>,
) -> Result<Json<PayOrderResponse>, ApiError> {
    let order_id = parse_id(&id, "order_uuid")?;
    let transaction_id = state
        .orchestrator
        .pay_order(order_id, &req.payment_method)
        .await?;

    Ok(Json(PayOrderResponse {
        transaction_uuid: transaction_id,
    }))
}

/// POST /api/v1/orders/{order_uuid}/cancel: cancel an unpaid order.
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let order_id = parse_id(&id, "order_uuid")?;
    state.orchestrator.cancel_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id<T: std::str::FromStr<Err = uuid::Error>>(
    raw: &str,
    field: &str,
) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid {field} '{raw}': {e}")))
}
