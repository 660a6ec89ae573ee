//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orchestrator::OrderError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request from the client.
    BadRequest(String),
    /// Order operation failure.
    Order(OrderError),
}

impl ApiError {
    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Order(err) => order_error_status(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Order(err) => {
                if status.is_server_error() {
                    tracing::error!(error = %err, "order operation failed");
                }
                err.to_string()
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn order_error_status(err: &OrderError) -> StatusCode {
    match err {
        OrderError::NoParts
        | OrderError::PartNotFound { .. }
        | OrderError::TotalPriceOverflow
        | OrderError::UnsupportedPaymentMethod(_) => StatusCode::BAD_REQUEST,
        OrderError::OrderNotFound(_) => StatusCode::NOT_FOUND,
        OrderError::OrderAlreadyPaid(_)
        | OrderError::OrderCancelled(_)
        | OrderError::ConcurrentModification { .. } => StatusCode::CONFLICT,
        OrderError::InventoryUnavailable(_)
        | OrderError::PaymentFailed(_)
        | OrderError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}
