//! HTTP API for the order service.
//!
//! Exposes order creation, lookup, payment and cancellation over REST, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::InMemoryOrderStore;
use orchestrator::{InMemoryInventoryService, InMemoryPaymentService, OrderOrchestrator};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    let orders = Router::new()
        .route("/orders", post(routes::orders::create))
        .route("/orders/{order_uuid}", get(routes::orders::get))
        .route("/orders/{order_uuid}/pay", post(routes::orders::pay))
        .route("/orders/{order_uuid}/cancel", post(routes::orders::cancel));

    Router::new()
        .route("/health", get(routes::health::check))
        .nest("/api/v1", orders)
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over an empty order store, the seeded inventory
/// catalog and the in-memory payment service.
pub fn create_default_state(gateway_timeout: Option<Duration>) -> Arc<AppState> {
    let inventory = InMemoryInventoryService::with_default_catalog();
    let payment = InMemoryPaymentService::new();

    let mut orchestrator =
        OrderOrchestrator::new(InMemoryOrderStore::new(), inventory.clone(), payment.clone());
    if let Some(timeout) = gateway_timeout {
        orchestrator = orchestrator.with_gateway_timeout(timeout);
    }

    Arc::new(AppState {
        orchestrator,
        inventory,
        payment,
    })
}
