//! Billing API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Billing router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/billing/records", get(handler::list))
        .route(
            "/api/billing/records/{id}/status",
            put(handler::update_status),
        )
        .route("/api/billing/events", get(handler::events))
}
