//! Order API Module
//!
//! Staff-facing access to submitted service requests. All mutations go
//! through ServiceOrderManager; the path service type must match the
//! stored request.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders/{service_type}/items", get(handler::list))
        .route(
            "/api/orders/{service_type}/items/{id}",
            get(handler::get_by_id).put(handler::update),
        )
        .route(
            "/api/orders/{service_type}/items/{id}/advance",
            post(handler::advance),
        )
        .route(
            "/api/orders/{service_type}/items/{id}/decline",
            post(handler::decline),
        )
}
