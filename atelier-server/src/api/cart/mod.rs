//! Cart API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

/// Cart router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cart", get(handler::list))
        .route("/api/cart/items", post(handler::add))
        .route("/api/cart/items/{id}", delete(handler::remove))
        .route("/api/cart/submit", post(handler::submit))
}
