//! Appointment API Module
//!
//! Availability queries and the atomic book/cancel operations.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

/// Appointment router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/services/{service_type}/available-slots",
            get(handler::available_slots),
        )
        .route("/api/appointments/book", post(handler::book))
        .route("/api/appointments/{slot_id}", delete(handler::cancel))
}
