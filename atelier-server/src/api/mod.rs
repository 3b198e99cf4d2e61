//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`slots`] - availability queries and appointment booking
//! - [`orders`] - service request lifecycle (staff)
//! - [`cart`] - pre-submission cart and order submission
//! - [`billing`] - payment records and the change feed

pub mod billing;
pub mod cart;
pub mod health;
pub mod orders;
pub mod slots;

use crate::core::ServerState;
use axum::Router;

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(slots::router())
        .merge(orders::router())
        .merge(cart::router())
        .merge(billing::router())
}
