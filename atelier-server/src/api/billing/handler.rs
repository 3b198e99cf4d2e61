//! Billing API Handlers

use std::convert::Infallible;

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use serde::Deserialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{BillingRecord, PaymentStatus};

/// GET /api/billing/records
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<BillingRecord>>> {
    Ok(Json(state.billing.list()))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Explicit status; absent means "apply the next payment action"
    #[serde(default)]
    pub status: Option<String>,
}

/// PUT /api/billing/records/{id}/status
///
/// With a concrete status this is the manual admin override; without one
/// the record toggles within its service type's payment pair.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<BillingRecord>> {
    let record = match payload.status.as_deref() {
        Some(raw) => {
            let status = PaymentStatus::from_raw(raw).ok_or_else(|| {
                AppError::validation(format!("Unknown payment status: {}", raw))
            })?;
            state.billing.set_status(id, status)?
        }
        None => state.billing.advance_status(id)?,
    };
    Ok(Json(record))
}

/// GET /api/billing/events
///
/// Server-sent change feed; the admin view subscribes here instead of
/// polling the record list.
pub async fn events(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.billing.subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(billing_event) => {
                    match Event::default()
                        .event(billing_event.action.as_str())
                        .json_data(&billing_event.record)
                    {
                        Ok(event) => return Some((Ok(event), rx)),
                        // Serialization failure on one event: skip it
                        Err(_) => continue,
                    }
                }
                // Slow consumer: resume from the current position
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
