//! Appointment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::time::parse_date;
use crate::utils::{AppError, AppResult};
use shared::models::{AppointmentSlot, SlotOption};
use shared::order::ServiceType;

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: Option<String>,
}

/// GET /api/services/{service_type}/available-slots?date=YYYY-MM-DD
pub async fn available_slots(
    State(state): State<ServerState>,
    Path(service_type): Path<String>,
    Query(query): Query<AvailableSlotsQuery>,
) -> AppResult<Json<Vec<SlotOption>>> {
    let service_type = ServiceType::parse(&service_type)?;
    let date = query
        .date
        .as_deref()
        .ok_or_else(|| AppError::validation("date query parameter is required"))?;
    let date = parse_date(date)?;

    let slots = state
        .slots
        .available_slots(service_type, date, chrono::Local::now().naive_local())?;
    Ok(Json(slots))
}

#[derive(Debug, Deserialize)]
pub struct BookSlotRequest {
    pub service_type: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub booked_by: Option<String>,
}

/// POST /api/appointments/book
pub async fn book(
    State(state): State<ServerState>,
    Json(payload): Json<BookSlotRequest>,
) -> AppResult<Json<AppointmentSlot>> {
    let service_type = ServiceType::parse(&payload.service_type)?;
    let date = parse_date(&payload.date)?;

    let slot = state.slots.book_slot(
        service_type,
        date,
        &payload.time,
        payload.booked_by,
        chrono::Local::now().naive_local(),
    )?;
    Ok(Json(slot))
}

/// DELETE /api/appointments/{slot_id}
///
/// Freeing the slot behind a cancelled request is expected; the response
/// reports whether a booking was actually released.
pub async fn cancel(
    State(state): State<ServerState>,
    Path(slot_id): Path<Uuid>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.slots.cancel_slot(slot_id)))
}
