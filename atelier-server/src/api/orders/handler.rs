//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::order::{ApprovalStatus, ServiceRequest, ServiceType};

/// GET /api/orders/{service_type}/items
pub async fn list(
    State(state): State<ServerState>,
    Path(service_type): Path<String>,
) -> AppResult<Json<Vec<ServiceRequest>>> {
    let service_type = ServiceType::parse(&service_type)?;
    Ok(Json(state.orders.list_by_type(service_type)))
}

/// GET /api/orders/{service_type}/items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((service_type, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ServiceRequest>> {
    let service_type = ServiceType::parse(&service_type)?;
    let request = state
        .orders
        .get(id)
        .ok_or_else(|| AppError::with_message(ErrorCode::ItemNotFound, "Service request not found"))?;
    if request.service_type != service_type {
        return Err(AppError::new(ErrorCode::ServiceTypeMismatch));
    }
    Ok(Json(request))
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub admin_notes: Option<String>,
    /// Bind a booked appointment slot to the request
    #[serde(default)]
    pub slot_id: Option<Uuid>,
}

/// PUT /api/orders/{service_type}/items/{id}
///
/// A request with `final_price` runs the pricing-reconciliation path (the
/// engine may override the requested status with `price_confirmation`).
/// A status-only request must name a legal transition; `cancelled` routes
/// through the decline path so any booked slot is freed.
pub async fn update(
    State(state): State<ServerState>,
    Path((service_type, id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateItemRequest>,
) -> AppResult<Json<ServiceRequest>> {
    let service_type = ServiceType::parse(&service_type)?;

    // Writes take canonical status values only; unknown values are a
    // boundary error rather than a silent pending fallback
    let requested_status = payload
        .approval_status
        .as_deref()
        .map(|raw| {
            ApprovalStatus::from_raw(raw).ok_or_else(|| {
                AppError::validation(format!("Unknown approval status: {}", raw))
            })
        })
        .transpose()?;

    if let Some(slot_id) = payload.slot_id {
        if state.slots.get(slot_id).is_none() {
            return Err(AppError::new(ErrorCode::SlotNotFound));
        }
        state
            .orders
            .attach_slot(id, Some(service_type), slot_id)
            .map_err(AppError::from)?;
    }

    let updated = if let Some(final_price) = payload.final_price {
        state.orders.apply_price_edit(
            id,
            Some(service_type),
            final_price,
            requested_status,
            payload.admin_notes,
            &state.billing,
        )?
    } else if let Some(requested) = requested_status {
        if requested == ApprovalStatus::Cancelled {
            state.orders.decline(id, Some(service_type), &state.slots)?
        } else {
            state
                .orders
                .set_status(id, Some(service_type), requested, &state.billing)?
        }
    } else if let Some(notes) = payload.admin_notes {
        state.orders.update_notes(id, Some(service_type), notes)?
    } else if payload.slot_id.is_some() {
        state
            .orders
            .get(id)
            .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?
    } else {
        return Err(AppError::validation("No fields to update"));
    };

    Ok(Json(updated))
}

/// POST /api/orders/{service_type}/items/{id}/advance
///
/// Server-computed progression to the next approval status.
pub async fn advance(
    State(state): State<ServerState>,
    Path((service_type, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ServiceRequest>> {
    let service_type = ServiceType::parse(&service_type)?;
    let request = state
        .orders
        .advance(id, Some(service_type), &state.billing)?;
    Ok(Json(request))
}

/// POST /api/orders/{service_type}/items/{id}/decline
pub async fn decline(
    State(state): State<ServerState>,
    Path((service_type, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ServiceRequest>> {
    let service_type = ServiceType::parse(&service_type)?;
    let request = state.orders.decline(id, Some(service_type), &state.slots)?;
    Ok(Json(request))
}
