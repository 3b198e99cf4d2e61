//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{CartEntry, CartEntryInput, SubmittedOrder};

/// GET /api/cart
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CartEntry>>> {
    Ok(Json(state.cart.list()))
}

/// POST /api/cart/items
pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<CartEntryInput>,
) -> AppResult<Json<CartEntry>> {
    let entry = state.cart.add_entry(payload)?;
    Ok(Json(entry))
}

/// DELETE /api/cart/items/{id}
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.cart.remove(id)))
}

#[derive(Debug, Deserialize)]
pub struct CartSubmitRequest {
    #[serde(default)]
    pub notes: Option<String>,
    pub selected_item_ids: Vec<Uuid>,
}

/// POST /api/cart/submit
///
/// Selected entries become one order; unselected entries stay in the cart.
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<CartSubmitRequest>,
) -> AppResult<Json<SubmittedOrder>> {
    let submitted = state.cart.submit(
        &payload.selected_item_ids,
        payload.notes,
        &state.orders,
        &state.billing,
    )?;
    Ok(Json(submitted))
}
