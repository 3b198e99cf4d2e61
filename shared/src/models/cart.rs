//! Cart types
//!
//! A cart entry is a pending service request that has not yet been
//! submitted as part of a committed order. Rental entries may bundle
//! several garments sharing one date range and one aggregate price.

use crate::order::ServiceDetails;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One not-yet-submitted request sitting in a customer's cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    pub entry_id: Uuid,
    pub customer_name: String,
    pub details: ServiceDetails,
    /// Estimate computed at add time, absent when none exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
    /// Rental bundles are submitted as a single request, never exploded
    pub is_bundle: bool,
    pub created_at: Timestamp,
}

/// Input for adding an entry to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEntryInput {
    pub customer_name: String,
    pub details: ServiceDetails,
}

/// Result of a successful cart submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmittedOrder {
    pub order_id: Uuid,
    pub item_ids: Vec<Uuid>,
}
