//! Appointment slot types

use crate::order::ServiceType;
use crate::types::Timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One booked (date, time, service type) appointment unit
///
/// Owned by the scheduling subsystem; service requests reference a slot by
/// id but never own it. At most one non-cancelled booking exists per
/// (date, time, service type) system-wide.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentSlot {
    pub slot_id: Uuid,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    /// Slot start in `HH:MM`
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_by: Option<String>,
    pub booked_at: Timestamp,
}

/// A bookable time offered to the customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotOption {
    /// Machine value, `HH:MM`
    pub value: String,
    /// Display value, e.g. `2:00 PM`
    pub display: String,
}
