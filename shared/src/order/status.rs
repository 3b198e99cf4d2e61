//! Approval status table
//!
//! Static definitions of the approval workflow: valid statuses, per-service
//! transition order, and display mappings. Pure data, no behavior beyond
//! lookups. The transition logic itself lives in the server's lifecycle
//! module; this table is the single source of truth it reads.

use super::types::ServiceType;
use serde::{Deserialize, Serialize};

/// Approval workflow stage of a service request
///
/// Customization, repair and dry cleaning share one flow; rental has a
/// disjoint flow without the price-confirmation branch:
///
/// ```text
/// standard: pending → accepted → confirmed → ready_for_pickup → completed
///                       ↑  ↓ (price edit only)
///                price_confirmation
/// rental:   pending → ready_for_pickup → picked_up → rented → returned → completed
/// ```
///
/// `cancelled` is terminal and reachable from `pending`/`accepted` only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Accepted,
    PriceConfirmation,
    Confirmed,
    ReadyForPickup,
    PickedUp,
    Rented,
    Returned,
    Completed,
    Cancelled,
}

/// Shared flow for customization, repair and dry cleaning.
///
/// `price_confirmation` is intentionally absent: it is a side branch off
/// `accepted`, entered only through a price edit, never through a plain
/// advance.
const STANDARD_FLOW: [ApprovalStatus; 5] = [
    ApprovalStatus::Pending,
    ApprovalStatus::Accepted,
    ApprovalStatus::Confirmed,
    ApprovalStatus::ReadyForPickup,
    ApprovalStatus::Completed,
];

const RENTAL_FLOW: [ApprovalStatus; 6] = [
    ApprovalStatus::Pending,
    ApprovalStatus::ReadyForPickup,
    ApprovalStatus::PickedUp,
    ApprovalStatus::Rented,
    ApprovalStatus::Returned,
    ApprovalStatus::Completed,
];

/// Ordered transition list for a service type
pub fn transition_order(service_type: ServiceType) -> &'static [ApprovalStatus] {
    match service_type {
        ServiceType::Rental => &RENTAL_FLOW,
        _ => &STANDARD_FLOW,
    }
}

impl ApprovalStatus {
    /// Canonical wire value (snake_case, matches serde)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::PriceConfirmation => "price_confirmation",
            Self::Confirmed => "confirmed",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::PickedUp => "picked_up",
            Self::Rented => "rented",
            Self::Returned => "returned",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Strict parse of a canonical wire value
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "price_confirmation" => Some(Self::PriceConfirmation),
            "confirmed" => Some(Self::Confirmed),
            "ready_for_pickup" => Some(Self::ReadyForPickup),
            "picked_up" => Some(Self::PickedUp),
            "rented" => Some(Self::Rented),
            "returned" => Some(Self::Returned),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Normalize a raw status value at the engine boundary.
    ///
    /// Missing, empty, whitespace-only, legacy `pending_review` and
    /// unrecognized values all fall back to `pending`. This is the single
    /// place that fallback happens; callers must not default inline.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Pending;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Pending;
        }
        match trimmed {
            "pending_review" => Self::Pending,
            other => Self::from_raw(other).unwrap_or(Self::Pending),
        }
    }

    /// Human-readable label for display
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending Review",
            Self::Accepted => "Accepted",
            Self::PriceConfirmation => "Awaiting Price Confirmation",
            Self::Confirmed => "Confirmed",
            Self::ReadyForPickup => "Ready for Pickup",
            Self::PickedUp => "Picked Up",
            Self::Rented => "Rented",
            Self::Returned => "Returned",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Stable CSS class for the status badge
    ///
    /// Kept here because every admin view depends on one consistent mapping.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Pending => "status-pending",
            Self::Accepted => "status-accepted",
            Self::PriceConfirmation => "status-price-confirmation",
            Self::Confirmed => "status-confirmed",
            Self::ReadyForPickup => "status-ready",
            Self::PickedUp => "status-picked-up",
            Self::Rented => "status-rented",
            Self::Returned => "status-returned",
            Self::Completed => "status-completed",
            Self::Cancelled => "status-cancelled",
        }
    }

    /// Terminal statuses admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Cancellation is only reachable from pending or accepted
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
