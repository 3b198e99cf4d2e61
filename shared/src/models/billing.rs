//! Billing projection types
//!
//! Billing records are a derived, read-mostly view over submitted service
//! requests. They are never the source of truth for approval state; payment
//! status is the one field mutated here, either by explicit admin override
//! or automatically when the owning request completes.

use crate::order::ServiceType;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment state of a billing record
///
/// Rental settles in two stages (deposit first, balance on return); every
/// other service is a single unpaid/paid toggle. Wire values match the
/// admin UI labels verbatim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    #[serde(rename = "Down-payment")]
    DownPayment,
    #[serde(rename = "Fully Paid")]
    FullyPaid,
}

impl PaymentStatus {
    /// Wire/display value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::Paid => "Paid",
            Self::DownPayment => "Down-payment",
            Self::FullyPaid => "Fully Paid",
        }
    }

    /// Strict parse of a wire value
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "Unpaid" => Some(Self::Unpaid),
            "Paid" => Some(Self::Paid),
            "Down-payment" => Some(Self::DownPayment),
            "Fully Paid" => Some(Self::FullyPaid),
            _ => None,
        }
    }

    /// Whether this status is valid for the given service type
    pub fn valid_for(&self, service_type: ServiceType) -> bool {
        match service_type {
            ServiceType::Rental => matches!(self, Self::DownPayment | Self::FullyPaid),
            _ => matches!(self, Self::Unpaid | Self::Paid),
        }
    }

    /// The next payment action for this record.
    ///
    /// Rental toggles strictly between `Down-payment` and `Fully Paid`;
    /// everything else between `Unpaid` and `Paid`. A record left in a
    /// status foreign to its service type (stale manual edit) snaps into
    /// the settled state of the correct pair.
    pub fn next(&self, service_type: ServiceType) -> Self {
        match service_type {
            ServiceType::Rental => match self {
                Self::FullyPaid => Self::DownPayment,
                _ => Self::FullyPaid,
            },
            _ => match self {
                Self::Paid => Self::Unpaid,
                _ => Self::Paid,
            },
        }
    }

    /// Whether the record counts as settled in full
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Paid | Self::FullyPaid)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derive the payment status from the owning request's service type and
/// whether the full price has been settled
pub fn derive_status(service_type: ServiceType, settled: bool) -> PaymentStatus {
    match (service_type, settled) {
        (ServiceType::Rental, false) => PaymentStatus::DownPayment,
        (ServiceType::Rental, true) => PaymentStatus::FullyPaid,
        (_, false) => PaymentStatus::Unpaid,
        (_, true) => PaymentStatus::Paid,
    }
}

/// One row in the admin billing view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingRecord {
    pub record_id: Uuid,
    /// Sequential store-local reference, e.g. `TB-0001`
    pub unique_no: String,
    /// Owning service request
    pub item_id: Uuid,
    pub customer_name: String,
    pub service_type: ServiceType,
    pub price: f64,
    pub payment_status: PaymentStatus,
    pub date: Timestamp,
}

/// Change notification pushed to subscribed admin views
///
/// Replaces the storefront's 5-second polling loop with an explicit
/// subscription feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingEvent {
    pub action: BillingAction,
    pub record: BillingRecord,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BillingAction {
    Created,
    Updated,
}

impl BillingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}
