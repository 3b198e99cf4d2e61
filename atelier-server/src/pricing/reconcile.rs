//! Price-change reconciliation
//!
//! A staff price edit while a request awaits routine progression must pause
//! for customer consent: silently changing a price the customer has not
//! seen is disallowed. This module decides, for one edit, whether the
//! request is forced into `price_confirmation` or keeps the status the
//! caller asked for.

use super::estimator;
use crate::orders::money;
use shared::order::{ApprovalStatus, ServiceDetails, ServiceType};

/// Outcome of a price edit: the price to persist and the resulting status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEdit {
    pub final_price: f64,
    pub approval_status: ApprovalStatus,
}

/// Apply a price edit against a request's current state.
///
/// The status is forced to `price_confirmation` — regardless of what the
/// caller requested — when all of the following hold:
/// - an estimate is available for the request (never fabricated),
/// - the current status is `pending` or `accepted`,
/// - the new price diverges from the estimate by more than 0.01,
/// - the service is not a rental (the rental flow has no confirmation
///   branch; its pricing is formula-driven).
///
/// Otherwise the caller-requested status passes through unchanged. Edits
/// after `confirmed` never reopen customer confirmation.
pub fn apply_price_edit(
    current: ApprovalStatus,
    requested: ApprovalStatus,
    details: &ServiceDetails,
    new_final_price: f64,
) -> PriceEdit {
    let awaiting_progression = matches!(
        current,
        ApprovalStatus::Pending | ApprovalStatus::Accepted
    );

    let approval_status = match estimator::estimate(details) {
        Some(estimate)
            if awaiting_progression
                && details.service_type() != ServiceType::Rental
                && money::diverges(new_final_price, estimate) =>
        {
            ApprovalStatus::PriceConfirmation
        }
        _ => requested,
    };

    PriceEdit {
        final_price: new_final_price,
        approval_status,
    }
}
