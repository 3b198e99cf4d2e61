//! Approval lifecycle state machine
//!
//! Pure transition logic over the status table in `shared::order::status`.
//! Callers persist the result; nothing here has side effects. A `None`
//! return means "no action available" (terminal or unrecognized status),
//! which callers must not treat as an error.

use shared::order::{ApprovalStatus, ServiceType, transition_order};

/// Compute the next approval status for a request.
///
/// - `price_confirmation` loops back to `accepted` (customer consent
///   returns the request to the accepted stage before production
///   continues). The branch is entered only through a price edit, so a
///   plain advance from `accepted` always yields `confirmed`.
/// - Every other status advances along its service type's transition
///   order; the last entry and anything outside the table yield `None`.
pub fn next_status(current: ApprovalStatus, service_type: ServiceType) -> Option<ApprovalStatus> {
    if current == ApprovalStatus::PriceConfirmation {
        // The rental flow has no price-confirmation branch at all
        return match service_type {
            ServiceType::Rental => None,
            _ => Some(ApprovalStatus::Accepted),
        };
    }

    let flow = transition_order(service_type);
    let idx = flow.iter().position(|s| *s == current)?;
    flow.get(idx + 1).copied()
}

/// Raw-input entry point: normalizes status and service type first, so
/// missing, empty, legacy `pending_review` and unrecognized values behave
/// as the initial `pending` state.
pub fn next_status_raw(
    current: Option<&str>,
    service_type: Option<&str>,
) -> Option<ApprovalStatus> {
    next_status(
        ApprovalStatus::normalize(current),
        ServiceType::normalize(service_type),
    )
}

/// Whether an explicitly requested status change is a legal transition.
///
/// Staff views set concrete statuses; the only legal targets are the
/// computed next status, a permitted cancellation, or a no-op. Entering
/// `price_confirmation` is reserved for the price-edit path.
pub fn is_legal_transition(
    current: ApprovalStatus,
    requested: ApprovalStatus,
    service_type: ServiceType,
) -> bool {
    if requested == current {
        return true;
    }
    if requested == ApprovalStatus::Cancelled {
        return current.can_cancel();
    }
    if requested == ApprovalStatus::PriceConfirmation {
        return false;
    }
    next_status(current, service_type) == Some(requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::ApprovalStatus::*;

    #[test]
    fn test_standard_flow_full_sequence() {
        for service_type in [
            ServiceType::Customization,
            ServiceType::Repair,
            ServiceType::DryCleaning,
        ] {
            let mut status = Pending;
            let mut visited = Vec::new();
            while let Some(next) = next_status(status, service_type) {
                visited.push(next);
                status = next;
            }
            assert_eq!(
                visited,
                vec![Accepted, Confirmed, ReadyForPickup, Completed],
                "unexpected sequence for {service_type}"
            );
            // Terminal: no further advance
            assert_eq!(next_status(Completed, service_type), None);
        }
    }

    #[test]
    fn test_rental_flow_full_sequence() {
        let mut status = Pending;
        let mut visited = Vec::new();
        while let Some(next) = next_status(status, ServiceType::Rental) {
            visited.push(next);
            status = next;
        }
        assert_eq!(
            visited,
            vec![ReadyForPickup, PickedUp, Rented, Returned, Completed]
        );
    }

    #[test]
    fn test_accepted_never_advances_into_price_confirmation() {
        for service_type in [
            ServiceType::Customization,
            ServiceType::Repair,
            ServiceType::DryCleaning,
        ] {
            assert_eq!(next_status(Accepted, service_type), Some(Confirmed));
        }
    }

    #[test]
    fn test_price_confirmation_loops_back_to_accepted() {
        assert_eq!(
            next_status(PriceConfirmation, ServiceType::Repair),
            Some(Accepted)
        );
        assert_eq!(
            next_status(PriceConfirmation, ServiceType::Customization),
            Some(Accepted)
        );
        // Rental has no confirmation branch
        assert_eq!(next_status(PriceConfirmation, ServiceType::Rental), None);
    }

    #[test]
    fn test_terminal_statuses_return_none() {
        for service_type in [ServiceType::Repair, ServiceType::Rental] {
            assert_eq!(next_status(Completed, service_type), None);
            assert_eq!(next_status(Cancelled, service_type), None);
        }
    }

    #[test]
    fn test_statuses_outside_the_table_return_none() {
        // Rental statuses are not part of the standard flow
        assert_eq!(next_status(Rented, ServiceType::Repair), None);
        assert_eq!(next_status(PickedUp, ServiceType::DryCleaning), None);
        // Accepted is not part of the rental flow
        assert_eq!(next_status(Accepted, ServiceType::Rental), None);
    }

    #[test]
    fn test_raw_inputs_behave_as_pending() {
        assert_eq!(next_status_raw(None, Some("repair")), Some(Accepted));
        assert_eq!(next_status_raw(Some(""), Some("repair")), Some(Accepted));
        assert_eq!(
            next_status_raw(Some("pending_review"), Some("repair")),
            Some(Accepted)
        );
        assert_eq!(
            next_status_raw(Some("totally_bogus"), Some("customization")),
            Some(Accepted)
        );
        // Rental's initial advance goes straight to ready_for_pickup
        assert_eq!(
            next_status_raw(None, Some("rental")),
            Some(ReadyForPickup)
        );
        // Unknown service type falls back to customization
        assert_eq!(next_status_raw(Some("accepted"), None), Some(Confirmed));
    }

    #[test]
    fn test_legal_transitions() {
        let t = ServiceType::Repair;
        assert!(is_legal_transition(Pending, Accepted, t));
        assert!(is_legal_transition(Accepted, Confirmed, t));
        assert!(is_legal_transition(Accepted, Accepted, t)); // no-op
        assert!(is_legal_transition(Pending, Cancelled, t));
        assert!(is_legal_transition(Accepted, Cancelled, t));
        assert!(is_legal_transition(PriceConfirmation, Accepted, t));

        // Skipping stages, reopening, or entering the side branch directly
        assert!(!is_legal_transition(Pending, Confirmed, t));
        assert!(!is_legal_transition(Confirmed, Accepted, t));
        assert!(!is_legal_transition(Confirmed, Cancelled, t));
        assert!(!is_legal_transition(Accepted, PriceConfirmation, t));
        assert!(!is_legal_transition(Completed, ReadyForPickup, t));
    }
}
