//! ServiceOrderManager - the transactional boundary for request mutations
//!
//! Every mutating operation (advance, decline, price edit, explicit status
//! set) takes the write lock once, validates, applies, and releases — one
//! atomic server-side transaction per user action. Collaborators that react
//! to a committed change (billing auto-advance, slot release) are invoked
//! after the lock is dropped.

use crate::billing::BillingService;
use crate::orders::lifecycle;
use crate::orders::money;
use crate::pricing;
use crate::scheduling::SlotAllocator;
use parking_lot::RwLock;
use shared::error::{AppError, ErrorCode};
use shared::order::{ApprovalStatus, ServiceRequest, ServiceType};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Manager errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Service request not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Request {0} has already been completed")]
    AlreadyCompleted(Uuid),

    #[error("Request {0} has already been cancelled")]
    AlreadyCancelled(Uuid),

    #[error("No further transition available from {0}")]
    TransitionUnavailable(ApprovalStatus),

    #[error("Cancellation is not allowed from {0}")]
    CancelNotAllowed(ApprovalStatus),

    #[error("Transition {from} -> {to} is not legal")]
    IllegalTransition {
        from: ApprovalStatus,
        to: ApprovalStatus,
    },

    #[error("Item belongs to service type {actual}, not {requested}")]
    ServiceTypeMismatch {
        requested: ServiceType,
        actual: ServiceType,
    },

    #[error("{0}")]
    InvalidPrice(String),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::ItemNotFound(id) => {
                AppError::with_message(ErrorCode::ItemNotFound, message)
                    .with_detail("item_id", id.to_string())
            }
            OrderError::AlreadyCompleted(_) => {
                AppError::with_message(ErrorCode::OrderAlreadyCompleted, message)
            }
            OrderError::AlreadyCancelled(_) => {
                AppError::with_message(ErrorCode::OrderAlreadyCancelled, message)
            }
            OrderError::TransitionUnavailable(status) => {
                AppError::with_message(ErrorCode::TransitionUnavailable, message)
                    .with_detail("current_status", status.as_str())
            }
            OrderError::CancelNotAllowed(status) => {
                AppError::with_message(ErrorCode::CancelNotAllowed, message)
                    .with_detail("current_status", status.as_str())
            }
            OrderError::IllegalTransition { from, to } => {
                AppError::with_message(ErrorCode::TransitionUnavailable, message)
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
            OrderError::ServiceTypeMismatch { .. } => {
                AppError::with_message(ErrorCode::ServiceTypeMismatch, message)
            }
            OrderError::InvalidPrice(_) => {
                AppError::with_message(ErrorCode::InvalidPrice, message)
            }
        }
    }
}

#[derive(Default)]
struct OrdersInner {
    requests: HashMap<Uuid, ServiceRequest>,
    orders: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory store of submitted service requests, grouped by order
#[derive(Default)]
pub struct ServiceOrderManager {
    inner: RwLock<OrdersInner>,
}

impl ServiceOrderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the requests of a submitted order
    pub fn insert_order(&self, order_id: Uuid, requests: Vec<ServiceRequest>) {
        let mut inner = self.inner.write();
        let item_ids = requests.iter().map(|r| r.item_id).collect();
        for request in requests {
            inner.requests.insert(request.item_id, request);
        }
        inner.orders.insert(order_id, item_ids);
    }

    pub fn get(&self, item_id: Uuid) -> Option<ServiceRequest> {
        self.inner.read().requests.get(&item_id).cloned()
    }

    /// All requests of one service type, newest first
    pub fn list_by_type(&self, service_type: ServiceType) -> Vec<ServiceRequest> {
        let inner = self.inner.read();
        let mut requests: Vec<ServiceRequest> = inner
            .requests
            .values()
            .filter(|r| r.service_type == service_type)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    pub fn list_order(&self, order_id: Uuid) -> Vec<ServiceRequest> {
        let inner = self.inner.read();
        inner
            .orders
            .get(&order_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.requests.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Bind a booked appointment slot to a request
    pub fn attach_slot(
        &self,
        item_id: Uuid,
        expected_type: Option<ServiceType>,
        slot_id: Uuid,
    ) -> Result<ServiceRequest, OrderError> {
        let mut inner = self.inner.write();
        let request = Self::fetch_mut(&mut inner, item_id, expected_type)?;
        request.slot_id = Some(slot_id);
        request.touch();
        Ok(request.clone())
    }

    /// Advance a request to its next approval status.
    ///
    /// Terminal and unrecognized statuses surface as conflicts so the UI
    /// can refresh instead of retrying. On leaving `pending` the final
    /// price is filled from the estimate; on reaching `completed` the
    /// billing record auto-advances.
    pub fn advance(
        &self,
        item_id: Uuid,
        expected_type: Option<ServiceType>,
        billing: &BillingService,
    ) -> Result<ServiceRequest, OrderError> {
        let snapshot = {
            let mut inner = self.inner.write();
            let request = Self::fetch_mut(&mut inner, item_id, expected_type)?;

            let next = lifecycle::next_status(request.approval_status, request.service_type)
                .ok_or(match request.approval_status {
                    ApprovalStatus::Completed => OrderError::AlreadyCompleted(item_id),
                    ApprovalStatus::Cancelled => OrderError::AlreadyCancelled(item_id),
                    other => OrderError::TransitionUnavailable(other),
                })?;

            Self::apply_status(request, next);
            request.clone()
        };

        if snapshot.approval_status == ApprovalStatus::Completed {
            billing.on_request_completed(item_id);
        }
        tracing::info!(
            item_id = %item_id,
            status = %snapshot.approval_status,
            "Request advanced"
        );
        Ok(snapshot)
    }

    /// Decline (cancel) a request. Only legal from `pending`/`accepted`.
    /// Any booked slot is freed for re-booking.
    pub fn decline(
        &self,
        item_id: Uuid,
        expected_type: Option<ServiceType>,
        slots: &SlotAllocator,
    ) -> Result<ServiceRequest, OrderError> {
        let (snapshot, freed_slot) = {
            let mut inner = self.inner.write();
            let request = Self::fetch_mut(&mut inner, item_id, expected_type)?;

            if !request.approval_status.can_cancel() {
                return Err(match request.approval_status {
                    ApprovalStatus::Completed => OrderError::AlreadyCompleted(item_id),
                    ApprovalStatus::Cancelled => OrderError::AlreadyCancelled(item_id),
                    other => OrderError::CancelNotAllowed(other),
                });
            }

            request.approval_status = ApprovalStatus::Cancelled;
            request.touch();
            let freed_slot = request.slot_id.take();
            (request.clone(), freed_slot)
        };

        if let Some(slot_id) = freed_slot {
            // Expected path for a cancelled request; the slot may already be free
            slots.cancel_slot(slot_id);
        }
        tracing::info!(item_id = %item_id, "Request declined");
        Ok(snapshot)
    }

    /// Apply a staff price edit.
    ///
    /// The reconciliation engine may override the requested status with
    /// `price_confirmation`; otherwise the requested status must be a legal
    /// transition. The audit trail records what the engine saw.
    pub fn apply_price_edit(
        &self,
        item_id: Uuid,
        expected_type: Option<ServiceType>,
        new_final_price: f64,
        requested_status: Option<ApprovalStatus>,
        admin_notes: Option<String>,
        billing: &BillingService,
    ) -> Result<ServiceRequest, OrderError> {
        money::validate_price(new_final_price, "final_price")
            .map_err(|e| OrderError::InvalidPrice(e.message))?;

        let snapshot = {
            let mut inner = self.inner.write();
            let request = Self::fetch_mut(&mut inner, item_id, expected_type)?;

            match request.approval_status {
                ApprovalStatus::Completed => {
                    return Err(OrderError::AlreadyCompleted(item_id));
                }
                ApprovalStatus::Cancelled => {
                    return Err(OrderError::AlreadyCancelled(item_id));
                }
                _ => {}
            }

            let current = request.approval_status;
            let requested = requested_status.unwrap_or(current);
            let edit =
                pricing::apply_price_edit(current, requested, &request.details, new_final_price);

            // Anything other than the forced confirmation branch must be a
            // legal transition in its own right
            let forced = edit.approval_status == ApprovalStatus::PriceConfirmation
                && matches!(current, ApprovalStatus::Pending | ApprovalStatus::Accepted);
            if !forced
                && !lifecycle::is_legal_transition(current, edit.approval_status, request.service_type)
            {
                return Err(OrderError::IllegalTransition {
                    from: current,
                    to: edit.approval_status,
                });
            }

            let estimate = pricing::estimate(&request.details);
            request.pricing_factors.estimate_at_edit = estimate;
            request.pricing_factors.price_delta = estimate.map(|est| {
                money::to_f64(money::to_decimal(edit.final_price) - money::to_decimal(est))
            });
            if admin_notes.is_some() {
                request.pricing_factors.admin_notes = admin_notes;
            }

            request.final_price = Some(edit.final_price);
            if edit.approval_status != current {
                Self::apply_status(request, edit.approval_status);
            } else {
                request.touch();
            }
            request.clone()
        };

        if snapshot.approval_status == ApprovalStatus::Completed {
            billing.on_request_completed(item_id);
        }
        tracing::info!(
            item_id = %item_id,
            final_price = snapshot.final_price,
            status = %snapshot.approval_status,
            "Price edit applied"
        );
        Ok(snapshot)
    }

    /// Explicitly set an approval status from the staff UI.
    ///
    /// Only the computed next status (or a no-op) is accepted here;
    /// cancellation goes through [`Self::decline`] and the confirmation
    /// branch through [`Self::apply_price_edit`].
    pub fn set_status(
        &self,
        item_id: Uuid,
        expected_type: Option<ServiceType>,
        requested: ApprovalStatus,
        billing: &BillingService,
    ) -> Result<ServiceRequest, OrderError> {
        let snapshot = {
            let mut inner = self.inner.write();
            let request = Self::fetch_mut(&mut inner, item_id, expected_type)?;
            let current = request.approval_status;

            if requested == current {
                return Ok(request.clone());
            }
            if requested == ApprovalStatus::Cancelled
                || !lifecycle::is_legal_transition(current, requested, request.service_type)
            {
                return Err(OrderError::IllegalTransition {
                    from: current,
                    to: requested,
                });
            }

            Self::apply_status(request, requested);
            request.clone()
        };

        if snapshot.approval_status == ApprovalStatus::Completed {
            billing.on_request_completed(item_id);
        }
        Ok(snapshot)
    }

    /// Update the admin notes without touching price or status
    pub fn update_notes(
        &self,
        item_id: Uuid,
        expected_type: Option<ServiceType>,
        admin_notes: String,
    ) -> Result<ServiceRequest, OrderError> {
        let mut inner = self.inner.write();
        let request = Self::fetch_mut(&mut inner, item_id, expected_type)?;
        request.pricing_factors.admin_notes = Some(admin_notes);
        request.touch();
        Ok(request.clone())
    }

    fn fetch_mut<'a>(
        inner: &'a mut OrdersInner,
        item_id: Uuid,
        expected_type: Option<ServiceType>,
    ) -> Result<&'a mut ServiceRequest, OrderError> {
        let request = inner
            .requests
            .get_mut(&item_id)
            .ok_or(OrderError::ItemNotFound(item_id))?;
        if let Some(expected) = expected_type
            && request.service_type != expected
        {
            return Err(OrderError::ServiceTypeMismatch {
                requested: expected,
                actual: request.service_type,
            });
        }
        Ok(request)
    }

    fn apply_status(request: &mut ServiceRequest, next: ApprovalStatus) {
        if request.approval_status == ApprovalStatus::Pending && request.final_price.is_none() {
            // Invariant: final price is set once the request leaves pending.
            // With no estimate the price stays open until staff set it.
            request.final_price = request.estimated_price;
        }
        request.approval_status = next;
        request.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{DamageLevel, ServiceDetails};

    fn manager_with_repair(estimate: Option<f64>) -> (ServiceOrderManager, BillingService, Uuid) {
        let manager = ServiceOrderManager::new();
        let billing = BillingService::new();
        let order_id = Uuid::new_v4();
        let request = ServiceRequest::new(
            order_id,
            "Ana Torres",
            ServiceDetails::Repair {
                damage_level: estimate.map(|_| DamageLevel::Moderate),
                damage_description: "Split seam".to_string(),
            },
            estimate,
        );
        let item_id = request.item_id;
        billing.create_for(&request);
        manager.insert_order(order_id, vec![request]);
        (manager, billing, item_id)
    }

    #[test]
    fn test_advance_walks_the_flow() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));

        let request = manager.advance(item_id, None, &billing).unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Accepted);
        // Leaving pending fills the final price from the estimate
        assert_eq!(request.final_price, Some(500.0));

        let request = manager.advance(item_id, None, &billing).unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Confirmed);
        let request = manager.advance(item_id, None, &billing).unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::ReadyForPickup);
        let request = manager.advance(item_id, None, &billing).unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Completed);

        let err = manager.advance(item_id, None, &billing).unwrap_err();
        assert!(matches!(err, OrderError::AlreadyCompleted(_)));
    }

    #[test]
    fn test_advance_unknown_item() {
        let manager = ServiceOrderManager::new();
        let billing = BillingService::new();
        let err = manager.advance(Uuid::new_v4(), None, &billing).unwrap_err();
        assert!(matches!(err, OrderError::ItemNotFound(_)));
    }

    #[test]
    fn test_service_type_mismatch() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));
        let err = manager
            .advance(item_id, Some(ServiceType::Rental), &billing)
            .unwrap_err();
        assert!(matches!(err, OrderError::ServiceTypeMismatch { .. }));
    }

    #[test]
    fn test_completion_settles_billing() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));
        for _ in 0..4 {
            manager.advance(item_id, None, &billing).unwrap();
        }
        let record = billing.record_for_item(item_id).unwrap();
        assert!(record.payment_status.is_settled());
    }

    #[test]
    fn test_decline_from_pending_and_accepted_only() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));
        let slots = SlotAllocator::new();

        // pending -> cancel ok
        let request = manager.decline(item_id, None, &slots).unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Cancelled);

        // cancelling again conflicts
        let err = manager.decline(item_id, None, &slots).unwrap_err();
        assert!(matches!(err, OrderError::AlreadyCancelled(_)));

        // past accepted -> cancel refused
        let (manager, billing2, item_id) = manager_with_repair(Some(500.0));
        manager.advance(item_id, None, &billing2).unwrap(); // accepted
        manager.advance(item_id, None, &billing2).unwrap(); // confirmed
        let err = manager.decline(item_id, None, &slots).unwrap_err();
        assert!(matches!(err, OrderError::CancelNotAllowed(_)));
        drop(billing);
    }

    #[test]
    fn test_decline_frees_booked_slot() {
        use chrono::NaiveDate;

        let (manager, _billing, item_id) = manager_with_repair(Some(500.0));
        let slots = SlotAllocator::new();
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let slot = slots
            .book_slot(ServiceType::Repair, date, "10:00", None, now)
            .unwrap();
        manager.attach_slot(item_id, None, slot.slot_id).unwrap();

        manager.decline(item_id, None, &slots).unwrap();
        // The slot is free again
        assert!(
            slots
                .book_slot(ServiceType::Repair, date, "10:00", None, now)
                .is_ok()
        );
    }

    #[test]
    fn test_price_edit_forces_confirmation_then_loops_back() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));

        let request = manager
            .apply_price_edit(item_id, None, 650.0, None, None, &billing)
            .unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::PriceConfirmation);
        assert_eq!(request.final_price, Some(650.0));
        assert_eq!(request.pricing_factors.estimate_at_edit, Some(500.0));
        assert_eq!(request.pricing_factors.price_delta, Some(150.0));

        // Customer confirms: back to accepted, then production continues
        let request = manager.advance(item_id, None, &billing).unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Accepted);
        let request = manager.advance(item_id, None, &billing).unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Confirmed);
    }

    #[test]
    fn test_price_edit_within_tolerance_keeps_status() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));
        let request = manager
            .apply_price_edit(item_id, None, 500.01, None, None, &billing)
            .unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Pending);
        assert_eq!(request.final_price, Some(500.01));
    }

    #[test]
    fn test_price_edit_after_confirmed_updates_directly() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));
        manager.advance(item_id, None, &billing).unwrap(); // accepted
        manager.advance(item_id, None, &billing).unwrap(); // confirmed

        let request = manager
            .apply_price_edit(item_id, None, 450.0, None, None, &billing)
            .unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Confirmed);
        assert_eq!(request.final_price, Some(450.0));
    }

    #[test]
    fn test_price_edit_without_estimate_accepts_requested_status() {
        let (manager, billing, item_id) = manager_with_repair(None);
        let request = manager
            .apply_price_edit(
                item_id,
                None,
                900.0,
                Some(ApprovalStatus::Accepted),
                Some("Quoted after inspection".to_string()),
                &billing,
            )
            .unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Accepted);
        assert_eq!(request.final_price, Some(900.0));
        assert_eq!(request.pricing_factors.estimate_at_edit, None);
        assert_eq!(request.pricing_factors.price_delta, None);
        assert_eq!(
            request.pricing_factors.admin_notes.as_deref(),
            Some("Quoted after inspection")
        );
    }

    #[test]
    fn test_price_edit_rejects_invalid_amounts() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = manager
                .apply_price_edit(item_id, None, bad, None, None, &billing)
                .unwrap_err();
            assert!(matches!(err, OrderError::InvalidPrice(_)));
        }
    }

    #[test]
    fn test_price_edit_rejects_illegal_requested_status() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));
        // Requesting a jump to ready_for_pickup from pending with a
        // non-divergent price is not a legal transition
        let err = manager
            .apply_price_edit(
                item_id,
                None,
                500.0,
                Some(ApprovalStatus::ReadyForPickup),
                None,
                &billing,
            )
            .unwrap_err();
        assert!(matches!(err, OrderError::IllegalTransition { .. }));
    }

    #[test]
    fn test_set_status_accepts_only_next() {
        let (manager, billing, item_id) = manager_with_repair(Some(500.0));

        let request = manager
            .set_status(item_id, None, ApprovalStatus::Accepted, &billing)
            .unwrap();
        assert_eq!(request.approval_status, ApprovalStatus::Accepted);

        let err = manager
            .set_status(item_id, None, ApprovalStatus::Completed, &billing)
            .unwrap_err();
        assert!(matches!(err, OrderError::IllegalTransition { .. }));

        // The confirmation branch is not enterable by hand
        let err = manager
            .set_status(item_id, None, ApprovalStatus::PriceConfirmation, &billing)
            .unwrap_err();
        assert!(matches!(err, OrderError::IllegalTransition { .. }));
    }

    #[test]
    fn test_list_and_get() {
        let (manager, _billing, item_id) = manager_with_repair(Some(500.0));
        assert!(manager.get(item_id).is_some());
        assert_eq!(manager.list_by_type(ServiceType::Repair).len(), 1);
        assert!(manager.list_by_type(ServiceType::Rental).is_empty());

        let order_id = manager.get(item_id).unwrap().order_id;
        assert_eq!(manager.list_order(order_id).len(), 1);
    }
}
