//! Billing projection service
//!
//! Owns the derived billing records and the change feed the admin view
//! subscribes to. Records are created at cart submission; payment status
//! moves either through an explicit admin action (toggle or set) or
//! automatically when the owning request completes. Approval state is
//! never read back out of billing — it is a projection, not a source of
//! truth.

use parking_lot::RwLock;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::billing::{BillingAction, BillingEvent, BillingRecord, PaymentStatus, derive_status};
use shared::order::ServiceRequest;
use shared::types::now_millis;
use std::collections::HashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Buffered change events per subscriber before lagging
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
struct BillingInner {
    records: HashMap<Uuid, BillingRecord>,
    by_item: HashMap<Uuid, Uuid>,
    next_no: u32,
}

/// In-memory billing store with a broadcast change feed
pub struct BillingService {
    inner: RwLock<BillingInner>,
    events: broadcast::Sender<BillingEvent>,
}

impl BillingService {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: RwLock::new(BillingInner {
                next_no: 1,
                ..Default::default()
            }),
            events,
        }
    }

    /// Subscribe to the change feed (replaces the admin view's polling)
    pub fn subscribe(&self) -> broadcast::Receiver<BillingEvent> {
        self.events.subscribe()
    }

    /// Create the billing record for a freshly submitted request
    pub fn create_for(&self, request: &ServiceRequest) -> BillingRecord {
        let record = {
            let mut inner = self.inner.write();
            let unique_no = format!("TB-{:04}", inner.next_no);
            inner.next_no += 1;

            let record = BillingRecord {
                record_id: Uuid::new_v4(),
                unique_no,
                item_id: request.item_id,
                customer_name: request.customer_name.clone(),
                service_type: request.service_type,
                price: request
                    .final_price
                    .or(request.estimated_price)
                    .unwrap_or(0.0),
                payment_status: derive_status(request.service_type, false),
                date: now_millis(),
            };
            inner.records.insert(record.record_id, record.clone());
            inner.by_item.insert(request.item_id, record.record_id);
            record
        };

        self.publish(BillingAction::Created, record.clone());
        record
    }

    /// All records, newest first
    pub fn list(&self) -> Vec<BillingRecord> {
        let inner = self.inner.read();
        let mut records: Vec<BillingRecord> = inner.records.values().cloned().collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.unique_no.cmp(&a.unique_no)));
        records
    }

    pub fn get(&self, record_id: Uuid) -> Option<BillingRecord> {
        self.inner.read().records.get(&record_id).cloned()
    }

    /// Record for an owning service request, if any
    pub fn record_for_item(&self, item_id: Uuid) -> Option<BillingRecord> {
        let inner = self.inner.read();
        let record_id = inner.by_item.get(&item_id)?;
        inner.records.get(record_id).cloned()
    }

    /// Explicit admin override to a concrete status
    pub fn set_status(&self, record_id: Uuid, status: PaymentStatus) -> AppResult<BillingRecord> {
        let record = {
            let mut inner = self.inner.write();
            let record = inner
                .records
                .get_mut(&record_id)
                .ok_or_else(|| AppError::new(ErrorCode::BillingRecordNotFound))?;
            if !status.valid_for(record.service_type) {
                return Err(AppError::new(ErrorCode::PaymentStatusInvalid)
                    .with_detail("status", status.as_str())
                    .with_detail("service_type", record.service_type.as_str()));
            }
            record.payment_status = status;
            record.clone()
        };

        self.publish(BillingAction::Updated, record.clone());
        Ok(record)
    }

    /// The "next" payment action: toggles within the service type's pair
    pub fn advance_status(&self, record_id: Uuid) -> AppResult<BillingRecord> {
        let record = {
            let mut inner = self.inner.write();
            let record = inner
                .records
                .get_mut(&record_id)
                .ok_or_else(|| AppError::new(ErrorCode::BillingRecordNotFound))?;
            record.payment_status = record.payment_status.next(record.service_type);
            record.clone()
        };

        self.publish(BillingAction::Updated, record.clone());
        Ok(record)
    }

    /// Called when the owning request reaches `completed`: the record
    /// auto-advances to its settled state
    pub fn on_request_completed(&self, item_id: Uuid) {
        let record = {
            let mut inner = self.inner.write();
            let Some(record_id) = inner.by_item.get(&item_id).copied() else {
                tracing::debug!(item_id = %item_id, "Completed request has no billing record");
                return;
            };
            let Some(record) = inner.records.get_mut(&record_id) else {
                return;
            };
            let settled = derive_status(record.service_type, true);
            if record.payment_status == settled {
                return;
            }
            record.payment_status = settled;
            record.clone()
        };

        self.publish(BillingAction::Updated, record);
    }

    fn publish(&self, action: BillingAction, record: BillingRecord) {
        // Send fails only when no admin view is subscribed; that is fine
        let _ = self.events.send(BillingEvent { action, record });
    }
}

impl Default for BillingService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::order::{DamageLevel, RentalItem, ServiceDetails};

    fn repair_request() -> ServiceRequest {
        ServiceRequest::new(
            Uuid::new_v4(),
            "Ana Torres",
            ServiceDetails::Repair {
                damage_level: Some(DamageLevel::Minor),
                damage_description: "Loose hem".to_string(),
            },
            Some(300.0),
        )
    }

    fn rental_request() -> ServiceRequest {
        ServiceRequest::new(
            Uuid::new_v4(),
            "Ana Torres",
            ServiceDetails::Rental {
                items: vec![RentalItem {
                    name: "Gown".to_string(),
                    base_price_per_3_days: 500.0,
                    down_payment: 200.0,
                }],
                rental_start: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                rental_end: NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(),
            },
            Some(1000.0),
        )
    }

    #[test]
    fn test_create_assigns_sequential_numbers() {
        let billing = BillingService::new();
        let first = billing.create_for(&repair_request());
        let second = billing.create_for(&repair_request());
        assert_eq!(first.unique_no, "TB-0001");
        assert_eq!(second.unique_no, "TB-0002");
    }

    #[test]
    fn test_initial_status_per_service_type() {
        let billing = BillingService::new();
        let repair = billing.create_for(&repair_request());
        assert_eq!(repair.payment_status, PaymentStatus::Unpaid);
        assert_eq!(repair.price, 300.0);

        let rental = billing.create_for(&rental_request());
        assert_eq!(rental.payment_status, PaymentStatus::DownPayment);
    }

    #[test]
    fn test_advance_toggles_within_pair() {
        let billing = BillingService::new();
        let record = billing.create_for(&repair_request());

        let record = billing.advance_status(record.record_id).unwrap();
        assert_eq!(record.payment_status, PaymentStatus::Paid);
        let record = billing.advance_status(record.record_id).unwrap();
        assert_eq!(record.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn test_set_status_rejects_foreign_pair() {
        let billing = BillingService::new();
        let record = billing.create_for(&repair_request());

        let err = billing
            .set_status(record.record_id, PaymentStatus::DownPayment)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentStatusInvalid);

        let record = billing
            .set_status(record.record_id, PaymentStatus::Paid)
            .unwrap();
        assert_eq!(record.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_completion_settles_record() {
        let billing = BillingService::new();
        let request = rental_request();
        let record = billing.create_for(&request);
        assert_eq!(record.payment_status, PaymentStatus::DownPayment);

        billing.on_request_completed(request.item_id);
        let record = billing.get(record.record_id).unwrap();
        assert_eq!(record.payment_status, PaymentStatus::FullyPaid);
    }

    #[test]
    fn test_completion_of_unknown_item_is_quiet() {
        let billing = BillingService::new();
        billing.on_request_completed(Uuid::new_v4());
        assert!(billing.list().is_empty());
    }

    #[tokio::test]
    async fn test_change_feed_delivers_events() {
        let billing = BillingService::new();
        let mut rx = billing.subscribe();

        let record = billing.create_for(&repair_request());
        let event = rx.recv().await.unwrap();
        assert_eq!(event.action, BillingAction::Created);
        assert_eq!(event.record.record_id, record.record_id);

        billing.advance_status(record.record_id).unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.action, BillingAction::Updated);
        assert_eq!(event.record.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_record_for_item() {
        let billing = BillingService::new();
        let request = repair_request();
        let record = billing.create_for(&request);
        assert_eq!(
            billing.record_for_item(request.item_id).map(|r| r.record_id),
            Some(record.record_id)
        );
        assert!(billing.record_for_item(Uuid::new_v4()).is_none());
    }
}
