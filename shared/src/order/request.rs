//! Service request - one line item of customer-requested work

use super::status::ApprovalStatus;
use super::types::{ServiceDetails, ServiceType};
use crate::types::{Timestamp, now_millis};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit trail for staff pricing decisions
///
/// Mutated only through the price-edit path; `estimate_at_edit` and
/// `price_delta` capture what the reconciliation engine saw when the last
/// edit was applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingFactors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    /// Deposit collected at submission (rental bundles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<f64>,
    /// The system estimate at the time of the last price edit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_at_edit: Option<f64>,
    /// final price minus estimate at the last edit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_delta: Option<f64>,
}

/// One line item of work tracked through the approval lifecycle
///
/// Invariants:
/// - `approval_status` is always a member of the per-type transition table
///   (or the price-confirmation side branch / cancelled)
/// - `final_price` is non-null once the status leaves `pending`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRequest {
    pub item_id: Uuid,
    pub order_id: Uuid,
    pub service_type: ServiceType,
    pub approval_status: ApprovalStatus,
    /// System-computed baseline, absent when no estimate exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
    /// Staff-entered price, null until set or the request leaves `pending`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    pub details: ServiceDetails,
    #[serde(default)]
    pub pricing_factors: PricingFactors,
    /// Appointment backing this request, referenced not owned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<Uuid>,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ServiceRequest {
    /// Create a new pending request for an order
    pub fn new(
        order_id: Uuid,
        customer_name: impl Into<String>,
        details: ServiceDetails,
        estimated_price: Option<f64>,
    ) -> Self {
        let now = now_millis();
        Self {
            item_id: Uuid::new_v4(),
            order_id,
            service_type: details.service_type(),
            approval_status: ApprovalStatus::Pending,
            estimated_price,
            final_price: None,
            details,
            pricing_factors: PricingFactors::default(),
            slot_id: None,
            customer_name: customer_name.into(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the request updated now
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::types::DamageLevel;

    fn repair_details() -> ServiceDetails {
        ServiceDetails::Repair {
            damage_level: Some(DamageLevel::Minor),
            damage_description: "Loose hem".to_string(),
        }
    }

    #[test]
    fn test_new_request_is_pending() {
        let order_id = Uuid::new_v4();
        let request = ServiceRequest::new(order_id, "Ana Torres", repair_details(), Some(300.0));

        assert_eq!(request.order_id, order_id);
        assert_eq!(request.service_type, ServiceType::Repair);
        assert_eq!(request.approval_status, ApprovalStatus::Pending);
        assert_eq!(request.estimated_price, Some(300.0));
        assert!(request.final_price.is_none());
        assert!(request.slot_id.is_none());
    }

    #[test]
    fn test_service_type_derived_from_details() {
        let request = ServiceRequest::new(
            Uuid::new_v4(),
            "Ana Torres",
            ServiceDetails::DryCleaning {
                garment_type: "coat".to_string(),
                listed_price: None,
                special_instructions: None,
            },
            None,
        );
        assert_eq!(request.service_type, ServiceType::DryCleaning);
    }

    #[test]
    fn test_serde_roundtrip() {
        let request = ServiceRequest::new(Uuid::new_v4(), "Ana Torres", repair_details(), None);
        let json = serde_json::to_string(&request).unwrap();
        let parsed: ServiceRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
