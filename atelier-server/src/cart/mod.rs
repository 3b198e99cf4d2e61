//! Cart aggregator
//!
//! Groups heterogeneous service requests into a single submittable order.
//! The tagged `ServiceDetails` payloads are validated here, at the
//! boundary, so nothing downstream has to re-check shapes. Rental bundles
//! stay one entry and become one request; billing and status transitions
//! operate on the bundle as a unit.

use crate::billing::BillingService;
use crate::orders::ServiceOrderManager;
use crate::orders::money::validate_price;
use crate::pricing::{self, rental};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use parking_lot::RwLock;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::cart::{CartEntry, CartEntryInput, SubmittedOrder};
use shared::order::{ServiceDetails, ServiceRequest};
use shared::types::now_millis;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Default)]
struct CartInner {
    entries: HashMap<Uuid, CartEntry>,
    /// Insertion order for stable listing
    order: Vec<Uuid>,
}

/// In-memory cart of not-yet-submitted service requests
#[derive(Default)]
pub struct CartService {
    inner: RwLock<CartInner>,
}

impl CartService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add an entry to the cart
    pub fn add_entry(&self, input: CartEntryInput) -> AppResult<CartEntry> {
        validate_required_text(&input.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_details(&input.details)?;

        let estimated_price = pricing::estimate(&input.details);
        let entry = CartEntry {
            entry_id: Uuid::new_v4(),
            customer_name: input.customer_name,
            is_bundle: matches!(input.details, ServiceDetails::Rental { .. }),
            details: input.details,
            estimated_price,
            created_at: now_millis(),
        };

        let mut inner = self.inner.write();
        inner.order.push(entry.entry_id);
        inner.entries.insert(entry.entry_id, entry.clone());
        Ok(entry)
    }

    /// Current cart contents in insertion order
    pub fn list(&self) -> Vec<CartEntry> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id).cloned())
            .collect()
    }

    pub fn get(&self, entry_id: Uuid) -> Option<CartEntry> {
        self.inner.read().entries.get(&entry_id).cloned()
    }

    /// Remove an entry without submitting it
    pub fn remove(&self, entry_id: Uuid) -> bool {
        let mut inner = self.inner.write();
        inner.order.retain(|id| *id != entry_id);
        inner.entries.remove(&entry_id).is_some()
    }

    /// Submit the selected entries as one order.
    ///
    /// Unselected entries remain in the cart untouched. Submitted entries
    /// are consumed, so re-submitting the same ids cannot create duplicate
    /// requests. Every selected entry is re-validated before anything is
    /// consumed: a failure leaves the cart exactly as it was.
    pub fn submit(
        &self,
        selected_ids: &[Uuid],
        notes: Option<String>,
        orders: &ServiceOrderManager,
        billing: &BillingService,
    ) -> AppResult<SubmittedOrder> {
        validate_optional_text(&notes, "notes", MAX_NOTE_LEN)?;

        let requests = {
            let mut inner = self.inner.write();
            let selected: HashSet<&Uuid> = selected_ids.iter().collect();
            let chosen: Vec<Uuid> = inner
                .order
                .iter()
                .filter(|id| selected.contains(id))
                .copied()
                .collect();

            if chosen.is_empty() {
                return Err(AppError::new(ErrorCode::CartEmpty));
            }

            for id in &chosen {
                if let Some(entry) = inner.entries.get(id) {
                    validate_details(&entry.details)?;
                }
            }

            let order_id = Uuid::new_v4();
            let mut requests = Vec::with_capacity(chosen.len());
            for id in &chosen {
                let Some(entry) = inner.entries.remove(id) else {
                    continue;
                };
                let mut request = ServiceRequest::new(
                    order_id,
                    entry.customer_name,
                    entry.details,
                    entry.estimated_price,
                );
                request.notes = notes.clone();
                if let ServiceDetails::Rental { items, .. } = &request.details {
                    request.pricing_factors.down_payment =
                        Some(rental::bundle_down_payment(items));
                }
                requests.push(request);
            }
            inner.order.retain(|id| !selected.contains(&id));
            requests
        };

        let Some(order_id) = requests.first().map(|r| r.order_id) else {
            return Err(AppError::new(ErrorCode::CartEmpty));
        };
        let item_ids: Vec<Uuid> = requests.iter().map(|r| r.item_id).collect();

        for request in &requests {
            billing.create_for(request);
        }
        orders.insert_order(order_id, requests);

        tracing::info!(
            order_id = %order_id,
            items = item_ids.len(),
            "Cart submitted"
        );
        Ok(SubmittedOrder { order_id, item_ids })
    }
}

/// Boundary validation of the tagged service payloads
fn validate_details(details: &ServiceDetails) -> AppResult<()> {
    match details {
        ServiceDetails::Customization {
            garment,
            fabric,
            design_notes,
        } => {
            if let Some(g) = garment {
                validate_required_text(&g.name, "garment name", MAX_NAME_LEN)?;
                validate_price(g.price, "garment price")?;
            }
            if let Some(f) = fabric {
                validate_required_text(&f.name, "fabric name", MAX_NAME_LEN)?;
                validate_price(f.price, "fabric price")?;
            }
            validate_optional_text(design_notes, "design_notes", MAX_NOTE_LEN)?;
        }
        ServiceDetails::Repair {
            damage_description, ..
        } => {
            validate_required_text(damage_description, "damage_description", MAX_NOTE_LEN)?;
        }
        ServiceDetails::DryCleaning {
            garment_type,
            listed_price,
            special_instructions,
        } => {
            validate_required_text(garment_type, "garment_type", MAX_NAME_LEN)?;
            if let Some(price) = listed_price {
                validate_price(*price, "listed_price")?;
            }
            validate_optional_text(special_instructions, "special_instructions", MAX_NOTE_LEN)?;
        }
        ServiceDetails::Rental {
            items,
            rental_start,
            rental_end,
        } => {
            if items.is_empty() {
                return Err(AppError::new(ErrorCode::BundleEmpty));
            }
            for item in items {
                validate_required_text(&item.name, "rental item name", MAX_NAME_LEN)?;
                validate_price(item.base_price_per_3_days, "base_price_per_3_days")?;
                validate_price(item.down_payment, "down_payment")?;
            }
            let duration = (*rental_end - *rental_start).num_days();
            if duration < rental::MIN_RENTAL_DAYS {
                return Err(AppError::with_message(
                    ErrorCode::RentalTooShort,
                    format!(
                        "Rental duration is {} days, minimum is {}",
                        duration,
                        rental::MIN_RENTAL_DAYS
                    ),
                ));
            }
        }
    }
    Ok(())
}
