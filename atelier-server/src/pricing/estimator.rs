//! Service-specific price baselines
//!
//! An estimate is the system-computed customer-facing price. When the
//! inputs are incomplete (unknown damage level, missing fabric or garment
//! selection, unlisted garment type) the estimate is unavailable and the
//! caller must not fabricate a fallback.

use super::rental;
use crate::orders::money::{to_decimal, to_f64};
use shared::order::{DamageLevel, ServiceDetails};

/// Repair baseline by damage severity
pub fn damage_base_price(level: DamageLevel) -> f64 {
    match level {
        DamageLevel::Minor => 300.0,
        DamageLevel::Moderate => 500.0,
        DamageLevel::Major => 800.0,
        DamageLevel::Severe => 1200.0,
    }
}

/// Compute the estimate for a request, if one is available
pub fn estimate(details: &ServiceDetails) -> Option<f64> {
    match details {
        ServiceDetails::Repair { damage_level, .. } => damage_level.map(damage_base_price),
        ServiceDetails::Customization {
            garment, fabric, ..
        } => match (garment, fabric) {
            (Some(g), Some(f)) => Some(to_f64(to_decimal(g.price) + to_decimal(f.price))),
            _ => None,
        },
        ServiceDetails::DryCleaning { listed_price, .. } => *listed_price,
        ServiceDetails::Rental {
            items,
            rental_start,
            rental_end,
        } => {
            if items.is_empty() {
                return None;
            }
            let duration = (*rental_end - *rental_start).num_days();
            Some(rental::bundle_cost(items, duration))
        }
    }
}
