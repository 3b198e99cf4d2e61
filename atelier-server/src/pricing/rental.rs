//! Rental bundle cost formula
//!
//! Rental pricing is blocked in fixed 3-day increments reflecting garment
//! turnaround and cleaning cycles; there is no continuous daily rate.

use crate::orders::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::order::RentalItem;

/// Minimum rentable duration in days
pub const MIN_RENTAL_DAYS: i64 = 3;

/// Cost for one garment over a duration.
///
/// The duration is floored to the nearest lower multiple of 3; durations
/// under 3 days yield 0, and callers must reject the booking in that case.
pub fn rental_cost(duration_days: i64, base_price_per_3_days: f64) -> f64 {
    if duration_days < MIN_RENTAL_DAYS {
        return 0.0;
    }
    let blocks = duration_days / MIN_RENTAL_DAYS;
    to_f64(Decimal::from(blocks) * to_decimal(base_price_per_3_days))
}

/// Bundle cost: each member priced individually over the shared duration
pub fn bundle_cost(items: &[RentalItem], duration_days: i64) -> f64 {
    let total = items.iter().fold(Decimal::ZERO, |acc, item| {
        acc + to_decimal(rental_cost(duration_days, item.base_price_per_3_days))
    });
    to_f64(total)
}

/// Bundle down payment: the sum of each member's configured deposit,
/// not derived from the rental formula
pub fn bundle_down_payment(items: &[RentalItem]) -> f64 {
    let total = items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + to_decimal(item.down_payment));
    to_f64(total)
}
