//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary comparisons and arithmetic go through `Decimal` internally;
//! values are stored and serialized as `f64` rounded to 2 decimal places.

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per request
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate a monetary amount (finite, non-negative, within bounds)
pub fn validate_price(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("{} must be a finite number, got {}", field, value),
        ));
    }
    if value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("{} must be non-negative, got {}", field, value),
        ));
    }
    if value > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!(
                "{} exceeds maximum allowed ({}), got {}",
                field, MAX_PRICE, value
            ),
        ));
    }
    Ok(())
}

/// Whether two amounts differ by more than the monetary tolerance
pub fn diverges(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() > MONEY_TOLERANCE
}
