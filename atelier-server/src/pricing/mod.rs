//! Pricing engine
//!
//! - [`estimator`]: service-specific price baselines
//! - [`rental`]: the 3-day-block rental bundle formula
//! - [`reconcile`]: price-change detection that forces customer
//!   re-confirmation

pub mod estimator;
pub mod reconcile;
pub mod rental;

pub use estimator::estimate;
pub use reconcile::{PriceEdit, apply_price_edit};
pub use rental::{bundle_cost, bundle_down_payment, rental_cost};
