//! Derived and referenced models
//!
//! - [`appointment`]: bookable slot types (owned by the scheduler)
//! - [`billing`]: the derived payment-status projection
//! - [`cart`]: pre-submission cart entries

pub mod appointment;
pub mod billing;
pub mod cart;

pub use appointment::{AppointmentSlot, SlotOption};
pub use billing::{BillingAction, BillingEvent, BillingRecord, PaymentStatus, derive_status};
pub use cart::{CartEntry, CartEntryInput, SubmittedOrder};
