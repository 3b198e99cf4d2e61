//! Appointment scheduling
//!
//! - [`timetable`]: published slot times per service type
//! - [`allocator`]: the atomic check-and-reserve slot store

pub mod allocator;
pub mod timetable;

pub use allocator::SlotAllocator;
