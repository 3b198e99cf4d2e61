//! Shared types for the Atelier order system
//!
//! Common types used by the server crate: the unified error system,
//! the approval-status table, service domain types and the derived
//! billing/cart/appointment models.

pub mod error;
pub mod models;
pub mod order;
pub mod types;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use order::{ApprovalStatus, ServiceDetails, ServiceRequest, ServiceType};
