//! Unified error codes for the Atelier order system
//!
//! Error codes are shared between the server and the storefront/admin
//! frontends. They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Order errors
//! - 2xxx: Pricing errors
//! - 3xxx: Scheduling errors
//! - 4xxx: Cart errors
//! - 5xxx: Billing errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Order ====================
    /// Order not found
    OrderNotFound = 1001,
    /// Service request item not found
    ItemNotFound = 1002,
    /// No further status transition is available (terminal or unrecognized)
    TransitionUnavailable = 1003,
    /// Request has already been completed
    OrderAlreadyCompleted = 1004,
    /// Request has already been cancelled
    OrderAlreadyCancelled = 1005,
    /// Cancellation is only allowed while pending or accepted
    CancelNotAllowed = 1006,
    /// Item does not belong to the requested service type
    ServiceTypeMismatch = 1007,

    // ==================== 2xxx: Pricing ====================
    /// Price is not a valid monetary amount
    InvalidPrice = 2001,
    /// No estimate can be computed for the request
    EstimateUnavailable = 2002,
    /// Rental duration is below the 3-day minimum
    RentalTooShort = 2003,

    // ==================== 3xxx: Scheduling ====================
    /// Slot is already booked
    SlotTaken = 3001,
    /// Slot not found
    SlotNotFound = 3002,
    /// The store is closed on the requested day
    ClosedDay = 3003,
    /// Time is not a published slot for this service
    SlotUnavailable = 3004,
    /// Slot time has already passed
    SlotInPast = 3005,

    // ==================== 4xxx: Cart ====================
    /// Cart entry not found
    CartEntryNotFound = 4001,
    /// No submittable entries were selected
    CartEmpty = 4002,
    /// Rental bundle has no items
    BundleEmpty = 4003,

    // ==================== 5xxx: Billing ====================
    /// Billing record not found
    BillingRecordNotFound = 5001,
    /// Payment status value is not valid for this service type
    PaymentStatusInvalid = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Operation timeout
    TimeoutError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::ItemNotFound => "Service request not found",
            ErrorCode::TransitionUnavailable => "No further status transition is available",
            ErrorCode::OrderAlreadyCompleted => "Request has already been completed",
            ErrorCode::OrderAlreadyCancelled => "Request has already been cancelled",
            ErrorCode::CancelNotAllowed => {
                "Cancellation is only allowed while pending or accepted"
            }
            ErrorCode::ServiceTypeMismatch => "Item belongs to a different service type",

            // Pricing
            ErrorCode::InvalidPrice => "Price is not a valid monetary amount",
            ErrorCode::EstimateUnavailable => "No estimate is available for this request",
            ErrorCode::RentalTooShort => "Rental duration must be at least 3 days",

            // Scheduling
            ErrorCode::SlotTaken => "Slot is already booked",
            ErrorCode::SlotNotFound => "Slot not found",
            ErrorCode::ClosedDay => "The store is closed on the requested day",
            ErrorCode::SlotUnavailable => "Time is not a published slot for this service",
            ErrorCode::SlotInPast => "Slot time has already passed",

            // Cart
            ErrorCode::CartEntryNotFound => "Cart entry not found",
            ErrorCode::CartEmpty => "No submittable entries were selected",
            ErrorCode::BundleEmpty => "Rental bundle has no items",

            // Billing
            ErrorCode::BillingRecordNotFound => "Billing record not found",
            ErrorCode::PaymentStatusInvalid => "Payment status is not valid for this service",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            1001 => Ok(ErrorCode::OrderNotFound),
            1002 => Ok(ErrorCode::ItemNotFound),
            1003 => Ok(ErrorCode::TransitionUnavailable),
            1004 => Ok(ErrorCode::OrderAlreadyCompleted),
            1005 => Ok(ErrorCode::OrderAlreadyCancelled),
            1006 => Ok(ErrorCode::CancelNotAllowed),
            1007 => Ok(ErrorCode::ServiceTypeMismatch),

            // Pricing
            2001 => Ok(ErrorCode::InvalidPrice),
            2002 => Ok(ErrorCode::EstimateUnavailable),
            2003 => Ok(ErrorCode::RentalTooShort),

            // Scheduling
            3001 => Ok(ErrorCode::SlotTaken),
            3002 => Ok(ErrorCode::SlotNotFound),
            3003 => Ok(ErrorCode::ClosedDay),
            3004 => Ok(ErrorCode::SlotUnavailable),
            3005 => Ok(ErrorCode::SlotInPast),

            // Cart
            4001 => Ok(ErrorCode::CartEntryNotFound),
            4002 => Ok(ErrorCode::CartEmpty),
            4003 => Ok(ErrorCode::BundleEmpty),

            // Billing
            5001 => Ok(ErrorCode::BillingRecordNotFound),
            5002 => Ok(ErrorCode::PaymentStatusInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::TimeoutError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        assert_eq!(ErrorCode::OrderNotFound.code(), 1001);
        assert_eq!(ErrorCode::ItemNotFound.code(), 1002);
        assert_eq!(ErrorCode::TransitionUnavailable.code(), 1003);
        assert_eq!(ErrorCode::CancelNotAllowed.code(), 1006);

        assert_eq!(ErrorCode::InvalidPrice.code(), 2001);
        assert_eq!(ErrorCode::RentalTooShort.code(), 2003);

        assert_eq!(ErrorCode::SlotTaken.code(), 3001);
        assert_eq!(ErrorCode::ClosedDay.code(), 3003);

        assert_eq!(ErrorCode::CartEntryNotFound.code(), 4001);
        assert_eq!(ErrorCode::BillingRecordNotFound.code(), 5001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::SlotTaken.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1003), Ok(ErrorCode::TransitionUnavailable));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::SlotTaken));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(6001), Err(InvalidErrorCode(6001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::SlotTaken).unwrap();
        assert_eq!(json, "3001");

        let code: ErrorCode = serde_json::from_str("3001").unwrap();
        assert_eq!(code, ErrorCode::SlotTaken);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::TransitionUnavailable,
            ErrorCode::SlotTaken,
            ErrorCode::PaymentStatusInvalid,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::SlotTaken.message(), "Slot is already booked");
        assert_eq!(
            ErrorCode::RentalTooShort.message(),
            "Rental duration must be at least 3 days"
        );
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::SlotTaken), "3001");
    }
}
