//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::ItemNotFound
            | Self::SlotNotFound
            | Self::CartEntryNotFound
            | Self::BillingRecordNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (remediable: pick another slot, refresh status)
            Self::AlreadyExists
            | Self::SlotTaken
            | Self::TransitionUnavailable
            | Self::OrderAlreadyCompleted
            | Self::OrderAlreadyCancelled
            | Self::CancelNotAllowed => StatusCode::CONFLICT,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
