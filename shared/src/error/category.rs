//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the error code range:
/// - 0xxx: General errors
/// - 1xxx: Order errors
/// - 2xxx: Pricing errors
/// - 3xxx: Scheduling errors
/// - 4xxx: Cart errors
/// - 5xxx: Billing errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Order errors (1xxx)
    Order,
    /// Pricing errors (2xxx)
    Pricing,
    /// Scheduling errors (3xxx)
    Scheduling,
    /// Cart errors (4xxx)
    Cart,
    /// Billing errors (5xxx)
    Billing,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Order,
            2000..3000 => Self::Pricing,
            3000..4000 => Self::Scheduling,
            4000..5000 => Self::Cart,
            5000..6000 => Self::Billing,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Order => "order",
            Self::Pricing => "pricing",
            Self::Scheduling => "scheduling",
            Self::Cart => "cart",
            Self::Billing => "billing",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Pricing);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Scheduling);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Cart);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Billing);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::ItemNotFound.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::InvalidPrice.category(), ErrorCategory::Pricing);
        assert_eq!(ErrorCode::SlotTaken.category(), ErrorCategory::Scheduling);
        assert_eq!(ErrorCode::CartEmpty.category(), ErrorCategory::Cart);
        assert_eq!(
            ErrorCode::BillingRecordNotFound.category(),
            ErrorCategory::Billing
        );
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::General.name(), "general");
        assert_eq!(ErrorCategory::Scheduling.name(), "scheduling");
        assert_eq!(ErrorCategory::System.name(), "system");
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Scheduling).unwrap();
        assert_eq!(json, "\"scheduling\"");

        let category: ErrorCategory = serde_json::from_str("\"billing\"").unwrap();
        assert_eq!(category, ErrorCategory::Billing);
    }
}
