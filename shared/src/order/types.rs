//! Service domain types
//!
//! The `ServiceDetails` tagged union replaces the source system's free-form
//! `specific_data` blobs: each service type carries its own typed shape,
//! validated once at the cart boundary instead of optimistically deep in
//! view code.

use crate::error::{AppError, AppResult, ErrorCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four kinds of work the store takes in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[default]
    Customization,
    Repair,
    DryCleaning,
    Rental,
}

impl ServiceType {
    /// Canonical wire value (snake_case, matches serde)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customization => "customization",
            Self::Repair => "repair",
            Self::DryCleaning => "dry_cleaning",
            Self::Rental => "rental",
        }
    }

    /// Strict parse of a canonical wire value
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "customization" => Some(Self::Customization),
            "repair" => Some(Self::Repair),
            "dry_cleaning" => Some(Self::DryCleaning),
            "rental" => Some(Self::Rental),
            _ => None,
        }
    }

    /// Parse a path/query value, rejecting unknown types
    pub fn parse(raw: &str) -> AppResult<Self> {
        Self::from_raw(raw).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ValidationFailed,
                format!("Unknown service type: {}", raw),
            )
        })
    }

    /// Normalize a raw value at the engine boundary.
    ///
    /// Missing, empty and unrecognized values fall back to `customization`,
    /// mirroring the status normalization in one explicit place.
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(Self::from_raw)
            .unwrap_or_default()
    }

    /// Human-readable label for display
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Customization => "Customization",
            Self::Repair => "Repair",
            Self::DryCleaning => "Dry Cleaning",
            Self::Rental => "Rental",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Damage severity for repair requests
///
/// Unknown severities are represented as `None` on the request; the pricing
/// engine then treats the estimate as unavailable rather than guessing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DamageLevel {
    Minor,
    Moderate,
    Major,
    Severe,
}

impl DamageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Major => "major",
            Self::Severe => "severe",
        }
    }
}

/// A priced pick from the store catalog (garment style or fabric)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSelection {
    pub name: String,
    pub price: f64,
}

/// One garment in a rental bundle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RentalItem {
    pub name: String,
    /// Rental price for one 3-day block
    pub base_price_per_3_days: f64,
    /// Configured deposit for this garment, not derived from the formula
    pub down_payment: f64,
}

/// Service-specific request payload, tagged by service type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "service_type", rename_all = "snake_case")]
pub enum ServiceDetails {
    Customization {
        #[serde(skip_serializing_if = "Option::is_none")]
        garment: Option<CatalogSelection>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fabric: Option<CatalogSelection>,
        #[serde(skip_serializing_if = "Option::is_none")]
        design_notes: Option<String>,
    },
    Repair {
        #[serde(skip_serializing_if = "Option::is_none")]
        damage_level: Option<DamageLevel>,
        damage_description: String,
    },
    DryCleaning {
        garment_type: String,
        /// Published price for this garment type, if it is on the list
        #[serde(skip_serializing_if = "Option::is_none")]
        listed_price: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        special_instructions: Option<String>,
    },
    Rental {
        /// Bundle members sharing one date range and one aggregate price
        items: Vec<RentalItem>,
        rental_start: NaiveDate,
        rental_end: NaiveDate,
    },
}

impl ServiceDetails {
    /// The service type this payload belongs to
    pub fn service_type(&self) -> ServiceType {
        match self {
            Self::Customization { .. } => ServiceType::Customization,
            Self::Repair { .. } => ServiceType::Repair,
            Self::DryCleaning { .. } => ServiceType::DryCleaning,
            Self::Rental { .. } => ServiceType::Rental,
        }
    }

    /// Rental span in days, `None` for non-rental payloads
    pub fn rental_duration_days(&self) -> Option<i64> {
        match self {
            Self::Rental {
                rental_start,
                rental_end,
                ..
            } => Some((*rental_end - *rental_start).num_days()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_normalize() {
        assert_eq!(ServiceType::normalize(None), ServiceType::Customization);
        assert_eq!(ServiceType::normalize(Some("")), ServiceType::Customization);
        assert_eq!(
            ServiceType::normalize(Some("nonsense")),
            ServiceType::Customization
        );
        assert_eq!(
            ServiceType::normalize(Some("dry_cleaning")),
            ServiceType::DryCleaning
        );
        assert_eq!(ServiceType::normalize(Some("rental")), ServiceType::Rental);
    }

    #[test]
    fn test_service_type_parse_rejects_unknown() {
        assert!(ServiceType::parse("repair").is_ok());
        let err = ServiceType::parse("laundry").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_details_tagged_serde() {
        let details = ServiceDetails::Repair {
            damage_level: Some(DamageLevel::Moderate),
            damage_description: "Torn seam on left sleeve".to_string(),
        };
        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("\"service_type\":\"repair\""));
        assert!(json.contains("\"damage_level\":\"moderate\""));

        let parsed: ServiceDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, details);
        assert_eq!(parsed.service_type(), ServiceType::Repair);
    }

    #[test]
    fn test_rental_duration() {
        let details = ServiceDetails::Rental {
            items: vec![],
            rental_start: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            rental_end: NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(),
        };
        assert_eq!(details.rental_duration_days(), Some(6));

        let details = ServiceDetails::DryCleaning {
            garment_type: "suit".to_string(),
            listed_price: Some(250.0),
            special_instructions: None,
        };
        assert_eq!(details.rental_duration_days(), None);
    }
}
