//! Published appointment times
//!
//! Static per-service slot tables. Fitting-room services share one table;
//! rental pickups run on a sparser schedule around garment preparation.

use shared::models::SlotOption;
use shared::order::ServiceType;

/// Fitting and consultation slots (customization, repair, dry cleaning)
const FITTING_TIMES: [&str; 7] = [
    "09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00",
];

/// Rental pickup slots
const RENTAL_TIMES: [&str; 4] = ["10:00", "12:00", "14:00", "16:00"];

/// Published slot values for a service type, in order
pub fn slot_times(service_type: ServiceType) -> &'static [&'static str] {
    match service_type {
        ServiceType::Rental => &RENTAL_TIMES,
        _ => &FITTING_TIMES,
    }
}

/// Whether a time value is a published slot for the service type
pub fn is_published(service_type: ServiceType, time: &str) -> bool {
    slot_times(service_type).contains(&time)
}

/// Display form of a slot value, e.g. `"14:00"` -> `"2:00 PM"`
pub fn display_time(value: &str) -> String {
    match chrono::NaiveTime::parse_from_str(value, "%H:%M") {
        Ok(t) => t.format("%-I:%M %p").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Build the full (unfiltered) option list for a service type
pub fn all_options(service_type: ServiceType) -> Vec<SlotOption> {
    slot_times(service_type)
        .iter()
        .map(|&value| SlotOption {
            value: value.to_string(),
            display: display_time(value),
        })
        .collect()
}
