//! Test utilities shared across the codec test modules

use chrono::{NaiveDate, NaiveTime};

use crate::EuringRecord;

mod coordinates_tests;
mod dates_tests;

/// Helper to create a record populated in every supported field.
///
/// Coordinates are DMS-exact and the time is hour-exact so the record
/// round-trips through the exchange encoding without loss.
pub fn create_full_record() -> EuringRecord {
    EuringRecord {
        ring_scheme: Some("BYM".to_string()),
        identification_method: Some("A0".to_string()),
        ring_number: Some("...XA12345".to_string()),
        metal_ring_verification: Some("1".to_string()),
        metal_ring_info: Some("1".to_string()),
        other_marks: Some("ZZ".to_string()),
        species_mentioned: Some("12430".to_string()),
        species_concluded: Some("12430".to_string()),
        manipulated: Some("N".to_string()),
        moved_before: Some("0".to_string()),
        catching_method: Some("M".to_string()),
        catching_lures: Some("N".to_string()),
        sex_mentioned: Some("F".to_string()),
        sex_concluded: Some("F".to_string()),
        age_mentioned: Some("3".to_string()),
        age_concluded: Some("4".to_string()),
        status: Some("N".to_string()),
        brood_size: Some("05".to_string()),
        pullus_age: Some("12".to_string()),
        pullus_age_accuracy: Some("1".to_string()),
        date: NaiveDate::from_ymd_opt(2019, 8, 5),
        date_accuracy: Some("0".to_string()),
        time: NaiveTime::from_hms_opt(6, 0, 0),
        place_code: Some("BY01".to_string()),
        latitude: Some(53.5),
        longitude: Some(27.25),
        coordinate_accuracy: Some("0".to_string()),
        condition: Some("8".to_string()),
        circumstances: Some("20".to_string()),
        circumstances_presumed: Some("0".to_string()),
        euring_identifier: Some("4".to_string()),
        distance: Some(12),
        direction: Some(270),
        elapsed_time: Some(365),
        place_name: Some("Minsk district".to_string()),
        remarks: Some("net capture".to_string()),
    }
}
