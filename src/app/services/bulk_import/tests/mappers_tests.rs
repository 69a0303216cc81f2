//! Tests for the column cell mappers and record assembly

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::app::models::RecordKind;
use crate::app::services::bulk_import::mappers::{CellMapper, MappedValue, build_record};

#[test]
fn test_blank_cells_map_to_absent() {
    for mapper in [
        CellMapper::Code,
        CellMapper::Text,
        CellMapper::Date,
        CellMapper::Decimal,
    ] {
        assert_eq!(mapper.apply("").unwrap(), MappedValue::Absent);
        assert_eq!(mapper.apply("   ").unwrap(), MappedValue::Absent);
    }
}

#[test]
fn test_code_mapper_uppercases() {
    assert_eq!(
        CellMapper::Code.apply(" bym ").unwrap(),
        MappedValue::Text("BYM".to_string())
    );
}

#[test]
fn test_text_mapper_keeps_case() {
    assert_eq!(
        CellMapper::Text.apply(" Minsk district ").unwrap(),
        MappedValue::Text("Minsk district".to_string())
    );
}

#[test]
fn test_ring_number_mapper_keeps_padding_dots() {
    assert_eq!(
        CellMapper::RingNumber.apply("...xa12345").unwrap(),
        MappedValue::Text("...XA12345".to_string())
    );
}

#[test]
fn test_date_mapper_accepts_common_formats() {
    let expected = MappedValue::Date(NaiveDate::from_ymd_opt(2019, 8, 5).unwrap());
    assert_eq!(CellMapper::Date.apply("2019-08-05").unwrap(), expected);
    assert_eq!(CellMapper::Date.apply("05.08.2019").unwrap(), expected);
    assert_eq!(CellMapper::Date.apply("05/08/2019").unwrap(), expected);
}

#[test]
fn test_date_mapper_rejects_garbage() {
    let error = CellMapper::Date.apply("yesterday").unwrap_err();
    assert!(error.contains("yesterday"));
    assert!(CellMapper::Date.apply("2019-13-40").is_err());
}

#[test]
fn test_time_mapper() {
    assert_eq!(
        CellMapper::Time.apply("06:30").unwrap(),
        MappedValue::Time(NaiveTime::from_hms_opt(6, 30, 0).unwrap())
    );
    assert_eq!(
        CellMapper::Time.apply("6").unwrap(),
        MappedValue::Time(NaiveTime::from_hms_opt(6, 0, 0).unwrap())
    );
    assert!(CellMapper::Time.apply("25").is_err());
    assert!(CellMapper::Time.apply("noon").is_err());
}

#[test]
fn test_decimal_mapper_tolerates_comma_separator() {
    assert_eq!(
        CellMapper::Decimal.apply("53.5").unwrap(),
        MappedValue::Decimal(53.5)
    );
    assert_eq!(
        CellMapper::Decimal.apply("53,5").unwrap(),
        MappedValue::Decimal(53.5)
    );
    assert!(CellMapper::Decimal.apply("north").is_err());
}

#[test]
fn test_integer_mapper() {
    assert_eq!(
        CellMapper::Integer.apply("270").unwrap(),
        MappedValue::Integer(270)
    );
    assert!(CellMapper::Integer.apply("-3").is_err());
    assert!(CellMapper::Integer.apply("12.5").is_err());
}

#[test]
fn test_mapper_selection_per_column() {
    assert_eq!(CellMapper::for_column("date"), CellMapper::Date);
    assert_eq!(CellMapper::for_column("latitude"), CellMapper::Decimal);
    assert_eq!(CellMapper::for_column("distance"), CellMapper::Integer);
    assert_eq!(CellMapper::for_column("ring_number"), CellMapper::RingNumber);
    assert_eq!(CellMapper::for_column("remarks"), CellMapper::Text);
    assert_eq!(CellMapper::for_column("species"), CellMapper::Code);
}

#[test]
fn test_build_record_maps_worksheet_columns_to_exchange_fields() {
    let mut values = HashMap::new();
    values.insert(
        "ring_number".to_string(),
        MappedValue::Text("...XA12345".to_string()),
    );
    values.insert("species".to_string(), MappedValue::Text("12430".to_string()));
    values.insert("sex".to_string(), MappedValue::Text("F".to_string()));
    values.insert("age".to_string(), MappedValue::Text("3".to_string()));
    values.insert(
        "date".to_string(),
        MappedValue::Date(NaiveDate::from_ymd_opt(2019, 8, 5).unwrap()),
    );
    values.insert("latitude".to_string(), MappedValue::Decimal(53.5));
    values.insert("longitude".to_string(), MappedValue::Decimal(27.25));

    let record = build_record(RecordKind::Ring, &values);

    assert_eq!(record.ring_number, Some("...XA12345".to_string()));
    assert_eq!(record.species_mentioned, Some("12430".to_string()));
    assert_eq!(record.sex_mentioned, Some("F".to_string()));
    assert_eq!(record.age_mentioned, Some("3".to_string()));
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2019, 8, 5));
    assert_eq!(record.latitude, Some(53.5));
    assert_eq!(record.longitude, Some(27.25));
    // Columns the worksheet does not carry stay absent
    assert_eq!(record.condition, None);
    assert_eq!(record.distance, None);
}

#[test]
fn test_build_record_observation_fields() {
    let mut values = HashMap::new();
    values.insert("condition".to_string(), MappedValue::Text("8".to_string()));
    values.insert(
        "circumstances".to_string(),
        MappedValue::Text("20".to_string()),
    );
    values.insert("distance".to_string(), MappedValue::Integer(12));
    values.insert("direction".to_string(), MappedValue::Integer(270));

    let record = build_record(RecordKind::Observation, &values);

    assert_eq!(record.condition, Some("8".to_string()));
    assert_eq!(record.circumstances, Some("20".to_string()));
    assert_eq!(record.distance, Some(12));
    assert_eq!(record.direction, Some(270));
}
