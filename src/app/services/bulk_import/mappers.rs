//! Column-specific cell mappers and record assembly
//!
//! Every expected column runs its cell through a mapper that normalizes and
//! type-casts the raw text (uppercase a code, numeric-cast a coordinate,
//! parse a date). Mapper failures are per-field format errors; they exclude
//! the row from later stages but never abort the upload.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::app::models::{EuringRecord, RecordKind};

/// Typed value produced by a cell mapper
#[derive(Debug, Clone, PartialEq)]
pub enum MappedValue {
    /// Blank cell
    Absent,
    /// Normalized text
    Text(String),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Decimal number (coordinates)
    Decimal(f64),
    /// Non-negative integer (distance, direction, elapsed time)
    Integer(u32),
}

/// Mapper applied to one worksheet column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMapper {
    /// Uppercase-normalized dictionary code
    Code,
    /// Free text, trimmed only
    Text,
    /// Ring identification number, uppercased with padding dots kept
    RingNumber,
    /// Date cell: ISO `YYYY-MM-DD` or the common `DD.MM.YYYY` / `DD/MM/YYYY`
    Date,
    /// Time cell: `HH:MM` or a bare hour
    Time,
    /// Decimal cell; a comma decimal separator is tolerated
    Decimal,
    /// Integer cell
    Integer,
}

impl CellMapper {
    /// Select the mapper for an expected column name
    pub fn for_column(column: &str) -> Self {
        match column {
            "date" => CellMapper::Date,
            "time" => CellMapper::Time,
            "latitude" | "longitude" => CellMapper::Decimal,
            "distance" | "direction" | "elapsed_time" => CellMapper::Integer,
            "ring_number" => CellMapper::RingNumber,
            "place_name" | "remarks" => CellMapper::Text,
            _ => CellMapper::Code,
        }
    }

    /// Map one raw cell. A blank cell is `Absent`; a cell the mapper cannot
    /// interpret is a format error described by the returned message.
    pub fn apply(self, raw: &str) -> std::result::Result<MappedValue, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(MappedValue::Absent);
        }

        match self {
            CellMapper::Code => Ok(MappedValue::Text(trimmed.to_ascii_uppercase())),
            CellMapper::Text => Ok(MappedValue::Text(trimmed.to_string())),
            CellMapper::RingNumber => Ok(MappedValue::Text(trimmed.to_ascii_uppercase())),
            CellMapper::Date => parse_date(trimmed).map(MappedValue::Date),
            CellMapper::Time => parse_time(trimmed).map(MappedValue::Time),
            CellMapper::Decimal => {
                let normalized = trimmed.replace(',', ".");
                normalized
                    .parse::<f64>()
                    .map(MappedValue::Decimal)
                    .map_err(|_| format!("'{}' is not a decimal number", trimmed))
            }
            CellMapper::Integer => trimmed
                .parse::<u32>()
                .map(MappedValue::Integer)
                .map_err(|_| format!("'{}' is not a non-negative integer", trimmed)),
        }
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    for format in ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    Err(format!(
        "'{}' is not a date (expected YYYY-MM-DD, DD.MM.YYYY or DD/MM/YYYY)",
        value
    ))
}

fn parse_time(value: &str) -> std::result::Result<NaiveTime, String> {
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M") {
        return Ok(time);
    }
    if let Ok(hour) = value.parse::<u32>() {
        if let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) {
            return Ok(time);
        }
    }
    Err(format!("'{}' is not a time (expected HH:MM or HH)", value))
}

/// Assemble a record from the mapped column values of one surviving row.
///
/// Columns absent from the kind's worksheet simply stay `None` on the
/// record; the species, sex and age columns populate the "as mentioned"
/// fields of the exchange shape.
pub fn build_record(kind: RecordKind, values: &HashMap<String, MappedValue>) -> EuringRecord {
    let mut record = EuringRecord {
        ring_number: take_text(values, "ring_number"),
        ring_scheme: take_text(values, "ring_scheme"),
        metal_ring_info: take_text(values, "metal_ring_info"),
        other_marks: take_text(values, "other_marks"),
        species_mentioned: take_text(values, "species"),
        manipulated: take_text(values, "manipulated"),
        moved_before: take_text(values, "moved_before"),
        catching_method: take_text(values, "catching_method"),
        catching_lures: take_text(values, "catching_lures"),
        sex_mentioned: take_text(values, "sex"),
        age_mentioned: take_text(values, "age"),
        status: take_text(values, "status"),
        brood_size: take_text(values, "brood_size"),
        pullus_age: take_text(values, "pullus_age"),
        date: take_date(values, "date"),
        time: take_time(values, "time"),
        place_code: take_text(values, "place_code"),
        place_name: take_text(values, "place_name"),
        latitude: take_decimal(values, "latitude"),
        longitude: take_decimal(values, "longitude"),
        distance: take_integer(values, "distance"),
        direction: take_integer(values, "direction"),
        elapsed_time: take_integer(values, "elapsed_time"),
        remarks: take_text(values, "remarks"),
        ..Default::default()
    };

    if kind == RecordKind::Observation {
        record.condition = take_text(values, "condition");
        record.circumstances = take_text(values, "circumstances");
    }

    record
}

/// Render a record back into worksheet cells, the inverse of
/// [`build_record`]. Used when exporting stored records as a worksheet.
pub fn record_to_cells(kind: RecordKind, record: &EuringRecord) -> Vec<String> {
    kind.worksheet_columns()
        .iter()
        .map(|&column| match column {
            "ring_number" => record.ring_number.clone().unwrap_or_default(),
            "ring_scheme" => record.ring_scheme.clone().unwrap_or_default(),
            "metal_ring_info" => record.metal_ring_info.clone().unwrap_or_default(),
            "other_marks" => record.other_marks.clone().unwrap_or_default(),
            "species" => record.species_mentioned.clone().unwrap_or_default(),
            "sex" => record.sex_mentioned.clone().unwrap_or_default(),
            "age" => record.age_mentioned.clone().unwrap_or_default(),
            "status" => record.status.clone().unwrap_or_default(),
            "condition" => record.condition.clone().unwrap_or_default(),
            "circumstances" => record.circumstances.clone().unwrap_or_default(),
            "manipulated" => record.manipulated.clone().unwrap_or_default(),
            "moved_before" => record.moved_before.clone().unwrap_or_default(),
            "catching_method" => record.catching_method.clone().unwrap_or_default(),
            "catching_lures" => record.catching_lures.clone().unwrap_or_default(),
            "brood_size" => record.brood_size.clone().unwrap_or_default(),
            "pullus_age" => record.pullus_age.clone().unwrap_or_default(),
            "date" => record
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            "time" => record
                .time
                .map(|time| time.format("%H:%M").to_string())
                .unwrap_or_default(),
            "place_code" => record.place_code.clone().unwrap_or_default(),
            "place_name" => record.place_name.clone().unwrap_or_default(),
            "latitude" => record.latitude.map(|v| v.to_string()).unwrap_or_default(),
            "longitude" => record.longitude.map(|v| v.to_string()).unwrap_or_default(),
            "distance" => record.distance.map(|v| v.to_string()).unwrap_or_default(),
            "direction" => record.direction.map(|v| v.to_string()).unwrap_or_default(),
            "elapsed_time" => record
                .elapsed_time
                .map(|v| v.to_string())
                .unwrap_or_default(),
            "remarks" => record.remarks.clone().unwrap_or_default(),
            _ => String::new(),
        })
        .collect()
}

fn take_text(values: &HashMap<String, MappedValue>, column: &str) -> Option<String> {
    match values.get(column) {
        Some(MappedValue::Text(text)) => Some(text.clone()),
        _ => None,
    }
}

fn take_date(values: &HashMap<String, MappedValue>, column: &str) -> Option<NaiveDate> {
    match values.get(column) {
        Some(MappedValue::Date(date)) => Some(*date),
        _ => None,
    }
}

fn take_time(values: &HashMap<String, MappedValue>, column: &str) -> Option<NaiveTime> {
    match values.get(column) {
        Some(MappedValue::Time(time)) => Some(*time),
        _ => None,
    }
}

fn take_decimal(values: &HashMap<String, MappedValue>, column: &str) -> Option<f64> {
    match values.get(column) {
        Some(MappedValue::Decimal(value)) => Some(*value),
        _ => None,
    }
}

fn take_integer(values: &HashMap<String, MappedValue>, column: &str) -> Option<u32> {
    match values.get(column) {
        Some(MappedValue::Integer(value)) => Some(*value),
        _ => None,
    }
}
