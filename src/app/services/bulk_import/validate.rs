//! Static constraint validation and reference-code validation
//!
//! FormatValidate checks the materialized record against its static rules:
//! required fields, exact lengths, character classes and numeric ranges.
//! ReferenceValidate then checks every coded field for membership in its
//! dictionary id-set served by the reference cache. Both stages collect
//! row-addressable diagnostics and never abort the upload.

use std::sync::LazyLock;

use regex::Regex;

use crate::app::models::{EuringRecord, IdCharClass, RecordKind};
use crate::app::services::reference_cache::ReferenceCache;
use crate::constants::RING_NUMBER_LEN;
use crate::Result;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static ALPHABETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid regex"));
static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));
static ALPHANUMERIC_OR_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("valid regex"));
static RING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.]+$").expect("valid regex"));

/// One static-constraint violation, addressable by field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Record field the violation applies to
    pub field: String,

    /// Human-readable rule description
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a record against its static constraints.
///
/// Returns every violation rather than stopping at the first, so the
/// uploader sees the full picture for the row.
pub fn validate_constraints(record: &EuringRecord, _kind: RecordKind) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    // Required fields
    match record.ring_number.as_deref() {
        None => violations.push(FieldViolation::new("ring_number", "value is required")),
        Some(ring_number) => {
            if ring_number.chars().count() != RING_NUMBER_LEN {
                violations.push(FieldViolation::new(
                    "ring_number",
                    format!(
                        "must be exactly {} characters, got {}",
                        RING_NUMBER_LEN,
                        ring_number.chars().count()
                    ),
                ));
            } else if !RING_NUMBER.is_match(ring_number) {
                violations.push(FieldViolation::new(
                    "ring_number",
                    "may contain only letters, digits and padding dots",
                ));
            }
        }
    }
    if record.species_mentioned.is_none() {
        violations.push(FieldViolation::new("species", "value is required"));
    }
    if record.date.is_none() {
        violations.push(FieldViolation::new("date", "value is required"));
    }

    // Coded fields follow their dictionary's documented id shape
    for (field, table, value) in record.coded_fields() {
        let Some(value) = value else { continue };
        let rule = table.id_rule();

        if value.chars().count() != rule.len {
            violations.push(FieldViolation::new(
                field,
                format!(
                    "must be exactly {} character{}, got '{}'",
                    rule.len,
                    if rule.len == 1 { "" } else { "s" },
                    value
                ),
            ));
            continue;
        }
        if !class_regex(rule.class).is_match(value) {
            violations.push(FieldViolation::new(
                field,
                format!("'{}' contains characters outside {}", value, class_name(rule.class)),
            ));
        }
    }

    // Coordinates come as a pair within the documented ranges
    match (record.latitude, record.longitude) {
        (Some(_), None) | (None, Some(_)) => violations.push(FieldViolation::new(
            "coordinates",
            "latitude and longitude must be provided together",
        )),
        _ => {}
    }
    if let Some(latitude) = record.latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            violations.push(FieldViolation::new(
                "latitude",
                format!("{} is outside the range -90 to 90", latitude),
            ));
        }
    }
    if let Some(longitude) = record.longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            violations.push(FieldViolation::new(
                "longitude",
                format!("{} is outside the range -180 to 180", longitude),
            ));
        }
    }

    // Derived numeric fields fit their fixed widths
    if let Some(distance) = record.distance {
        if distance > 99_999 {
            violations.push(FieldViolation::new(
                "distance",
                format!("{} does not fit 5 digits", distance),
            ));
        }
    }
    if let Some(direction) = record.direction {
        if direction > 360 {
            violations.push(FieldViolation::new(
                "direction",
                format!("{} is outside the range 0 to 360", direction),
            ));
        }
    }
    if let Some(elapsed_time) = record.elapsed_time {
        if elapsed_time > 99_999 {
            violations.push(FieldViolation::new(
                "elapsed_time",
                format!("{} does not fit 5 digits", elapsed_time),
            ));
        }
    }

    // Nest data is numeric, at most two digits
    for (field, value) in [
        ("brood_size", record.brood_size.as_deref()),
        ("pullus_age", record.pullus_age.as_deref()),
    ] {
        if let Some(value) = value {
            if value.len() > 2 || !DIGITS.is_match(value) {
                violations.push(FieldViolation::new(
                    field,
                    format!("'{}' must be 1 or 2 digits", value),
                ));
            }
        }
    }

    violations
}

/// Check every coded field of a surviving row for membership in its
/// dictionary id-set.
///
/// Returns the failing code categories (dictionary table keys), one per
/// coded field whose value is unknown.
pub async fn validate_reference_codes(
    record: &EuringRecord,
    cache: &ReferenceCache,
) -> Result<Vec<String>> {
    let mut failing = Vec::new();

    for (field, table, value) in record.coded_fields() {
        let Some(value) = value else { continue };
        let ids = cache.get_all_ids(table).await?;
        if !ids.contains(value) {
            failing.push(field.to_string());
        }
    }

    Ok(failing)
}

fn class_regex(class: IdCharClass) -> &'static Regex {
    match class {
        IdCharClass::Digits => &DIGITS,
        IdCharClass::Alphabetic => &ALPHABETIC,
        IdCharClass::Alphanumeric => &ALPHANUMERIC,
        IdCharClass::AlphanumericOrHyphen => &ALPHANUMERIC_OR_HYPHEN,
    }
}

fn class_name(class: IdCharClass) -> &'static str {
    match class {
        IdCharClass::Digits => "digits",
        IdCharClass::Alphabetic => "letters",
        IdCharClass::Alphanumeric => "letters and digits",
        IdCharClass::AlphanumericOrHyphen => "letters, digits and hyphens",
    }
}
