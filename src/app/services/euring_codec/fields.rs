//! Field casting utilities for exchange-line fields
//!
//! Decoding is permissive: an empty field is `None`, an unparseable numeric
//! field is `None`, and code values pass through verbatim. Encoding renders
//! absent numeric fields as hyphen runs of the field's fixed width.

use std::str::FromStr;

/// Cast a raw field to an owned string, treating empty as absent
pub fn to_value_or_null(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Cast a raw field to a number, treating empty or unparseable as absent
pub fn to_number_or_null<N: FromStr>(raw: &str) -> Option<N> {
    if raw.is_empty() {
        None
    } else {
        raw.parse::<N>().ok()
    }
}

/// Render a numeric field zero-padded to its fixed width, or as a hyphen run
/// of the same width when absent
pub fn padded_or_hyphens<N: Into<u64>>(value: Option<N>, width: usize) -> String {
    match value {
        Some(n) => format!("{:0width$}", n.into(), width = width),
        None => "-".repeat(width),
    }
}
