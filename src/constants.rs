//! Application constants for the EURING processor
//!
//! This module contains the EURING exchange-line layout, coordinate and date
//! sentinels, worksheet column lists, and default values used throughout the
//! application.

// =============================================================================
// EURING Exchange Line Layout
// =============================================================================

/// Total number of pipe-delimited fields in one EURING exchange line
pub const EURING_FIELD_COUNT: usize = 58;

/// Number of `|` separators in a well-formed line
pub const EURING_SEPARATOR_COUNT: usize = EURING_FIELD_COUNT - 1;

/// Field separator of the exchange line
pub const EURING_FIELD_SEPARATOR: char = '|';

/// Zero-based positions of the fields this deployment populates.
///
/// Fields 1-33 of the exchange standard carry the ringing data; the biometric
/// block (fields 34 onwards) is not supported and stays empty, except for the
/// place-name and remarks fields near the end of the line.
pub mod field_index {
    pub const RING_SCHEME: usize = 0;
    pub const IDENTIFICATION_METHOD: usize = 1;
    pub const RING_NUMBER: usize = 2;
    pub const METAL_RING_VERIFICATION: usize = 3;
    pub const METAL_RING_INFO: usize = 4;
    pub const OTHER_MARKS: usize = 5;
    pub const SPECIES_MENTIONED: usize = 6;
    pub const SPECIES_CONCLUDED: usize = 7;
    pub const MANIPULATED: usize = 8;
    pub const MOVED_BEFORE: usize = 9;
    pub const CATCHING_METHOD: usize = 10;
    pub const CATCHING_LURES: usize = 11;
    pub const SEX_MENTIONED: usize = 12;
    pub const SEX_CONCLUDED: usize = 13;
    pub const AGE_MENTIONED: usize = 14;
    pub const AGE_CONCLUDED: usize = 15;
    pub const STATUS: usize = 16;
    pub const BROOD_SIZE: usize = 17;
    pub const PULLUS_AGE: usize = 18;
    pub const PULLUS_AGE_ACCURACY: usize = 19;
    pub const DATE: usize = 20;
    pub const DATE_ACCURACY: usize = 21;
    pub const TIME: usize = 22;
    pub const PLACE_CODE: usize = 23;
    pub const COORDINATES: usize = 24;
    pub const COORDINATE_ACCURACY: usize = 25;
    pub const CONDITION: usize = 26;
    pub const CIRCUMSTANCES: usize = 27;
    pub const CIRCUMSTANCES_PRESUMED: usize = 28;
    pub const EURING_IDENTIFIER: usize = 29;
    pub const DISTANCE: usize = 30;
    pub const DIRECTION: usize = 31;
    pub const ELAPSED_TIME: usize = 32;
    pub const PLACE_NAME: usize = 54;
    pub const REMARKS: usize = 55;
}

// =============================================================================
// Sub-encoding Widths and Sentinels
// =============================================================================

/// Encoded geographic coordinates: `+DDMMSS+DDDMMSS`
pub const COORDINATES_LEN: usize = 15;

/// Length of the latitude half (`+DDMMSS`)
pub const LATITUDE_LEN: usize = 7;

/// Placeholder for an absent date (`DDMMYYYY` width)
pub const DATE_SENTINEL: &str = "--------";

/// Placeholder for an absent time (`HHMM` width)
pub const TIME_SENTINEL: &str = "----";

/// Minutes are never encoded; the time field always carries this suffix
pub const MINUTE_SENTINEL: &str = "--";

/// Fixed widths of the derived numeric fields
pub const DISTANCE_WIDTH: usize = 5;
pub const DIRECTION_WIDTH: usize = 3;
pub const ELAPSED_TIME_WIDTH: usize = 5;

/// Ring identification numbers are always exactly this long
pub const RING_NUMBER_LEN: usize = 10;

// =============================================================================
// Worksheet Column Lists
// =============================================================================

/// Expected header row of a ring-record worksheet, in order.
///
/// Header matching is by exact name; any missing name aborts the upload.
pub const RING_WORKSHEET_COLUMNS: &[&str] = &[
    "ring_number",
    "ring_scheme",
    "species",
    "sex",
    "age",
    "status",
    "catching_method",
    "catching_lures",
    "manipulated",
    "brood_size",
    "pullus_age",
    "date",
    "time",
    "place_code",
    "place_name",
    "latitude",
    "longitude",
    "remarks",
];

/// Expected header row of an observation-record worksheet, in order
pub const OBSERVATION_WORKSHEET_COLUMNS: &[&str] = &[
    "ring_number",
    "ring_scheme",
    "metal_ring_info",
    "other_marks",
    "species",
    "sex",
    "age",
    "status",
    "condition",
    "circumstances",
    "manipulated",
    "moved_before",
    "date",
    "time",
    "place_code",
    "place_name",
    "latitude",
    "longitude",
    "distance",
    "direction",
    "elapsed_time",
    "remarks",
];

// =============================================================================
// Defaults
// =============================================================================

/// Descending batch sizes the migration funnel retries through.
/// The first size is the chunk size of the initial pass.
pub const DEFAULT_FUNNEL_SIZES: &[usize] = &[100, 10, 1];

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE_NAME: &str = "euring.db";
