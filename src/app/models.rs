//! Data models for EURING record exchange
//!
//! This module contains the core data structures for representing ringing and
//! observation records in their EURING exchange shape, together with the
//! dictionary/reference types both ingestion pipelines validate against.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Exchange Record Structure
// =============================================================================

/// One ringing or observation record in its EURING exchange shape.
///
/// Every field is optional: the codec is permissive and round-trips unknown
/// codes verbatim. Code existence and constraint checks are the import
/// pipeline's responsibility, not the record's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EuringRecord {
    /// Ringing scheme that issued the ring (3 alphabetic characters)
    pub ring_scheme: Option<String>,

    /// Primary identification method (2 alphanumeric characters)
    pub identification_method: Option<String>,

    /// Ring identification number, exactly 10 characters
    pub ring_number: Option<String>,

    /// Verification of the metal ring
    pub metal_ring_verification: Option<String>,

    /// Metal ring information
    pub metal_ring_info: Option<String>,

    /// Other marks information
    pub other_marks: Option<String>,

    /// Species as mentioned by the reporter (5-digit EURING species code)
    pub species_mentioned: Option<String>,

    /// Species as concluded by the scheme
    pub species_concluded: Option<String>,

    /// Manipulated status
    pub manipulated: Option<String>,

    /// Moved before capture/recovery
    pub moved_before: Option<String>,

    /// Catching method
    pub catching_method: Option<String>,

    /// Catching lures
    pub catching_lures: Option<String>,

    /// Sex as mentioned by the reporter
    pub sex_mentioned: Option<String>,

    /// Sex as concluded by the scheme
    pub sex_concluded: Option<String>,

    /// Age as mentioned by the reporter
    pub age_mentioned: Option<String>,

    /// Age as concluded by the scheme
    pub age_concluded: Option<String>,

    /// Status of the bird when caught
    pub status: Option<String>,

    /// Brood size
    pub brood_size: Option<String>,

    /// Pullus age in days
    pub pullus_age: Option<String>,

    /// Accuracy of the pullus age
    pub pullus_age_accuracy: Option<String>,

    /// Date of the encounter; `None` encodes as the all-hyphen sentinel
    pub date: Option<NaiveDate>,

    /// Accuracy of the date
    pub date_accuracy: Option<String>,

    /// Time of the encounter, hour resolution (minutes are never exchanged)
    pub time: Option<NaiveTime>,

    /// EURING place code
    pub place_code: Option<String>,

    /// Latitude in WGS84 decimal degrees, [-90, 90]
    pub latitude: Option<f64>,

    /// Longitude in WGS84 decimal degrees, [-180, 180]
    pub longitude: Option<f64>,

    /// Accuracy of the coordinates
    pub coordinate_accuracy: Option<String>,

    /// Condition of the bird when found
    pub condition: Option<String>,

    /// Circumstances of the encounter
    pub circumstances: Option<String>,

    /// Whether the circumstances are presumed
    pub circumstances_presumed: Option<String>,

    /// EURING code identifier of the encoding revision
    pub euring_identifier: Option<String>,

    /// Derived distance from the ringing place in km (5 digits)
    pub distance: Option<u32>,

    /// Derived direction from the ringing place in degrees (3 digits)
    pub direction: Option<u32>,

    /// Derived elapsed time since ringing in days (5 digits)
    pub elapsed_time: Option<u32>,

    /// Free-text place name
    pub place_name: Option<String>,

    /// Free-text remarks
    pub remarks: Option<String>,
}

impl EuringRecord {
    /// Enumerate the coded fields together with the dictionary table each one
    /// is validated against. Fields without a value are included so callers
    /// can distinguish "absent" from "unknown code".
    pub fn coded_fields(&self) -> Vec<(&'static str, ReferenceTable, Option<&str>)> {
        vec![
            (
                "species",
                ReferenceTable::Species,
                self.species_mentioned.as_deref(),
            ),
            ("sex", ReferenceTable::Sex, self.sex_mentioned.as_deref()),
            ("age", ReferenceTable::Age, self.age_mentioned.as_deref()),
            ("status", ReferenceTable::Status, self.status.as_deref()),
            (
                "catching_method",
                ReferenceTable::CatchingMethod,
                self.catching_method.as_deref(),
            ),
            (
                "catching_lures",
                ReferenceTable::CatchingLures,
                self.catching_lures.as_deref(),
            ),
            (
                "place_code",
                ReferenceTable::PlaceCode,
                self.place_code.as_deref(),
            ),
            (
                "condition",
                ReferenceTable::Condition,
                self.condition.as_deref(),
            ),
            (
                "circumstances",
                ReferenceTable::Circumstances,
                self.circumstances.as_deref(),
            ),
            (
                "manipulated",
                ReferenceTable::Manipulated,
                self.manipulated.as_deref(),
            ),
            (
                "moved_before",
                ReferenceTable::MovedBefore,
                self.moved_before.as_deref(),
            ),
            (
                "metal_ring_info",
                ReferenceTable::MetalRingInfo,
                self.metal_ring_info.as_deref(),
            ),
            (
                "other_marks",
                ReferenceTable::OtherMarks,
                self.other_marks.as_deref(),
            ),
        ]
    }
}

// =============================================================================
// Record Kind
// =============================================================================

/// The two record kinds exchanged via EURING.
///
/// A ring is the physical leg-band record with its ringing attributes; an
/// observation is a sighting/recapture event referencing a ring. Both share
/// the exchange shape; the kind selects worksheet columns, mappers and the
/// destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A ringing event creating the ring record
    Ring,
    /// A sighting or recapture referencing an existing ring
    Observation,
}

impl RecordKind {
    /// Expected worksheet header row for this record kind
    pub fn worksheet_columns(self) -> &'static [&'static str] {
        match self {
            RecordKind::Ring => crate::constants::RING_WORKSHEET_COLUMNS,
            RecordKind::Observation => crate::constants::OBSERVATION_WORKSHEET_COLUMNS,
        }
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ring" | "rings" => Ok(RecordKind::Ring),
            "observation" | "observations" => Ok(RecordKind::Observation),
            _ => Err(Error::configuration(format!(
                "Unknown record kind '{}': must be 'ring' or 'observation'",
                s
            ))),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Ring => write!(f, "ring"),
            RecordKind::Observation => write!(f, "observation"),
        }
    }
}

// =============================================================================
// Exchange Formats
// =============================================================================

/// Closed set of supported import/export formats.
///
/// Dispatch is by `match`, so an unsupported format is a compile-time
/// impossibility rather than a runtime lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeFormat {
    /// EURING exchange text lines
    Euring,
    /// Observation worksheet upload
    XlsObservation,
    /// Ring worksheet upload
    XlsRing,
    /// Empty worksheet template for re-imports
    Template,
}

// =============================================================================
// Dictionary / Reference Types
// =============================================================================

/// One row of a dictionary table: a code and its trilingual description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Code identifier; numeric ids are stored stringified
    pub id: String,

    /// English description
    pub desc_eng: String,

    /// Russian description
    pub desc_rus: String,

    /// Belarusian description
    pub desc_byn: String,
}

/// A dictionary row projected down to one description language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedEntry {
    /// Code identifier
    pub id: String,

    /// Description in the requested language
    pub desc: String,
}

/// Description languages carried by every dictionary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English
    Eng,
    /// Russian
    Rus,
    /// Belarusian
    Byn,
}

impl Language {
    /// Parse a language key, falling back to English for unrecognized input
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "rus" => Language::Rus,
            "byn" => Language::Byn,
            _ => Language::Eng,
        }
    }

    /// Select this language's description column from a dictionary entry
    pub fn project(self, entry: &DictionaryEntry) -> LocalizedEntry {
        let desc = match self {
            Language::Eng => &entry.desc_eng,
            Language::Rus => &entry.desc_rus,
            Language::Byn => &entry.desc_byn,
        };
        LocalizedEntry {
            id: entry.id.clone(),
            desc: desc.clone(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Eng => write!(f, "eng"),
            Language::Rus => write!(f, "rus"),
            Language::Byn => write!(f, "byn"),
        }
    }
}

/// Closed set of dictionary tables served by the reference cache.
///
/// Each table documents the length and character class of its ids; the
/// import pipeline checks these before the id-set membership test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceTable {
    Species,
    Sex,
    Age,
    Status,
    CatchingMethod,
    CatchingLures,
    PlaceCode,
    Condition,
    Circumstances,
    Manipulated,
    MovedBefore,
    MetalRingInfo,
    OtherMarks,
}

/// Character class an id must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdCharClass {
    /// ASCII digits only
    Digits,
    /// ASCII letters only
    Alphabetic,
    /// ASCII letters and digits
    Alphanumeric,
    /// ASCII letters, digits and hyphens
    AlphanumericOrHyphen,
}

/// Length and character-class rule of a table's id domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRule {
    /// Exact id length
    pub len: usize,
    /// Permitted characters
    pub class: IdCharClass,
}

impl ReferenceTable {
    /// All dictionary tables, in cache-warming order
    pub fn all() -> &'static [ReferenceTable] {
        &[
            ReferenceTable::Species,
            ReferenceTable::Sex,
            ReferenceTable::Age,
            ReferenceTable::Status,
            ReferenceTable::CatchingMethod,
            ReferenceTable::CatchingLures,
            ReferenceTable::PlaceCode,
            ReferenceTable::Condition,
            ReferenceTable::Circumstances,
            ReferenceTable::Manipulated,
            ReferenceTable::MovedBefore,
            ReferenceTable::MetalRingInfo,
            ReferenceTable::OtherMarks,
        ]
    }

    /// Resolve a table from its stable key
    pub fn from_key(key: &str) -> Option<ReferenceTable> {
        Self::all()
            .iter()
            .copied()
            .find(|table| table.key() == key.trim())
    }

    /// Stable key of this table, used for cache keys, storage and error
    /// categories
    pub fn key(self) -> &'static str {
        match self {
            ReferenceTable::Species => "species",
            ReferenceTable::Sex => "sex",
            ReferenceTable::Age => "age",
            ReferenceTable::Status => "status",
            ReferenceTable::CatchingMethod => "catching_method",
            ReferenceTable::CatchingLures => "catching_lures",
            ReferenceTable::PlaceCode => "place_code",
            ReferenceTable::Condition => "condition",
            ReferenceTable::Circumstances => "circumstances",
            ReferenceTable::Manipulated => "manipulated",
            ReferenceTable::MovedBefore => "moved_before",
            ReferenceTable::MetalRingInfo => "metal_ring_info",
            ReferenceTable::OtherMarks => "other_marks",
        }
    }

    /// Length/character-class constraint of this table's ids
    pub fn id_rule(self) -> IdRule {
        match self {
            ReferenceTable::Species => IdRule {
                len: 5,
                class: IdCharClass::Digits,
            },
            ReferenceTable::Sex => IdRule {
                len: 1,
                class: IdCharClass::Alphabetic,
            },
            ReferenceTable::Age => IdRule {
                len: 1,
                class: IdCharClass::Alphanumeric,
            },
            ReferenceTable::Status => IdRule {
                len: 1,
                class: IdCharClass::Alphanumeric,
            },
            ReferenceTable::CatchingMethod => IdRule {
                len: 1,
                class: IdCharClass::Alphabetic,
            },
            ReferenceTable::CatchingLures => IdRule {
                len: 1,
                class: IdCharClass::Alphabetic,
            },
            ReferenceTable::PlaceCode => IdRule {
                len: 4,
                class: IdCharClass::AlphanumericOrHyphen,
            },
            ReferenceTable::Condition => IdRule {
                len: 1,
                class: IdCharClass::Digits,
            },
            ReferenceTable::Circumstances => IdRule {
                len: 2,
                class: IdCharClass::Digits,
            },
            ReferenceTable::Manipulated => IdRule {
                len: 1,
                class: IdCharClass::Alphabetic,
            },
            ReferenceTable::MovedBefore => IdRule {
                len: 1,
                class: IdCharClass::Digits,
            },
            ReferenceTable::MetalRingInfo => IdRule {
                len: 1,
                class: IdCharClass::Digits,
            },
            ReferenceTable::OtherMarks => IdRule {
                len: 2,
                class: IdCharClass::AlphanumericOrHyphen,
            },
        }
    }
}

impl std::fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
