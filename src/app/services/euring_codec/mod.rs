//! EURING exchange codec for ringing and observation records
//!
//! This module provides the bidirectional mapping between a typed record and
//! the 58-field pipe-delimited EURING exchange line, together with the
//! sub-encodings the line embeds.
//!
//! ## Architecture
//!
//! The codec is organized into logical components:
//! - [`codec`] - Assembly/disassembly of the full exchange line
//! - [`coordinates`] - Decimal degrees ⇄ signed degree/minute/second strings
//! - [`dates`] - Calendar dates ⇄ EURING date/time strings with sentinels
//! - [`fields`] - Permissive field casters and fixed-width numeric rendering
//!
//! The codec is deliberately permissive: unknown codes round-trip verbatim
//! and decoding never fails on bad code values. Code existence is checked by
//! the import pipeline against the reference cache, not here.
//!
//! ## Usage
//!
//! ```rust
//! use euring_processor::EuringRecord;
//! use euring_processor::app::services::euring_codec::codec;
//!
//! let record = EuringRecord {
//!     ring_scheme: Some("BYM".to_string()),
//!     ring_number: Some("...XA12345".to_string()),
//!     ..Default::default()
//! };
//!
//! let line = codec::encode(&record);
//! let decoded = codec::decode(&line);
//! assert_eq!(decoded.ring_number, record.ring_number);
//! ```

pub mod codec;
pub mod coordinates;
pub mod dates;
pub mod fields;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use codec::{decode, encode};
pub use coordinates::{decimal_to_euring, euring_to_decimal};
pub use dates::{date_to_euring_date, euring_to_date, time_to_euring_time};
