//! Worksheet bulk-import pipeline for ringing and observation records
//!
//! This module turns an uploaded worksheet into persisted records through a
//! fixed sequence of stages. A row moves through the stages strictly in
//! order and, once rejected, is never promoted:
//!
//! `HeaderCheck → RowParse → FormatValidate → ReferenceValidate →
//! DuplicateDetect → [Committed | Rejected]`
//!
//! ## Architecture
//!
//! - [`worksheet`] - In-memory worksheet value and CSV ingestion
//! - [`headers`] - Fixed per-kind column lists, header check, template output
//! - [`mappers`] - Column-specific cell mappers and record assembly
//! - [`validate`] - Static constraints and reference-code validation
//! - [`duplicates`] - Structural clone detection over serialized row content
//! - [`report`] - Row-addressable result payload returned to the caller
//! - [`pipeline`] - Stage orchestration and the all-or-nothing commit
//!
//! The commit is strict: any format error, reference error or clone rejects
//! the whole upload and nothing is persisted. Every diagnostic carries the
//! 1-based worksheet row it originated from so the uploader can fix exactly
//! that row and re-upload.

pub mod duplicates;
pub mod headers;
pub mod mappers;
pub mod pipeline;
pub mod report;
pub mod validate;
pub mod worksheet;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use pipeline::BulkImporter;
pub use report::{ImportReport, RowReport};
pub use worksheet::{Worksheet, WorksheetRow};
