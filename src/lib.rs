//! EURING Processor Library
//!
//! A Rust library for exchanging bird-ringing records in the international
//! EURING format and for bulk-loading them into a ringing-centre database.
//!
//! This library provides tools for:
//! - Encoding and decoding the 58-field pipe-delimited EURING exchange line,
//!   including the coordinate and partial-date sub-encodings
//! - Serving dictionary/reference tables (species, sex, age, status, ...)
//!   through a read-through cache with multilingual projection
//! - Importing worksheet uploads through a staged validation pipeline with
//!   an all-or-nothing commit
//! - Migrating large legacy datasets in batches, retrying failures through a
//!   shrinking funnel of batch sizes to isolate malformed rows

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_loader;
        pub mod bulk_import;
        pub mod euring_codec;
        pub mod migration;
        pub mod reference_cache;
    }
    pub mod adapters {
        pub mod storage;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DictionaryEntry, EuringRecord, Language, RecordKind, ReferenceTable};
pub use config::Config;

/// Result type alias for the EURING processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for EURING processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Worksheet (CSV) parsing error
    #[error("Worksheet parsing error: {message}")]
    WorksheetParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Structurally malformed EURING value (coordinate or date string,
    /// wrong field count)
    #[error("EURING format error: {message}")]
    Format { message: String },

    /// Value fails a length, character-class or range rule
    #[error("Constraint violation on '{field}': {message}")]
    ConstraintViolation { field: String, message: String },

    /// Coded field value absent from its dictionary id-set
    #[error("Unknown {table} code: '{code}'")]
    UnknownReferenceCode { table: String, code: String },

    /// Structural clone of an earlier worksheet row
    #[error("Row {row} duplicates row {of_row}")]
    DuplicateRow { row: usize, of_row: usize },

    /// Worksheet header row is missing expected column names
    #[error("Missing worksheet columns: {}", missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    /// Storage rejected a whole chunk of records
    #[error("Batch insert failed ({chunk_len} records): {message}")]
    BatchInsert { chunk_len: usize, message: String },

    /// Storage rejected one specific record at funnel granularity 1
    #[error("Row insert failed: {message}")]
    RowInsert { message: String },

    /// Storage layer error
    #[error("Storage error during {operation}: {message}")]
    Storage { operation: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::other(message_str),
        }
    }

    /// Create a worksheet parsing error with context
    pub fn worksheet_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::WorksheetParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint_violation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unknown reference code error
    pub fn unknown_reference_code(table: impl Into<String>, code: impl Into<String>) -> Self {
        Self::UnknownReferenceCode {
            table: table.into(),
            code: code.into(),
        }
    }

    /// Create a batch insert error
    pub fn batch_insert(chunk_len: usize, message: impl Into<String>) -> Self {
        Self::BatchInsert {
            chunk_len,
            message: message.into(),
        }
    }

    /// Create a row insert error
    pub fn row_insert(message: impl Into<String>) -> Self {
        Self::RowInsert {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Short taxonomy name of this error, used in funnel diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IoError",
            Self::WorksheetParsing { .. } => "WorksheetParsingError",
            Self::Format { .. } => "FormatError",
            Self::ConstraintViolation { .. } => "ConstraintViolation",
            Self::UnknownReferenceCode { .. } => "UnknownReferenceCode",
            Self::DuplicateRow { .. } => "DuplicateRow",
            Self::MissingHeaders { .. } => "MissingHeaders",
            Self::BatchInsert { .. } => "BatchInsertFailure",
            Self::RowInsert { .. } => "RowInsertFailure",
            Self::Storage { .. } => "StorageError",
            Self::Configuration { .. } => "ConfigurationError",
            Self::DateTimeParsing { .. } => "DateTimeParsingError",
            Self::FileNotFound { .. } => "FileNotFound",
            Self::ProcessingInterrupted { .. } => "ProcessingInterrupted",
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::WorksheetParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage {
            operation: "sqlite".to_string(),
            message: error.to_string(),
        }
    }
}
