//! Configuration management and validation.
//!
//! Provides the runtime configuration for the migration funnel and the
//! storage location, with sensible defaults and validation.

use crate::constants::{DATABASE_FILE_NAME, DEFAULT_FUNNEL_SIZES};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for EURING processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Descending batch sizes the migration funnel retries through; the
    /// first size is the chunk size of the initial pass and the final size
    /// should be 1 so failures are diagnosed per row
    pub funnel_sizes: Vec<usize>,

    /// Location of the SQLite database file
    pub database_path: PathBuf,
}

impl Config {
    /// Build a configuration with an explicit database path
    pub fn with_database_path(database_path: PathBuf) -> Self {
        Self {
            database_path,
            ..Self::default()
        }
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.funnel_sizes.is_empty() {
            return Err(Error::configuration(
                "Funnel batch sizes cannot be empty".to_string(),
            ));
        }

        if self.funnel_sizes.iter().any(|&size| size == 0) {
            return Err(Error::configuration(
                "Funnel batch sizes must be greater than 0".to_string(),
            ));
        }

        // The funnel only converges when granularity shrinks each pass
        if self.funnel_sizes.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(Error::configuration(format!(
                "Funnel batch sizes must be strictly descending, got {:?}",
                self.funnel_sizes
            )));
        }

        Ok(())
    }

    /// Default database location inside the platform data directory
    pub fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("euring-processor")
            .join(DATABASE_FILE_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            funnel_sizes: DEFAULT_FUNNEL_SIZES.to_vec(),
            database_path: Self::default_database_path(),
        }
    }
}
