//! Command-line argument definitions for the EURING processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::app::models::RecordKind;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the EURING record processor
///
/// Imports worksheet uploads, migrates legacy datasets and exchanges
/// ringing/observation records in the international EURING format.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "euring-processor",
    version,
    about = "EURING exchange and bulk-ingestion engine for bird-ringing records",
    long_about = "Processes bird-ringing records for a national ringing centre: imports \
                  worksheet uploads through staged validation with an all-or-nothing \
                  commit, migrates legacy datasets with funnel retry, and exchanges \
                  records as EURING pipe-delimited text."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the EURING processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a worksheet of ring or observation records
    Import(ImportArgs),
    /// Bulk-load legacy EURING line files with funnel retry
    Migrate(MigrateArgs),
    /// Export stored records as EURING lines or a worksheet
    Export(ExportArgs),
    /// Write an empty worksheet template for re-imports
    Template(TemplateArgs),
    /// Load dictionary tables from a reference-code CSV
    Seed(SeedArgs),
    /// List a dictionary table with localized descriptions
    Codes(CodesArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Worksheet file to import (CSV export, first row = headers)
    #[arg(value_name = "WORKSHEET")]
    pub worksheet: PathBuf,

    /// Record kind the worksheet contains
    #[arg(
        short = 'k',
        long = "kind",
        value_name = "KIND",
        help = "Record kind: 'ring' or 'observation'"
    )]
    pub kind: RecordKind,

    /// Validate the upload without persisting anything
    ///
    /// Runs the full pipeline against an in-memory store, so the report
    /// shows exactly what a real import would do.
    #[arg(long = "dry-run", help = "Validate without persisting anything")]
    pub dry_run: bool,

    /// Path to the SQLite database
    ///
    /// If not specified, uses the platform data directory.
    #[arg(long = "database", value_name = "FILE", help = "Path to the SQLite database")]
    pub database: Option<PathBuf>,

    /// Output format for the import report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the import report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the migrate command
#[derive(Debug, Clone, Parser)]
pub struct MigrateArgs {
    /// Legacy ring file (one EURING line per record)
    ///
    /// Rings are loaded before observations because observations reference
    /// ring numbers created by the ring pass.
    #[arg(long = "rings", value_name = "FILE", help = "Legacy ring line file")]
    pub rings: Option<PathBuf>,

    /// Legacy observation file (one EURING line per record)
    #[arg(
        long = "observations",
        value_name = "FILE",
        help = "Legacy observation line file"
    )]
    pub observations: Option<PathBuf>,

    /// Funnel batch sizes as a descending comma-separated list
    ///
    /// Failed chunks are retried at each finer size in turn; the final size
    /// should be 1 so bad rows are diagnosed individually.
    #[arg(
        long = "funnel-sizes",
        value_name = "LIST",
        help = "Descending funnel batch sizes, e.g. 100,10,1"
    )]
    pub funnel_sizes: Option<FunnelSizes>,

    /// Path to the SQLite database
    #[arg(long = "database", value_name = "FILE", help = "Path to the SQLite database")]
    pub database: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Record kind to export
    #[arg(
        short = 'k',
        long = "kind",
        value_name = "KIND",
        help = "Record kind: 'ring' or 'observation'"
    )]
    pub kind: RecordKind,

    /// Export format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "euring",
        help = "Export format"
    )]
    pub format: ExportFormat,

    /// Output file
    ///
    /// If not specified, writes to stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Output file")]
    pub output: Option<PathBuf>,

    /// Path to the SQLite database
    #[arg(long = "database", value_name = "FILE", help = "Path to the SQLite database")]
    pub database: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the template command
#[derive(Debug, Clone, Parser)]
pub struct TemplateArgs {
    /// Record kind the template is for
    #[arg(
        short = 'k',
        long = "kind",
        value_name = "KIND",
        help = "Record kind: 'ring' or 'observation'"
    )]
    pub kind: RecordKind,

    /// Output file
    ///
    /// If not specified, writes to stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Output file")]
    pub output: Option<PathBuf>,
}

/// Arguments for the seed command
#[derive(Debug, Clone, Parser)]
pub struct SeedArgs {
    /// Reference-code CSV with columns table,id,desc_eng,desc_rus,desc_byn
    #[arg(value_name = "CODES")]
    pub codes: PathBuf,

    /// Path to the SQLite database
    #[arg(long = "database", value_name = "FILE", help = "Path to the SQLite database")]
    pub database: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the codes command
#[derive(Debug, Clone, Parser)]
pub struct CodesArgs {
    /// Dictionary table key (species, sex, age, status, ...)
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Description language
    ///
    /// One of eng, rus or byn; unrecognized values fall back to English.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANG",
        default_value = "eng",
        help = "Description language (eng, rus, byn)"
    )]
    pub lang: String,

    /// Path to the SQLite database
    #[arg(long = "database", value_name = "FILE", help = "Path to the SQLite database")]
    pub database: Option<PathBuf>,
}

/// Output format options for the import report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON payload for scripting
    Json,
}

/// Supported export formats, dispatched by match
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// EURING exchange lines
    Euring,
    /// Worksheet CSV with data rows
    Worksheet,
    /// Empty worksheet template
    Template,
}

/// Wrapper for parsing comma-separated funnel batch sizes
#[derive(Debug, Clone)]
pub struct FunnelSizes {
    pub sizes: Vec<usize>,
}

impl FromStr for FunnelSizes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let sizes = s
            .split(',')
            .map(|part| {
                part.trim().parse::<usize>().map_err(|_| {
                    Error::configuration(format!("Invalid funnel batch size '{}'", part.trim()))
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        if sizes.is_empty() || sizes.iter().any(|&size| size == 0) {
            return Err(Error::configuration(
                "Funnel batch sizes must be positive".to_string(),
            ));
        }
        if sizes.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(Error::configuration(
                "Funnel batch sizes must be strictly descending".to_string(),
            ));
        }

        Ok(FunnelSizes { sizes })
    }
}

impl ImportArgs {
    /// Validate the import command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.worksheet.exists() {
            return Err(Error::configuration(format!(
                "Worksheet does not exist: {}",
                self.worksheet.display()
            )));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

impl MigrateArgs {
    /// Validate the migrate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.rings.is_none() && self.observations.is_none() {
            return Err(Error::configuration(
                "Nothing to migrate: provide --rings and/or --observations".to_string(),
            ));
        }
        for path in [self.rings.as_ref(), self.observations.as_ref()]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Source file does not exist: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Whether to show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
