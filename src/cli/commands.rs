//! Command implementations for the EURING processor CLI
//!
//! This module contains the command execution logic, logging setup and
//! human/JSON result reporting for the CLI interface.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::app::adapters::storage::{MemoryStore, RecordStore, SqliteStore};
use crate::app::models::{DictionaryEntry, ExchangeFormat, RecordKind, ReferenceTable};
use crate::app::services::bulk_import::headers::template;
use crate::app::services::bulk_import::mappers::record_to_cells;
use crate::app::services::bulk_import::{BulkImporter, ImportReport, Worksheet};
use crate::app::services::euring_codec::codec;
use crate::app::services::migration::MigrationLoader;
use crate::app::services::reference_cache::ReferenceCache;
use crate::cli::args::{
    Args, CodesArgs, Commands, ExportArgs, ExportFormat, ImportArgs, MigrateArgs, OutputFormat,
    SeedArgs, TemplateArgs,
};
use crate::{Config, Error, EuringRecord, Result};

/// Main command runner for the EURING processor
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    match args.command.expect("command presence checked in main") {
        Commands::Import(import_args) => run_import(import_args).await,
        Commands::Migrate(migrate_args) => run_migrate(migrate_args, cancellation_token).await,
        Commands::Export(export_args) => run_export(export_args).await,
        Commands::Template(template_args) => run_template(template_args),
        Commands::Seed(seed_args) => run_seed(seed_args).await,
        Commands::Codes(codes_args) => run_codes(codes_args).await,
    }
}

/// Import command: run one worksheet through the full pipeline
async fn run_import(args: ImportArgs) -> Result<()> {
    setup_logging(args.get_log_level());
    args.validate()?;
    debug!("Import arguments: {:?}", args);

    let sqlite = Arc::new(SqliteStore::open(&database_path(args.database.clone()))?);
    let cache = Arc::new(ReferenceCache::new(sqlite.clone()));
    cache.warm().await?;

    // A dry run exercises every stage against a scratch store, so the report
    // shows exactly what a real import would do
    let record_store: Arc<dyn RecordStore> = if args.dry_run {
        info!("Dry run: records will not be persisted");
        Arc::new(MemoryStore::new())
    } else {
        sqlite.clone()
    };

    let importer = BulkImporter::new(cache, record_store);
    let worksheet = Worksheet::from_path(&args.worksheet)?;
    let report = importer.import(&worksheet, args.kind).await?;

    match args.output_format {
        OutputFormat::Json => {
            let payload = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::io_error(format!("Failed to serialize report: {}", e)))?;
            println!("{}", payload);
        }
        OutputFormat::Human => {
            if !args.quiet {
                print_import_report(&report, args.dry_run);
            }
        }
    }

    Ok(())
}

/// Migrate command: funnel-load legacy line files, rings before observations
async fn run_migrate(args: MigrateArgs, cancellation_token: CancellationToken) -> Result<()> {
    setup_logging(args.get_log_level());
    args.validate()?;
    debug!("Migrate arguments: {:?}", args);

    let mut config = Config::with_database_path(database_path(args.database.clone()));
    if let Some(funnel_sizes) = &args.funnel_sizes {
        config.funnel_sizes = funnel_sizes.sizes.clone();
    }
    config.validate()?;

    let store = Arc::new(SqliteStore::open(&config.database_path)?);
    let loader = MigrationLoader::new(store, config.funnel_sizes);

    // Tables load strictly sequentially; a Ctrl-C between tables stops the
    // run cleanly with the rings already committed
    let mut outcomes = Vec::new();
    for (path, kind) in [
        (args.rings.as_deref(), RecordKind::Ring),
        (args.observations.as_deref(), RecordKind::Observation),
    ] {
        let Some(path) = path else { continue };
        if cancellation_token.is_cancelled() {
            return Err(Error::processing_interrupted(
                "Migration interrupted between tables".to_string(),
            ));
        }
        outcomes.push(
            loader
                .migrate_file(path, kind, args.show_progress())
                .await?,
        );
    }

    if !args.quiet {
        for outcome in &outcomes {
            println!(
                "{} {}: {} of {} lines inserted, {} failed",
                "Migrated".green().bold(),
                outcome.kind,
                outcome.inserted_count,
                outcome.line_count,
                outcome.errors.len()
            );
            for (line, message) in &outcome.errors {
                println!("  {} line {}: {}", "✗".red(), line, message);
            }
        }
    }

    Ok(())
}

/// Export command: render stored records in the requested exchange format
async fn run_export(args: ExportArgs) -> Result<()> {
    setup_logging(if args.verbose > 0 { "info" } else { "warn" });

    let format = exchange_format(args.format, args.kind);
    let store = Arc::new(SqliteStore::open(&database_path(args.database.clone()))?);
    let records = store.fetch_records(args.kind).await?;
    info!("Exporting {} {} records", records.len(), args.kind);

    let rendered = render_export(format, args.kind, &records)?;
    write_output(args.output.as_deref(), &rendered)
}

/// Template command: write the empty worksheet for re-imports
fn run_template(args: TemplateArgs) -> Result<()> {
    let rendered = render_export(ExchangeFormat::Template, args.kind, &[])?;
    write_output(args.output.as_deref(), &rendered)
}

/// Seed command: load dictionary tables from a reference-code CSV
async fn run_seed(args: SeedArgs) -> Result<()> {
    setup_logging(if args.verbose > 0 { "info" } else { "warn" });

    if !args.codes.exists() {
        return Err(Error::file_not_found(args.codes.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&args.codes)?;

    let mut tables: HashMap<ReferenceTable, Vec<DictionaryEntry>> = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let table_key = record.get(0).unwrap_or("").trim().to_string();
        let table = ReferenceTable::from_key(&table_key).ok_or_else(|| {
            Error::configuration(format!("Unknown dictionary table '{}'", table_key))
        })?;

        tables.entry(table).or_default().push(DictionaryEntry {
            id: record.get(1).unwrap_or("").trim().to_string(),
            desc_eng: record.get(2).unwrap_or("").trim().to_string(),
            desc_rus: record.get(3).unwrap_or("").trim().to_string(),
            desc_byn: record.get(4).unwrap_or("").trim().to_string(),
        });
    }

    let store = SqliteStore::open(&database_path(args.database.clone()))?;
    for (table, entries) in &tables {
        store.seed_dictionary(*table, entries)?;
        info!("Seeded {} with {} codes", table, entries.len());
    }

    println!(
        "{} {} dictionary tables",
        "Seeded".green().bold(),
        tables.len()
    );
    Ok(())
}

/// Codes command: list one dictionary table in the requested language
async fn run_codes(args: CodesArgs) -> Result<()> {
    let table = ReferenceTable::from_key(&args.table).ok_or_else(|| {
        Error::configuration(format!("Unknown dictionary table '{}'", args.table))
    })?;

    let store = Arc::new(SqliteStore::open(&database_path(args.database.clone()))?);
    let cache = ReferenceCache::new(store);
    let rows = cache.filter_by_lang(table, &args.lang).await?;

    for row in rows.iter() {
        println!("{}\t{}", row.id, row.desc);
    }
    Ok(())
}

/// Map the CLI export flags onto the closed exchange-format set
fn exchange_format(format: ExportFormat, kind: RecordKind) -> ExchangeFormat {
    match (format, kind) {
        (ExportFormat::Euring, _) => ExchangeFormat::Euring,
        (ExportFormat::Worksheet, RecordKind::Ring) => ExchangeFormat::XlsRing,
        (ExportFormat::Worksheet, RecordKind::Observation) => ExchangeFormat::XlsObservation,
        (ExportFormat::Template, _) => ExchangeFormat::Template,
    }
}

/// Render records for one exchange format
fn render_export(
    format: ExchangeFormat,
    kind: RecordKind,
    records: &[EuringRecord],
) -> Result<String> {
    match format {
        ExchangeFormat::Euring => {
            let mut out = String::new();
            for record in records {
                out.push_str(&codec::encode(record));
                out.push('\n');
            }
            Ok(out)
        }
        ExchangeFormat::XlsRing | ExchangeFormat::XlsObservation => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(kind.worksheet_columns())?;
            for record in records {
                writer.write_record(record_to_cells(kind, record))?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| Error::io_error(format!("Failed to flush worksheet: {}", e)))?;
            String::from_utf8(bytes)
                .map_err(|e| Error::io_error(format!("Worksheet is not UTF-8: {}", e)))
        }
        ExchangeFormat::Template => Ok(template(kind)),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
            println!("{} {}", "Wrote".green().bold(), path.display());
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

fn database_path(database: Option<PathBuf>) -> PathBuf {
    database.unwrap_or_else(Config::default_database_path)
}

fn setup_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("euring_processor={}", level)));
    // A second init in the same process (tests) is fine to ignore
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn print_import_report(report: &ImportReport, dry_run: bool) {
    let heading = if report.is_clean() {
        if dry_run {
            "Upload would commit".green().bold()
        } else {
            "Upload committed".green().bold()
        }
    } else {
        "Upload rejected".red().bold()
    };

    println!(
        "{}: {} rows ({} empty), {} imported",
        heading, report.row_count, report.empty_row_count, report.imported_count
    );

    for row in &report.format_errors {
        println!(
            "  {} row {}: {}",
            "format".yellow(),
            row.row_number,
            row.result.join("; ")
        );
    }
    for row in &report.euring_errors {
        println!(
            "  {} row {}: unknown {}",
            "EURING".yellow(),
            row.row_number,
            row.result.join(", ")
        );
    }
    for row_number in &report.clones {
        println!("  {} row {} duplicates an earlier row", "clone".yellow(), row_number);
    }
}
