use clap::Parser;
use euring_processor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            cancellation_token.cancel();
        };

        // Run the main command with cancellation support
        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(euring_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("EURING Processor - Bird-Ringing Record Exchange and Ingestion");
    println!("=============================================================");
    println!();
    println!("Import worksheet uploads, migrate legacy datasets and exchange");
    println!("ringing/observation records in the international EURING format.");
    println!();
    println!("USAGE:");
    println!("    euring-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a worksheet of ring or observation records");
    println!("    migrate     Bulk-load legacy EURING line files with funnel retry");
    println!("    export      Export stored records as EURING lines or a worksheet");
    println!("    template    Write an empty worksheet template for re-imports");
    println!("    seed        Load dictionary tables from a reference-code CSV");
    println!("    codes       List a dictionary table with localized descriptions");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Validate a ring worksheet without touching the database:");
    println!("    euring-processor import rings.csv --kind ring --dry-run");
    println!();
    println!("    # Migrate a legacy dataset, rings before observations:");
    println!("    euring-processor migrate --rings rings.psv --observations obs.psv");
    println!();
    println!("    # Export all observations as EURING exchange lines:");
    println!("    euring-processor export --kind observation --output obs.psv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    euring-processor <COMMAND> --help");
}
