//! beatlist CLI entry point

use beatlist::config::{Cli, Settings};
use beatlist::pipeline;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Build settings from CLI (rejects unknown analysis modes)
    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Validate inputs
    if let Err(e) = validate_inputs(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Run the pipeline
    match pipeline::run(&settings) {
        Ok(result) => {
            println!();
            println!(
                "Summary: {} of {} slots assigned ({} retries)",
                result.assigned, result.slots, result.retries
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = if cli.quiet { "error" } else { filter };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

fn validate_inputs(cli: &Cli) -> Result<(), String> {
    // Check the candidate root exists
    if !cli.root.exists() {
        return Err(format!(
            "Candidate directory does not exist: {}\n\n  Tip: Check the path is correct and accessible.\n  Example:\n    beatlist ~/Music/pool -o ./music",
            cli.root.display()
        ));
    }

    if !cli.root.is_dir() {
        return Err(format!(
            "Candidate root is not a directory: {}",
            cli.root.display()
        ));
    }

    // Check output parent directory exists (we'll create the output dir itself)
    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(format!(
                "Output parent directory does not exist: {}\n\n  Tip: The output directory will be created automatically,\n  but its parent directory must exist.",
                parent.display()
            ));
        }
    }

    Ok(())
}
