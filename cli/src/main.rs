//! # next-subnet Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file is the entry point for the `next-subnet` CLI, which prints the
//! first free subnet of a requested size inside an address block. Ranges
//! already listed in a local CSV record or live in a GCP project/region are
//! skipped. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Printing the result and mapping it to the process exit code
//!
//! ## Exit Codes
//!
//! - `0`: a subnet was found and printed
//! - `1`: the block is full at that size; `NO_AVAILABLE_SUBNET` was printed
//! - `2`: bad arguments, bad configuration, or an impossible request
//!
//! Standard output only ever carries the single result line. Logs, warnings
//! and usage text go to standard error.
//!
//! ## Examples
//!
//! ```bash
//! next-subnet 10.0.0.0/16 24 subnets.csv my-project us-central1
//!
//! # Show what was collected and why
//! next-subnet -vv 10.0.0.0/16 24 subnets.csv my-project us-central1
//! ```
//!
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod common; // Shared utilities (fs, network, process)
mod core; // Core infrastructure (errors, config)
mod subnet; // Range collection, allocation and the driver

/// Exit code for usage, configuration and request errors.
const EXIT_INPUT_ERROR: u8 = 2;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "next-subnet",
    about = "Find the first free subnet of a given size in an address block",
    long_about = "Prints the first subnet of PREFIX_LEN inside BLOCK that is not already\n\
                  listed in RECORD_CSV or allocated in the GCP PROJECT/REGION.\n\
                  Prints NO_AVAILABLE_SUBNET (exit 1) when the block is full.",
    version
)]
struct Cli {
    #[command(flatten)]
    args: subnet::NextSubnetArgs,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parses the command line. Usage errors exit with code 2 before anything else runs.
///
/// Clap already prints the usage line for missing arguments; rejected values
/// (an unparsable block or prefix) get it appended here.
fn parse_cli() -> Result<Cli, ExitCode> {
    Cli::try_parse().or_else(|e| {
        if !wants_usage(e.kind()) {
            e.exit()
        }
        let _ = e.print();
        eprintln!("\n{}", Cli::command().render_usage());
        Err(ExitCode::from(EXIT_INPUT_ERROR))
    })
}

fn wants_usage(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::ValueValidation | ErrorKind::InvalidValue)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    match subnet::handle_next_subnet(cli.args).await {
        Ok(allocation) => {
            println!("{}", allocation);
            ExitCode::from(allocation.exit_code())
        }
        Err(e) => {
            tracing::error!("Allocation failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_INPUT_ERROR)
        }
    }
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["next-subnet", "-vv", "10.0.0.0/16", "24", "s.csv", "p", "r"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.args.prefix_len, 24);
    }

    #[test]
    fn test_rejected_values_want_usage() {
        let block = Cli::try_parse_from(["next-subnet", "ten", "24", "s.csv", "p", "r"]).unwrap_err();
        assert!(wants_usage(block.kind()));
        let prefix =
            Cli::try_parse_from(["next-subnet", "10.0.0.0/16", "abc", "s.csv", "p", "r"]).unwrap_err();
        assert!(wants_usage(prefix.kind()));
        let missing = Cli::try_parse_from(["next-subnet", "10.0.0.0/16"]).unwrap_err();
        assert!(!wants_usage(missing.kind()));
    }
}
