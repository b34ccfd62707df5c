//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `bulkfetch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - The final run report
//!
//! All core functionality is implemented in the library crate. Stdout is
//! reserved for filter results; everything here logs to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio::io::BufReader;

use bulkfetch::{init_logger_with, run_fetch, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    let log_level = opt.log_level.clone();
    let log_format = opt.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let stdin = BufReader::new(tokio::io::stdin());
    match run_fetch(opt, stdin).await {
        Ok(report) => {
            log::info!(
                "Processed {} task{} ({} saved, {} printed, {} filtered, {} failed) in {:.1}s",
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.persisted,
                report.summarized,
                report.dropped,
                report.errored,
                report.elapsed_seconds
            );
            // Per-task failures are data, not a process failure; completion
            // of the join is what exit status 0 attests.
            Ok(())
        }
        Err(e) => {
            eprintln!("bulkfetch error: {:#}", e);
            process::exit(1);
        }
    }
}
