//! bulkfetch library: the concurrent fetch-filter-persist pipeline.
//!
//! Requests every URL supplied on an input stream (one per line), runs each
//! completed response through an ordered filter chain, and either saves the
//! matches to a deterministic on-disk layout or prints one summary line per
//! match.
//!
//! # Example
//!
//! ```no_run
//! use bulkfetch::{run_fetch, Opt};
//! use tokio::io::BufReader;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opt = Opt {
//!     match_code: vec![200, 204],
//!     output: Some("out".into()),
//!     ..Opt::default()
//! };
//!
//! let stdin = BufReader::new(tokio::io::stdin());
//! let report = run_fetch(opt, stdin).await?;
//! println!("{} saved, {} filtered, {} failed",
//!          report.persisted, report.dropped, report.errored);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions from within an async context.

#![warn(missing_docs)]

mod app;
pub mod classifier;
pub mod config;
mod error_handling;
mod initialization;
pub mod persist;
pub mod task;

// Re-export public API
pub use classifier::{Decision, FilterCriteria};
pub use config::{LogFormat, LogLevel, Opt};
pub use error_handling::{ErrorType, FetchError, InitializationError, ProcessingStats};
pub use initialization::{init_client, init_logger_with};
pub use run::{run_fetch, FetchReport};
pub use task::TaskOutcome;

// Internal run module (contains the scheduler and join logic)
mod run {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::warn;
    use tokio::io::{AsyncBufRead, AsyncBufReadExt};
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, print_error_statistics, shutdown_gracefully};
    use crate::classifier::FilterCriteria;
    use crate::config::{Opt, LOGGING_INTERVAL_SECS};
    use crate::error_handling::ProcessingStats;
    use crate::initialization::{init_client, init_semaphore};
    use crate::persist::OutputSink;
    use crate::task::request::RequestTemplate;
    use crate::task::{process_task, TaskContext, TaskOutcome};

    /// Results of a completed run.
    ///
    /// Every task that was spawned is accounted for in exactly one of the
    /// outcome counters.
    #[derive(Debug, Clone)]
    pub struct FetchReport {
        /// Number of tasks spawned (non-blank input lines)
        pub total: usize,
        /// Tasks whose response was kept and written to disk
        pub persisted: usize,
        /// Tasks whose response was kept and printed as a summary line
        pub summarized: usize,
        /// Tasks whose response was rejected by the filter chain
        pub dropped: usize,
        /// Tasks that failed (including silently abandoned malformed lines)
        pub errored: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the fetch pipeline over an input stream of URLs.
    ///
    /// Reads trimmed, non-empty lines from `input` in order; each line
    /// becomes one task. Task submission is paced by the configured delay,
    /// concurrency is bounded by the configured pool size, and the function
    /// returns only after every spawned task has reached a terminal outcome.
    ///
    /// A Ctrl-C interrupt stops submission and aborts in-flight tasks so the
    /// join completes promptly.
    ///
    /// # Arguments
    ///
    /// * `opt` - Validated configuration for the run
    /// * `input` - Line-oriented URL source (stdin in the CLI; any buffered
    ///   reader in tests)
    ///
    /// # Errors
    ///
    /// Only setup failures (HTTP client construction) abort the run.
    /// Per-task failures are absorbed, counted, and reported.
    pub async fn run_fetch<R>(opt: Opt, input: R) -> Result<FetchReport>
    where
        R: AsyncBufRead + Unpin,
    {
        let client = init_client(&opt).context("Failed to initialize HTTP client")?;
        let template = Arc::new(RequestTemplate::from_opt(&opt));
        let criteria = Arc::new(FilterCriteria::from_opt(&opt));
        let sink = Arc::new(OutputSink::new(opt.output.clone()));
        let stats = Arc::new(ProcessingStats::new());
        let semaphore = init_semaphore(opt.concurrency);
        let delay = Duration::from_millis(opt.delay);

        let shared_ctx = Arc::new(TaskContext {
            client,
            template,
            criteria,
            sink,
            stats: Arc::clone(&stats),
        });

        let cancel = CancellationToken::new();

        let cancel_on_signal = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, shutting down");
                cancel_on_signal.cancel();
            }
        });

        let start_time = std::time::Instant::now();
        let completed_tasks = Arc::new(AtomicUsize::new(0));

        let cancel_logging = cancel.child_token();
        let completed_for_logging = Arc::clone(&completed_tasks);
        let logging_task = tokio::task::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(LOGGING_INTERVAL_SECS));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &completed_for_logging);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        });

        let mut tasks = FuturesUnordered::new();
        let mut lines = input.lines();
        let mut total = 0usize;

        loop {
            let line_result = tokio::select! {
                line = lines.next_line() => line,
                _ = cancel.cancelled() => break,
            };
            let line = match line_result {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read line from input: {e}");
                    continue;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            // Pace submission only; in-flight concurrency is bounded by the
            // semaphore, not by this delay.
            tokio::time::sleep(delay).await;

            let permit = tokio::select! {
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => {
                        warn!("Semaphore closed, skipping URL: {trimmed}");
                        continue;
                    }
                },
                _ = cancel.cancelled() => break,
            };

            total += 1;

            let ctx = Arc::clone(&shared_ctx);
            let url = trimmed.to_string();
            let task_cancel = cancel.child_token();
            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                tokio::select! {
                    outcome = process_task(ctx, url) => outcome,
                    // Aborted tasks produce no output line.
                    _ = task_cancel.cancelled() => TaskOutcome::Errored,
                }
            }));
        }

        let mut persisted = 0usize;
        let mut summarized = 0usize;
        let mut dropped = 0usize;
        let mut errored = 0usize;

        while let Some(task_result) = tasks.next().await {
            completed_tasks.fetch_add(1, Ordering::SeqCst);
            match task_result {
                Ok(TaskOutcome::Persisted) => persisted += 1,
                Ok(TaskOutcome::Summarized) => summarized += 1,
                Ok(TaskOutcome::Dropped) => dropped += 1,
                Ok(TaskOutcome::Errored) => errored += 1,
                Err(join_error) => {
                    errored += 1;
                    warn!("Task panicked: {:?}", join_error);
                }
            }
        }

        shutdown_gracefully(cancel, Some(logging_task)).await;

        log_progress(start_time, &completed_tasks);
        print_error_statistics(&stats);

        Ok(FetchReport {
            total,
            persisted,
            summarized,
            dropped,
            errored,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
