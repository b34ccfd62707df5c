//! Per-task pipeline: one input line driven end-to-end.

pub mod request;
pub mod response;

use std::sync::Arc;

use crate::classifier::{Decision, FilterCriteria};
use crate::error_handling::{categorize_fetch_error, FetchError, ProcessingStats};
use crate::persist::{error_line, summary_line, write_artifacts, OutputSink};
use crate::task::request::{RequestSpec, RequestTemplate};
use crate::task::response::ResponseRecord;

/// The terminal outcome of one task.
///
/// Every well-formed input line reaches exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Kept and written to disk (artifact mode).
    Persisted,
    /// Kept and printed as a summary line (summary mode).
    Summarized,
    /// Rejected by the classifier; nothing written or printed.
    Dropped,
    /// Failed before classification, or failed to persist.
    Errored,
}

/// Shared, read-only state handed to every task.
pub(crate) struct TaskContext {
    pub client: Arc<reqwest::Client>,
    pub template: Arc<RequestTemplate>,
    pub criteria: Arc<FilterCriteria>,
    pub sink: Arc<OutputSink>,
    pub stats: Arc<ProcessingStats>,
}

/// Processes one input line to its terminal outcome.
///
/// Failures are absorbed here: malformed URLs stay silent, request/network/
/// body failures print an error line to stdout, filesystem failures go to
/// the error log. Nothing propagates to the scheduler.
pub(crate) async fn process_task(ctx: Arc<TaskContext>, raw_url: String) -> TaskOutcome {
    match run_one(&ctx, &raw_url).await {
        Ok(outcome) => outcome,
        Err(error) => {
            ctx.stats.increment_error(categorize_fetch_error(&error));
            match &error {
                // Malformed lines are abandoned with no output on any stream.
                FetchError::MalformedUrl => {}
                FetchError::Filesystem(io_error) => {
                    log::error!("failed to save response for {raw_url}: {io_error}");
                }
                _ => println!("{}", error_line(&raw_url, &error)),
            }
            TaskOutcome::Errored
        }
    }
}

/// Validate → build → send → read → classify → persist/summarize.
async fn run_one(ctx: &TaskContext, raw_url: &str) -> Result<TaskOutcome, FetchError> {
    let spec = RequestSpec::build(Arc::clone(&ctx.template), raw_url)?;
    let request = spec.to_request(&ctx.client)?;

    let response = ctx
        .client
        .execute(request)
        .await
        .map_err(FetchError::Network)?;
    let record = ResponseRecord::read(response).await?;

    if ctx.criteria.classify(&record) == Decision::Drop {
        return Ok(TaskOutcome::Dropped);
    }

    match ctx.sink.as_ref() {
        OutputSink::Summary => {
            println!("{}", summary_line(raw_url, &record));
            Ok(TaskOutcome::Summarized)
        }
        OutputSink::Artifacts { root } => {
            let body_path = write_artifacts(root, &spec, &record).await?;
            println!("{}: {} {}", body_path.display(), raw_url, record.status);
            Ok(TaskOutcome::Persisted)
        }
    }
}
