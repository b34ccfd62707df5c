//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Shuts down background tasks after the final join.
///
/// Cancels the shared token (stopping the progress logger and releasing any
/// task still watching it) and awaits the logging task so its final line is
/// flushed before the run report.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}
