//! Application initialization and resource setup.
//!
//! Functions to initialize the shared resources: the HTTP client, the
//! logger, and the worker-pool semaphore.

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// The semaphore bounds the number of in-flight tasks; a permit is acquired
/// before a task is spawned and held until it reaches a terminal outcome.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent tasks allowed
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
