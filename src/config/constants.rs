//! Process-wide constants (timeouts, limits, defaults).

use std::time::Duration;

/// Default delay between task spawns, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 100;

/// Default size of the bounded worker pool.
///
/// The pool caps in-flight requests; the spawn delay only paces how fast new
/// tasks are submitted to it.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Default HTTP method. A request body promotes this to POST unless another
/// method was chosen explicitly.
pub const DEFAULT_METHOD: &str = "GET";

/// Maximum idle connections kept per host when keep-alive is enabled.
pub const POOL_MAX_IDLE_PER_HOST: usize = 30;

/// How long an idle pooled connection may linger before being closed.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(1);

/// TCP connect timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall per-request timeout, covering connect, TLS, response headers, and
/// the body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP keep-alive probe interval used when keep-alive is enabled.
pub const TCP_KEEPALIVE: Duration = Duration::from_secs(1);

/// Interval between progress log lines, in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;
