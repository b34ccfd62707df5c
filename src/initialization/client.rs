//! HTTP client initialization.
//!
//! Builds the single shared transport every task sends through.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::{
    Opt, CONNECT_TIMEOUT, POOL_IDLE_TIMEOUT, POOL_MAX_IDLE_PER_HOST, REQUEST_TIMEOUT,
    TCP_KEEPALIVE,
};

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - a small idle connection pool with a 1s idle timeout, emptied entirely
///   unless keep-alive was requested
/// - TLS certificate verification disabled: the tool must work against
///   misconfigured and self-signed hosts, an explicit trust trade-off
/// - redirects never followed, so the classifier sees 3xx statuses and
///   `Location` headers directly
/// - a 10s connect timeout and a 10s overall per-request timeout
/// - an optional upstream proxy; a proxy URL that fails to parse is ignored
///   and requests go direct
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(opt: &Opt) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    // An empty pool is what "keep-alive disabled" means at the HTTP layer;
    // the TCP-level probe interval applies either way.
    let mut builder = ClientBuilder::new()
        .pool_max_idle_per_host(if opt.keep_alive {
            POOL_MAX_IDLE_PER_HOST
        } else {
            0
        })
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .tcp_keepalive(TCP_KEEPALIVE)
        .danger_accept_invalid_certs(true)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .redirect(reqwest::redirect::Policy::none());

    if let Some(proxy_url) = opt.proxy.as_deref() {
        match reqwest::Proxy::all(proxy_url) {
            Ok(proxy) => builder = builder.proxy(proxy),
            // Unparseable proxy falls back to a direct connection.
            Err(e) => log::debug!("Ignoring unparseable proxy URL {proxy_url}: {e}"),
        }
    }

    Ok(Arc::new(builder.build()?))
}
