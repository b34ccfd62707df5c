//! Outbound request construction.
//!
//! The method, body, and headers are fixed for the whole run; only the URL
//! varies per task. They are parsed once into a [`RequestTemplate`] before
//! the pipeline starts and shared read-only by every task.

use std::sync::Arc;

use url::Url;

use crate::config::{Opt, DEFAULT_METHOD};
use crate::error_handling::FetchError;

/// The per-run parts of every request: method (after promotion), body, and
/// headers. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    /// HTTP method token sent with every request.
    pub method: String,
    /// Request body, when one was supplied.
    pub body: Option<String>,
    /// Raw `name:value` header arguments exactly as passed on the command
    /// line. Used for the transcript and the artifact hash.
    pub header_args: Vec<String>,
    /// Parsed header pairs, in argument order. Colonless arguments are
    /// dropped.
    pub headers: Vec<(String, String)>,
}

impl RequestTemplate {
    /// Builds the template from the validated CLI options.
    ///
    /// A non-empty body promotes the default GET to POST; an explicitly
    /// chosen method is never overridden.
    pub fn from_opt(opt: &Opt) -> Self {
        let body = opt.body.clone().filter(|b| !b.is_empty());

        let mut method = opt.method.clone();
        if body.is_some() && method == DEFAULT_METHOD {
            method = "POST".to_string();
        }

        let headers = opt
            .headers
            .iter()
            .filter_map(|arg| parse_header_arg(arg))
            .collect();

        Self {
            method,
            body,
            header_args: opt.headers.clone(),
            headers,
        }
    }
}

/// Splits a `name:value` header argument on the first colon.
///
/// Returns `None` for arguments without a colon; those are dropped from the
/// request (but still appear verbatim in the transcript).
pub fn parse_header_arg(arg: &str) -> Option<(String, String)> {
    let (name, value) = arg.split_once(':')?;
    Some((name.to_string(), value.to_string()))
}

/// One task's validated request: the shared template plus the task's URL.
///
/// The tuple (method, raw URL, body, header args) is the request's identity;
/// the artifact path is derived from it and nothing else.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    template: Arc<RequestTemplate>,
    /// The input line, kept verbatim for output lines and hashing.
    pub raw_url: String,
    /// The parsed absolute URL.
    pub url: Url,
}

impl RequestSpec {
    /// Validates the raw URL and binds it to the shared template.
    ///
    /// # Errors
    ///
    /// `FetchError::MalformedUrl` if the line is not an absolute, parseable
    /// URL; the caller abandons the task with no output.
    pub fn build(template: Arc<RequestTemplate>, raw_url: &str) -> Result<Self, FetchError> {
        let url = Url::parse(raw_url).map_err(|_| FetchError::MalformedUrl)?;
        Ok(Self {
            template,
            raw_url: raw_url.to_string(),
            url,
        })
    }

    /// The method token, after any GET→POST promotion.
    pub fn method(&self) -> &str {
        &self.template.method
    }

    /// The request body, when one was configured.
    pub fn body(&self) -> Option<&str> {
        self.template.body.as_deref()
    }

    /// Raw header arguments, in command-line order.
    pub fn header_args(&self) -> &[String] {
        &self.template.header_args
    }

    /// Builds the outbound `reqwest::Request`.
    ///
    /// # Errors
    ///
    /// `FetchError::RequestBuild` for an invalid method token or header
    /// value; reported on the same channel as network failures.
    pub fn to_request(&self, client: &reqwest::Client) -> Result<reqwest::Request, FetchError> {
        let method = reqwest::Method::from_bytes(self.template.method.as_bytes())
            .map_err(|e| FetchError::RequestBuild(e.to_string()))?;

        let mut builder = client.request(method, self.url.clone());
        for (name, value) in &self.template.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &self.template.body {
            builder = builder.body(body.clone());
        }

        builder
            .build()
            .map_err(|e| FetchError::RequestBuild(e.to_string()))
    }
}
