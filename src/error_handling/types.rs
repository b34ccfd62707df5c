//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Per-task failure while driving one URL through the pipeline.
///
/// None of these abort the run: each task reports its own failure (or stays
/// silent, for malformed input) and the remaining tasks continue.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The input line is not an absolute, parseable URL. The task is
    /// abandoned with no output on any stream.
    #[error("invalid URL")]
    MalformedUrl,

    /// The outbound request could not be constructed (e.g. an invalid
    /// method token or header value).
    #[error("failed to create request: {0}")]
    RequestBuild(String),

    /// Connect, TLS, timeout, or transport failure while sending.
    #[error("request failed: {0}")]
    Network(#[source] ReqwestError),

    /// The response headers arrived but the body could not be read.
    #[error("failed to read body: {0}")]
    BodyRead(#[source] ReqwestError),

    /// Directory creation or file write failure while persisting. Reported
    /// on the error stream only; the task still terminates cleanly.
    #[error("{0}")]
    Filesystem(#[from] std::io::Error),
}

/// Categories of task failure, counted across the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Input line rejected by URL validation
    MalformedUrl,
    /// Request construction failure
    RequestBuildError,
    /// TCP/TLS connect failure
    ConnectError,
    /// Request or body read exceeded the deadline
    TimeoutError,
    /// Request failed in transit
    RequestError,
    /// Body read failure
    BodyReadError,
    /// Response decoding failure
    DecodeError,
    /// Directory creation or file write failure
    FilesystemError,
    /// Anything the transport reports that fits no other bucket
    OtherError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in the end-of-run statistics block.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MalformedUrl => "Malformed input URL",
            ErrorType::RequestBuildError => "Request build error",
            ErrorType::ConnectError => "Connect error",
            ErrorType::TimeoutError => "Timeout error",
            ErrorType::RequestError => "Request error",
            ErrorType::BodyReadError => "Body read error",
            ErrorType::DecodeError => "Response decode error",
            ErrorType::FilesystemError => "Filesystem error",
            ErrorType::OtherError => "Other error",
        }
    }
}
