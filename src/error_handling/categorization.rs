//! Error categorization.

use super::types::{ErrorType, FetchError};

/// Maps a per-task failure onto the category counted in the run statistics.
pub fn categorize_fetch_error(error: &FetchError) -> ErrorType {
    match error {
        FetchError::MalformedUrl => ErrorType::MalformedUrl,
        FetchError::RequestBuild(_) => ErrorType::RequestBuildError,
        FetchError::Network(e) => categorize_reqwest_error(e),
        FetchError::BodyRead(e) => {
            if e.is_timeout() {
                ErrorType::TimeoutError
            } else {
                ErrorType::BodyReadError
            }
        }
        FetchError::Filesystem(_) => ErrorType::FilesystemError,
    }
}

/// Categorizes a transport-level `reqwest::Error`.
///
/// Non-2xx statuses are never errors here: redirects are suspended and the
/// classifier sees every status code as data, so only genuine transport
/// failures arrive at this function.
fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_connect() {
        ErrorType::ConnectError
    } else if error.is_timeout() {
        ErrorType::TimeoutError
    } else if error.is_body() {
        ErrorType::BodyReadError
    } else if error.is_decode() {
        ErrorType::DecodeError
    } else if error.is_builder() {
        ErrorType::RequestBuildError
    } else if error.is_request() {
        ErrorType::RequestError
    } else {
        ErrorType::OtherError
    }
}
