//! Completed-response records.

use bytes::Bytes;

use crate::error_handling::FetchError;

/// A fully-read response, detached from the transport.
///
/// Headers keep their wire order, with multi-valued names repeated once per
/// value, so the transcript can reproduce them faithfully.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    /// HTTP status code.
    pub status: u16,
    /// Protocol, e.g. `HTTP/1.1`.
    pub proto: String,
    /// Status code with its canonical reason phrase, e.g. `200 OK`.
    pub status_text: String,
    /// All response headers in order of receipt.
    pub headers: Vec<(String, String)>,
    /// The raw response body.
    pub body: Bytes,
    /// The `Location` header, present on (unfollowed) redirects.
    pub location: Option<String>,
    /// The `Content-Type` header.
    pub content_type: Option<String>,
}

impl ResponseRecord {
    /// Drains a `reqwest::Response` into an owned record.
    ///
    /// # Errors
    ///
    /// `FetchError::BodyRead` if the body cannot be read within the request
    /// deadline.
    pub async fn read(response: reqwest::Response) -> Result<Self, FetchError> {
        let status = response.status();
        let proto = format!("{:?}", response.version());
        let status_text = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let header_str = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(&name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        let location = header_str(reqwest::header::LOCATION);
        let content_type = header_str(reqwest::header::CONTENT_TYPE);

        let body = response.bytes().await.map_err(FetchError::BodyRead)?;

        Ok(Self {
            status: status.as_u16(),
            proto,
            status_text,
            headers,
            body,
            location,
            content_type,
        })
    }
}
