//! Artifact persistence and stdout reporting.
//!
//! Two mutually exclusive output modes, selected once at startup: a stdout
//! summary line per kept response, or on-disk artifacts (raw body plus a
//! request/response transcript) under a deterministic per-request path.

mod path;
mod transcript;

use std::path::{Path, PathBuf};

use crate::error_handling::FetchError;
use crate::task::request::RequestSpec;
use crate::task::response::ResponseRecord;

pub use path::{artifact_path, content_hash, normalize_url_path, ArtifactPath};
pub use transcript::render_transcript;

/// Where kept responses go, fixed for the whole run.
#[derive(Debug, Clone)]
pub enum OutputSink {
    /// No output directory configured: print one summary line per kept
    /// response.
    Summary,
    /// Persist kept responses under this directory.
    Artifacts {
        /// Root of the artifact tree.
        root: PathBuf,
    },
}

impl OutputSink {
    /// Selects the mode from the optional `-o/--output` directory.
    pub fn new(output: Option<PathBuf>) -> Self {
        match output {
            Some(root) => Self::Artifacts { root },
            None => Self::Summary,
        }
    }
}

/// Writes the body and transcript files for one kept response.
///
/// Directory creation is idempotent; concurrent already-exists races are
/// success. Identical requests write identical bytes to identical paths, so
/// concurrent duplicate tasks cannot corrupt each other.
///
/// # Errors
///
/// `FetchError::Filesystem` on directory-creation or file-write failure.
pub async fn write_artifacts(
    root: &Path,
    spec: &RequestSpec,
    record: &ResponseRecord,
) -> Result<PathBuf, FetchError> {
    let paths = artifact_path(root, spec);
    tokio::fs::create_dir_all(&paths.dir).await?;
    tokio::fs::write(&paths.body, &record.body).await?;
    tokio::fs::write(&paths.headers, render_transcript(spec, record)).await?;
    Ok(paths.body)
}

/// Split-segment word count over the raw body: a literal split on the ASCII
/// space byte, so an empty body reports one word.
pub fn count_words(body: &[u8]) -> usize {
    body.split(|&b| b == b' ').count()
}

/// Split-segment line count over the raw body: a literal split on newline
/// bytes, so an empty body reports one line.
pub fn count_lines(body: &[u8]) -> usize {
    body.split(|&b| b == b'\n').count()
}

/// Formats the summary-mode line for one kept response.
pub fn summary_line(url: &str, record: &ResponseRecord) -> String {
    format!(
        "{},{},status: {},size: {},words: {},lines: {},type: {}",
        url,
        record.location.as_deref().unwrap_or_default(),
        record.status,
        record.body.len(),
        count_words(&record.body),
        count_lines(&record.body),
        record.content_type.as_deref().unwrap_or_default(),
    )
}

/// Formats the error line for a failed task: the summary format with zeroed
/// metrics and the error text in the location field.
pub fn error_line(url: &str, error: &FetchError) -> String {
    format!("{url},{error},status: 0,size: 0,words: 0,lines: 0,type: error")
}
