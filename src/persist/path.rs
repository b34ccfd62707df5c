//! Deterministic artifact path derivation.
//!
//! Artifacts land at `root/host/normalized-url-path/<digest>.{body,headers}`.
//! The digest covers the request's full identity, so identical requests map
//! to identical paths across runs and across concurrent tasks, and distinct
//! requests never collide.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};
use url::Url;

use crate::task::request::RequestSpec;

static PATH_SANITIZER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9/._-]+").expect("path sanitizer pattern is valid"));

/// Rewrites a URL path into a filesystem-safe directory path.
///
/// Operates on the serialized (still percent-encoded) path. Runs of
/// characters outside `[a-zA-Z0-9/._-]` collapse to a single dash.
/// Dot-segments have already been resolved by URL parsing, so `..` cannot
/// escape the output root.
pub fn normalize_url_path(url: &Url) -> String {
    PATH_SANITIZER.replace_all(url.path(), "-").into_owned()
}

/// Hex digest over the request identity tuple (method, raw URL, body,
/// serialized header arguments).
pub fn content_hash(spec: &RequestSpec) -> String {
    let mut hasher = Sha256::new();
    hasher.update(spec.method().as_bytes());
    hasher.update(spec.raw_url.as_bytes());
    hasher.update(spec.body().unwrap_or_default().as_bytes());
    hasher.update(spec.header_args().join(", ").as_bytes());
    hex::encode(hasher.finalize())
}

/// The resolved on-disk locations for one kept response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath {
    /// Directory holding both files.
    pub dir: PathBuf,
    /// Raw response body file (`<digest>.body`).
    pub body: PathBuf,
    /// Request/response transcript file (`<digest>.headers`).
    pub headers: PathBuf,
}

/// Computes the artifact locations for one request under `root`.
pub fn artifact_path(root: &Path, spec: &RequestSpec) -> ArtifactPath {
    let host = spec.url.host_str().unwrap_or_default();
    let normalized = normalize_url_path(&spec.url);
    // Url paths always lead with `/`; joining that verbatim would discard
    // `root`.
    let dir = root.join(host).join(normalized.trim_start_matches('/'));

    let hash = content_hash(spec);
    ArtifactPath {
        body: dir.join(format!("{hash}.body")),
        headers: dir.join(format!("{hash}.headers")),
        dir,
    }
}
