//! Response classification.
//!
//! An ordered predicate chain decides keep/drop for every completed
//! response. The criteria are built once from the CLI options and shared
//! read-only by all tasks.

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::config::Opt;
use crate::task::response::ResponseRecord;

// Checking the Content-Type header would be the obvious way to spot HTML,
// but webservers lie about it constantly; sniffing the body is the only
// signal worth trusting here.
static HTML_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html").expect("HTML marker pattern is valid"));

/// The classifier's verdict for one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The response passed every active predicate.
    Keep,
    /// At least one active predicate rejected the response.
    Drop,
}

/// The response filter, constructed once per run.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Keep only bodies containing this byte substring.
    pub match_string: Option<String>,
    /// Keep only these status codes (empty = inactive).
    pub match_codes: Vec<u16>,
    /// Drop these status codes (empty = inactive).
    pub exclude_codes: Vec<u16>,
    /// Drop bodies that look like HTML.
    pub ignore_html: bool,
    /// Drop empty or whitespace-only bodies.
    pub ignore_empty: bool,
}

impl FilterCriteria {
    /// Builds the criteria from the validated CLI options.
    pub fn from_opt(opt: &Opt) -> Self {
        Self {
            match_string: opt.match_string.clone(),
            match_codes: opt.match_code.clone(),
            exclude_codes: opt.exclude_code.clone(),
            ignore_html: opt.ignore_html,
            ignore_empty: opt.ignore_empty,
        }
    }

    /// Evaluates the predicate chain against a completed response.
    ///
    /// Predicates run in a fixed order and the first failing one drops the
    /// response: HTML marker, empty body, body substring, status allow-list,
    /// status filter-list.
    pub fn classify(&self, record: &ResponseRecord) -> Decision {
        let body = record.body.as_ref();

        if self.ignore_html && HTML_MARKER.is_match(body) {
            return Decision::Drop;
        }

        if self.ignore_empty && body.iter().all(|b| b.is_ascii_whitespace()) {
            return Decision::Drop;
        }

        if let Some(needle) = &self.match_string {
            if memchr::memmem::find(body, needle.as_bytes()).is_none() {
                return Decision::Drop;
            }
        }

        if !self.match_codes.is_empty() && !self.match_codes.contains(&record.status) {
            return Decision::Drop;
        }

        if !self.exclude_codes.is_empty() && self.exclude_codes.contains(&record.status) {
            return Decision::Drop;
        }

        Decision::Keep
    }
}
