//! Transcript rendering.

use crate::task::request::RequestSpec;
use crate::task::response::ResponseRecord;

/// Renders the `.headers` transcript for one kept response.
///
/// Pure function over the in-memory records, so it is testable without any
/// I/O. Layout, in order: the request line (`METHOD URL`), each request
/// header argument as `> name:value`, a blank line, the raw request body if
/// present, the response status line as `< PROTO STATUS`, then every
/// response header as `< name: value` (multi-valued headers repeated once
/// per value, in original order).
pub fn render_transcript(spec: &RequestSpec, record: &ResponseRecord) -> Vec<u8> {
    let mut out = String::new();

    out.push_str(&format!("{} {}\n\n", spec.method(), spec.raw_url));

    for arg in spec.header_args() {
        out.push_str(&format!("> {arg}\n"));
    }
    out.push('\n');

    if let Some(body) = spec.body() {
        out.push_str(body);
        out.push_str("\n\n");
    }

    out.push_str(&format!("< {} {}\n", record.proto, record.status_text));
    for (name, value) in &record.headers {
        out.push_str(&format!("< {name}: {value}\n"));
    }

    out.into_bytes()
}
