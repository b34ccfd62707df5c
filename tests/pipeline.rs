//! End-to-end tests for the fetch-filter-persist pipeline.
//!
//! These drive `run_fetch` against a mock HTTP server; no real network
//! access. Stdout lines are not captured here; outcomes are asserted through
//! the returned `FetchReport` and the artifact tree on disk.

use httptest::{matchers::*, responders::*, Expectation, Server};
use tempfile::TempDir;

use bulkfetch::{run_fetch, Opt};

/// Options tuned for tests: no pacing delay.
fn test_opt() -> Opt {
    Opt {
        delay: 0,
        ..Opt::default()
    }
}

/// Collects every file under the artifact root, recursively.
fn collect_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current).expect("artifact dir readable") {
            let path = entry.expect("dir entry readable").path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

#[tokio::test]
async fn test_summary_mode_prints_kept_responses() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/a"))
            .respond_with(status_code(200).body("hello world")),
    );

    let input = format!("http://{}/a\n", server.addr());
    let report = run_fetch(test_opt(), input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.total, 1);
    assert_eq!(report.summarized, 1);
    assert_eq!(report.persisted, 0);
    assert_eq!(report.dropped, 0);
    assert_eq!(report.errored, 0);
}

#[tokio::test]
async fn test_blank_lines_are_ignored() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/a"))
            .respond_with(status_code(200).body("x")),
    );

    let input = format!("\n   \nhttp://{}/a\n\n", server.addr());
    let report = run_fetch(test_opt(), input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.total, 1, "only the non-blank line becomes a task");
    assert_eq!(report.summarized, 1);
}

#[tokio::test]
async fn test_match_code_miss_is_dropped() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/b"))
            .respond_with(status_code(404).body("not here")),
    );

    let opt = Opt {
        match_code: vec![200, 201],
        ..test_opt()
    };
    let input = format!("http://{}/b\n", server.addr());
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.total, 1);
    assert_eq!(report.dropped, 1);
    assert_eq!(report.summarized, 0);
    assert_eq!(report.errored, 0);
}

#[tokio::test]
async fn test_exclude_code_drops_listed_status_only() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/listed"))
            .respond_with(status_code(200).body("x")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/unlisted"))
            .respond_with(status_code(204)),
    );

    let opt = Opt {
        exclude_code: vec![200],
        ..test_opt()
    };
    let input = format!(
        "http://{addr}/listed\nhttp://{addr}/unlisted\n",
        addr = server.addr()
    );
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.total, 2);
    assert_eq!(report.dropped, 1, "the listed status is filtered out");
    assert_eq!(report.summarized, 1, "the unlisted status is kept");
}

#[tokio::test]
async fn test_ignore_html_drops_html_bodies() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/page"))
            .respond_with(status_code(200).body("<HTML><body>hi</body></HTML>")),
    );

    let opt = Opt {
        ignore_html: true,
        ..test_opt()
    };
    let input = format!("http://{}/page\n", server.addr());
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.dropped, 1);
    assert_eq!(report.summarized, 0);
}

#[tokio::test]
async fn test_artifact_mode_writes_body_and_transcript() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/admin/config"))
            .respond_with(
                status_code(200)
                    .append_header("Content-Type", "text/plain")
                    .body("artifact body"),
            ),
    );

    let out = TempDir::new().expect("tempdir");
    let opt = Opt {
        output: Some(out.path().to_path_buf()),
        headers: vec!["X-Probe:1".to_string()],
        ..test_opt()
    };
    let input = format!("http://{}/admin/config\n", server.addr());
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.persisted, 1);
    assert_eq!(report.errored, 0);

    let dir = out.path().join("127.0.0.1").join("admin/config");
    assert!(dir.is_dir(), "artifact directory derives from host and path");

    let files = collect_files(out.path());
    assert_eq!(files.len(), 2, "one body file and one headers file");

    let body_file = files
        .iter()
        .find(|p| p.extension().is_some_and(|e| e == "body"))
        .expect("body file present");
    assert_eq!(
        std::fs::read(body_file).expect("body readable"),
        b"artifact body"
    );

    let headers_file = files
        .iter()
        .find(|p| p.extension().is_some_and(|e| e == "headers"))
        .expect("headers file present");
    let transcript = std::fs::read_to_string(headers_file).expect("transcript readable");
    assert!(transcript.starts_with(&format!("GET http://{}/admin/config\n", server.addr())));
    assert!(transcript.contains("> X-Probe:1\n"));
    assert!(transcript.contains("< HTTP/1.1 200 OK\n"));
    assert!(transcript.to_lowercase().contains("< content-type: text/plain"));
}

#[tokio::test]
async fn test_identical_requests_share_one_artifact_path() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/dup"))
            .times(2)
            .respond_with(status_code(200).body("same bytes")),
    );

    let out = TempDir::new().expect("tempdir");
    let opt = Opt {
        output: Some(out.path().to_path_buf()),
        ..test_opt()
    };
    let url = format!("http://{}/dup", server.addr());
    let input = format!("{url}\n{url}\n");
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.total, 2);
    assert_eq!(report.persisted, 2);
    assert_eq!(report.errored, 0);

    // Both tasks computed the same path: two files total, not four, and the
    // body survived the concurrent duplicate writes intact.
    let files = collect_files(out.path());
    assert_eq!(files.len(), 2);
    let body_file = files
        .iter()
        .find(|p| p.extension().is_some_and(|e| e == "body"))
        .expect("body file present");
    assert_eq!(
        std::fs::read(body_file).expect("body readable"),
        b"same bytes"
    );
}

#[tokio::test]
async fn test_dropped_responses_leave_no_artifacts() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/b"))
            .respond_with(status_code(404).body("no")),
    );

    let out = TempDir::new().expect("tempdir");
    let opt = Opt {
        match_code: vec![200, 201],
        output: Some(out.path().to_path_buf()),
        ..test_opt()
    };
    let input = format!("http://{}/b\n", server.addr());
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.dropped, 1);
    assert!(
        collect_files(out.path()).is_empty(),
        "a dropped response must not touch the disk"
    );
}

#[tokio::test]
async fn test_malformed_line_is_silent_and_does_not_block_the_join() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/ok"))
            .respond_with(status_code(200).body("fine")),
    );

    let input = format!("not-a-url\nhttp://{}/ok\n", server.addr());
    let report = run_fetch(test_opt(), input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.total, 2);
    assert_eq!(report.errored, 1, "the malformed line fails silently");
    assert_eq!(report.summarized, 1, "the valid line still completes");
}

#[tokio::test]
async fn test_connection_failure_is_an_errored_task() {
    // Reserved port 1 on localhost: nothing listens there.
    let report = run_fetch(test_opt(), &b"http://127.0.0.1:1/\n"[..])
        .await
        .expect("run should complete");

    assert_eq!(report.total, 1);
    assert_eq!(report.errored, 1);
    assert_eq!(report.summarized, 0);
}

#[tokio::test]
async fn test_body_promotes_default_method_to_post() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/p"))
            .respond_with(status_code(200).body("posted")),
    );

    let opt = Opt {
        body: Some("a=1".to_string()),
        ..test_opt()
    };
    let input = format!("http://{}/p\n", server.addr());
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    // The expectation above only matches POST; a GET would fail the server's
    // verification and the task would error.
    assert_eq!(report.summarized, 1);
    assert_eq!(report.errored, 0);
}

#[tokio::test]
async fn test_explicit_method_is_not_promoted() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("PUT", "/p"))
            .respond_with(status_code(200).body("put")),
    );

    let opt = Opt {
        body: Some("a=1".to_string()),
        method: "PUT".to_string(),
        ..test_opt()
    };
    let input = format!("http://{}/p\n", server.addr());
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.summarized, 1);
    assert_eq!(report.errored, 0);
}

#[tokio::test]
async fn test_redirects_are_reported_not_chased() {
    let server = Server::run();
    // Only the redirect itself is expected; a follow-up request to /final
    // would fail the server's verification.
    server.expect(
        Expectation::matching(request::method_path("GET", "/moved")).respond_with(
            status_code(301)
                .append_header("Location", "/final")
                .body(""),
        ),
    );

    let out = TempDir::new().expect("tempdir");
    let opt = Opt {
        output: Some(out.path().to_path_buf()),
        ..test_opt()
    };
    let input = format!("http://{}/moved\n", server.addr());
    let report = run_fetch(opt, input.as_bytes())
        .await
        .expect("run should complete");

    assert_eq!(report.persisted, 1, "the 3xx response itself is kept");

    let files = collect_files(out.path());
    let headers_file = files
        .iter()
        .find(|p| p.extension().is_some_and(|e| e == "headers"))
        .expect("headers file present");
    let transcript = std::fs::read_to_string(headers_file).expect("transcript readable");
    assert!(transcript.contains("< HTTP/1.1 301 Moved Permanently\n"));
    assert!(transcript.to_lowercase().contains("< location: /final"));
}

#[tokio::test]
async fn test_rerun_reuses_the_same_artifact_path() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/stable"))
            .times(2)
            .respond_with(status_code(200).body("stable body")),
    );

    let out = TempDir::new().expect("tempdir");
    let url = format!("http://{}/stable\n", server.addr());

    for _ in 0..2 {
        let opt = Opt {
            output: Some(out.path().to_path_buf()),
            ..test_opt()
        };
        let report = run_fetch(opt, url.as_bytes())
            .await
            .expect("run should complete");
        assert_eq!(report.persisted, 1);
    }

    // Idempotent re-run: same two files, not four.
    assert_eq!(collect_files(out.path()).len(), 2);
}
