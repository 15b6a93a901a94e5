// ABOUTME: Integration tests for the jobtailor CLI binary.
// ABOUTME: Covers saved-HTML mode, fetch mode against a mock server, exit codes and site table overrides.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn jobtailor_cmd() -> Command {
    Command::cargo_bin("jobtailor").unwrap()
}

fn posting_html() -> String {
    format!(
        "<html><body><nav><a href='/'>Home</a></nav><article><h2>Responsibilities</h2><p>{}</p></article></body></html>",
        "Maintain the billing service and pair with support on tricky invoices. ".repeat(5)
    )
}

fn write_page(dir: &TempDir, name: &str, html: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, html).unwrap();
    path
}

#[test]
fn html_file_prints_response_json() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(&temp_dir, "job.html", &posting_html());

    jobtailor_cmd()
        .arg("--html")
        .arg(&page)
        .arg("--url")
        .arg("https://careers.example.com/jobs/1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"jobDescription\""))
        .stdout(predicate::str::contains("\"source\": \"organic\""))
        .stdout(predicate::str::contains("\"needsManual\": false"));
}

#[test]
fn text_flag_prints_only_description() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(&temp_dir, "job.html", &posting_html());

    jobtailor_cmd()
        .args(["--text", "--url", "https://careers.example.com/jobs/1", "--html"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Responsibilities\nMaintain the billing service"))
        .stdout(predicate::str::contains("jobDescription").not());
}

#[test]
fn failed_extraction_exits_with_two() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(&temp_dir, "empty.html", "<html><body><p>Nothing</p></body></html>");

    jobtailor_cmd()
        .arg("--html")
        .arg(&page)
        .arg("--url")
        .arg("https://careers.example.com/jobs/2")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"needsManual\": true"));
}

#[test]
fn html_without_url_is_a_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(&temp_dir, "job.html", &posting_html());

    jobtailor_cmd()
        .arg("--html")
        .arg(&page)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--url is required"));
}

#[test]
fn url_flag_with_positional_url_is_a_usage_error() {
    jobtailor_cmd()
        .args(["--url", "https://careers.example.com/jobs/1", "https://careers.example.com/jobs/2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--url is only valid with --html"));
}

#[test]
fn file_url_runs_generic_extraction() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(&temp_dir, "job.html", &posting_html());

    jobtailor_cmd()
        .arg("--html")
        .arg(&page)
        .arg("--url")
        .arg("file:///home/me/saved_job.html")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"organic\""))
        .stdout(predicate::str::contains("\"error\"").not());
}

#[test]
fn missing_file_is_an_io_error() {
    jobtailor_cmd()
        .args(["--html", "/nonexistent/page.html", "--url", "https://example.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn output_flag_writes_file_and_timing_goes_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(&temp_dir, "job.html", &posting_html());
    let out = temp_dir.path().join("out.json");

    jobtailor_cmd()
        .arg("--html")
        .arg(&page)
        .arg("--url")
        .arg("https://careers.example.com/jobs/1")
        .arg("-o")
        .arg(&out)
        .arg("--timing")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("elapsed:"));

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["meta"]["success"], true);
    assert_eq!(written["meta"]["url"], "https://careers.example.com/jobs/1");
}

#[test]
fn sites_flag_replaces_known_sites() {
    let temp_dir = TempDir::new().unwrap();
    let html = format!(
        "<html><body><div class='jd'>{}</div></body></html>",
        "Run the warehouse floor and coach the night shift team leads. ".repeat(5)
    );
    let page = write_page(&temp_dir, "job.html", &html);
    let sites = write_page(
        &temp_dir,
        "sites.json",
        r#"[{"id": "lever", "hosts": ["jobs.acme.test"], "selectors": [".jd"]}]"#,
    );

    jobtailor_cmd()
        .arg("--html")
        .arg(&page)
        .arg("--url")
        .arg("https://jobs.acme.test/42")
        .arg("--sites")
        .arg(&sites)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"lever\""));
}

#[test]
fn malformed_sites_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(&temp_dir, "job.html", &posting_html());
    let sites = write_page(&temp_dir, "sites.json", "{ nope");

    jobtailor_cmd()
        .arg("--html")
        .arg(&page)
        .arg("--url")
        .arg("https://careers.example.com/jobs/1")
        .arg("--sites")
        .arg(&sites)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("site table"));
}

#[test]
fn fetch_mode_reads_page_from_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/jobs/7");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(posting_html());
    });

    jobtailor_cmd()
        .arg(server.url("/jobs/7"))
        .arg("--text")
        .assert()
        .success()
        .stdout(predicate::str::contains("Maintain the billing service"));

    mock.assert();
}

#[test]
fn fetch_mode_http_error_exits_with_one() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404);
    });

    jobtailor_cmd()
        .arg(server.url("/gone"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));

    mock.assert();
}
