use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_redoc_catalog")));
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn expected() -> String {
    std::fs::read_to_string(fixture_path("accounts.expected.json")).unwrap()
}

#[test]
fn parse_file_to_stdout() {
    let assert = cmd()
        .args(["parse", &fixture_path("accounts.html")])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, expected());
}

#[test]
fn parse_stdin() {
    let input = std::fs::read_to_string(fixture_path("accounts.html")).unwrap();
    let assert = cmd().args(["parse", "-"]).write_stdin(input).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, expected());
}

#[test]
fn parse_to_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("catalog.json");

    cmd()
        .args(["parse", &fixture_path("accounts.html"), "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(std::fs::read_to_string(&out).unwrap(), expected());
}

#[test]
fn compact_output_is_one_line() {
    let assert = cmd()
        .args(["parse", "--compact", &fixture_path("accounts.html")])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output.lines().count(), 1);

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let pretty: serde_json::Value = serde_json::from_str(&expected()).unwrap();
    assert_eq!(parsed, pretty);
}

#[test]
fn page_without_sections_prints_empty_array() {
    cmd()
        .args(["parse", &fixture_path("loading.html")])
        .assert()
        .success()
        .stdout("[]\n")
        .stderr(predicate::str::contains("has no sections"));
}

#[test]
fn missing_input_fails() {
    cmd()
        .args(["parse", &fixture_path("does-not-exist.html")])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does-not-exist.html"));
}

#[test]
fn custom_markup_from_env() {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("page.html");
    std::fs::write(
        &page,
        r#"<section id="op/Ledger/get-ledger"><h3>Ledger</h3><b class="verb">get</b><code>/v1/ledger</code></section>"#,
    )
    .unwrap();

    let assert = cmd()
        .env("CATALOG_SECTION_PREFIX", "op/")
        .env("CATALOG_METHOD_SELECTOR", "b.verb")
        .env("CATALOG_SUMMARY_SELECTOR", "h3")
        .args(["parse", "--compact"])
        .arg(&page)
        .assert()
        .success();
    let output: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(
        output,
        serde_json::json!([{
            "tag": "Ledger",
            "method": "GET",
            "path": "/v1/ledger",
            "summary": "Ledger",
            "sectionId": "op/Ledger/get-ledger",
        }])
    );
}

#[test]
fn invalid_selector_fails() {
    cmd()
        .env("CATALOG_METHOD_SELECTOR", "span[")
        .args(["parse", &fixture_path("accounts.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("method selector"));
}
