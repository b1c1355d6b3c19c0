use assert_cmd::Command;
use markdown_docs_test_support::{sample_docs, DocsFixture};
use predicates::prelude::*;

fn markdown_docs(fixture: &DocsFixture) -> Command {
    let mut cmd = Command::cargo_bin("markdown-docs").expect("binary");
    cmd.current_dir(fixture.workspace()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn catalog_prints_plain_listing() {
    let fixture = sample_docs();

    markdown_docs(&fixture)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dart (dart)"))
        .stdout(predicate::str::contains("  - Topic  /docs/dart/sub/topic"))
        .stdout(predicate::str::contains("Go (go)\n  (no documents)"));
}

#[test]
fn catalog_json_lists_categories_and_documents() {
    let fixture = sample_docs();

    let output = markdown_docs(&fixture)
        .args(["catalog", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value =
        serde_json::from_slice(&output).expect("catalog output is json");
    let names: Vec<_> = payload["categories"]
        .as_array()
        .expect("categories array")
        .iter()
        .map(|category| category["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["dart", "go", "rust"]);
    assert_eq!(payload["document_count"], 3);
    assert!(payload["diagnostics"].as_array().expect("array").is_empty());
}

#[test]
fn catalog_reports_missing_root_without_failing() {
    let fixture = DocsFixture::without_docs();

    markdown_docs(&fixture)
        .args(["catalog", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"root-missing\""));
}

#[test]
fn root_flag_overrides_configuration() {
    let fixture = DocsFixture::without_docs();
    fixture.write_workspace_file("alt/kotlin/null-safety.md", "# Null Safety\n");

    markdown_docs(&fixture)
        .args(["--root", "alt", "catalog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Null Safety  /docs/kotlin/null-safety"));
}

#[test]
fn render_prints_document_html() {
    let fixture = sample_docs();

    markdown_docs(&fixture)
        .args(["render", "dart/data-types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Data Types</h1>"))
        .stdout(predicate::str::contains("<!DOCTYPE html>").not());
}

#[test]
fn render_page_wraps_document() {
    let fixture = sample_docs();

    markdown_docs(&fixture)
        .args(["render", "--page", "dart/sub/topic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<title>Nested Topic | Documentation Hub</title>"));
}

#[test]
fn render_missing_document_exits_with_not_found() {
    let fixture = sample_docs();

    markdown_docs(&fixture)
        .args(["render", "dart/absent"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("document not found: dart/absent"));

    markdown_docs(&fixture)
        .args(["render", "../secret"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("document not found"));
}

#[test]
fn invalid_configuration_exits_with_config_code() {
    let fixture = sample_docs();
    fixture.write_workspace_file(".markdown-docs.toml", "[server]\nbind = \"nowhere\"\n");

    markdown_docs(&fixture)
        .arg("catalog")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("server.bind 'nowhere'"));
}
