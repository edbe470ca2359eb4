// Contract test for `vsix download` command

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;

use crate::common::{empty_response, gallery_response, query_for};

const QUERY_PATH: &str = "/_apis/public/gallery/extensionquery";

fn vsix(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vsix").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("VSIX_EDITOR")
        .env_remove("VSIX_MARKETPLACE_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_download_rejects_invalid_extension_argument() {
    let temp_dir = TempDir::new().unwrap();

    vsix(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["download", "--extension", "python"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid extension identifier 'python'"));
}

#[test]
fn test_download_fails_when_editor_missing() {
    let temp_dir = TempDir::new().unwrap();

    vsix(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["download", "--editor", "definitely-not-an-editor-binary"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error listing extensions"));
}

#[test]
fn test_download_rejects_bad_marketplace_url() {
    let temp_dir = TempDir::new().unwrap();

    vsix(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["download", "--extension", "golang.go", "--marketplace-url", "ftp://example.com"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("marketplace_url must be an http(s) URL"));
}

#[cfg(unix)]
#[test]
fn test_download_from_editor_listing() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let package = b"PK\x03\x04 golang package".to_vec();

    let query_go = server
        .mock("POST", QUERY_PATH)
        .match_header("accept", "application/json;api-version=7.1-preview.1")
        .match_body(Matcher::PartialJson(query_for("golang.go")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            gallery_response("golang", "go", "0.41.0", &format!("{}/files/golang.go.vsix", server.url()))
                .to_string(),
        )
        .create();
    let query_missing = server
        .mock("POST", QUERY_PATH)
        .match_body(Matcher::PartialJson(query_for("missing.ext")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(empty_response().to_string())
        .create();
    let file = server
        .mock("GET", "/files/golang.go.vsix")
        .with_status(200)
        .with_body(package.clone())
        .create();

    let editor = crate::common::listing_editor(temp_dir.path(), &["golang.go", "nodot", "missing.ext"]);

    vsix(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["download", "-o", "out", "--editor", &editor, "--marketplace-url", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 extensions"))
        .stdout(predicate::str::contains("Processing golang.go"))
        .stdout(predicate::str::contains("Downloading golang.go -> out/golang.go.vsix"))
        .stdout(predicate::str::contains("Successfully downloaded golang.go"))
        .stdout(predicate::str::contains("Skipping invalid extension identifier: nodot"))
        .stdout(predicate::str::contains("No results found for missing.ext"))
        .stdout(predicate::str::contains("Done. Downloaded 1 extensions into out"));

    query_go.assert();
    query_missing.assert();
    file.assert();

    let written = fs::read(temp_dir.path().join("out").join("golang.go.vsix")).unwrap();
    assert_eq!(written, package);
    assert!(!temp_dir.path().join("out").join("missing.ext.vsix").exists());
}

#[test]
fn test_download_reports_http_errors_and_continues() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();

    let _query_fail = server
        .mock("POST", QUERY_PATH)
        .match_body(Matcher::PartialJson(query_for("broken.meta")))
        .with_status(500)
        .create();
    let _query_ok = server
        .mock("POST", QUERY_PATH)
        .match_body(Matcher::PartialJson(query_for("gone.file")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            gallery_response("gone", "file", "1.0.0", &format!("{}/files/gone.vsix", server.url()))
                .to_string(),
        )
        .create();
    let _file = server
        .mock("GET", "/files/gone.vsix")
        .with_status(404)
        .create();

    vsix(temp_dir.path())
        .current_dir(temp_dir.path())
        .args([
            "download",
            "--extension", "broken.meta",
            "--extension", "gone.file",
            "--marketplace-url", &server.url(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to get metadata for broken.meta: HTTP 500"))
        .stdout(predicate::str::contains("Failed to download gone.file: HTTP 404"))
        .stdout(predicate::str::contains("Done. Downloaded 0 extensions into vsix_files"));

    let leftovers: Vec<_> = fs::read_dir(temp_dir.path().join("vsix_files")).unwrap().collect();
    assert!(leftovers.is_empty(), "failed downloads must not leave files behind");
}

#[test]
fn test_download_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();

    let _query = server
        .mock("POST", QUERY_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            gallery_response("redhat", "vscode-yaml", "1.14.0", &format!("{}/files/yaml.vsix", server.url()))
                .to_string(),
        )
        .create();
    let _file = server
        .mock("GET", "/files/yaml.vsix")
        .with_status(200)
        .with_body("yaml package bytes")
        .create();

    let output = vsix(temp_dir.path())
        .current_dir(temp_dir.path())
        .args([
            "download",
            "--json",
            "--extension", "redhat.vscode-yaml",
            "--marketplace-url", &server.url(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entry = &value["entries"][0];
    assert_eq!(entry["extension"], "redhat.vscode-yaml");
    assert_eq!(entry["status"], "downloaded");
    assert_eq!(entry["version"], "1.14.0");
    assert_eq!(entry["size_bytes"], 18);
    assert_eq!(entry["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn test_download_from_extensions_dir() {
    let temp_dir = TempDir::new().unwrap();
    let extensions_dir = temp_dir.path().join("extensions");
    fs::create_dir_all(extensions_dir.join("golang.go-0.41.0")).unwrap();

    let mut server = mockito::Server::new();
    let query = server
        .mock("POST", QUERY_PATH)
        .match_body(Matcher::PartialJson(query_for("golang.go")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(empty_response().to_string())
        .create();

    vsix(temp_dir.path())
        .current_dir(temp_dir.path())
        .args(["download", "--marketplace-url", &server.url(), "-e"])
        .arg(&extensions_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 extensions"))
        .stdout(predicate::str::contains("No results found for golang.go"));

    query.assert();
}
