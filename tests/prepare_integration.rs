//! Extraction followed by patch and detection, as the `run` step performs them

mod support;

use serde_json::Value;
use std::fs;
use std::sync::Arc;
use support::{tar_gz_archive, zip_archive, TAURI_CONFIG};
use tauri_prep::fetch::{extract_archive, ArchiveFormat, FetchError};
use tauri_prep::fs::RealFileSystem;
use tauri_prep::pipeline::PrepOrchestrator;
use tauri_prep::stack::PackageManagerId;
use tauri_prep::tauri::PatchOutcome;
use tempfile::TempDir;

fn project_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("package.json", r#"{"name": "notes", "version": "2.3.0"}"#),
        ("yarn.lock", "# yarn lockfile v1\n"),
        (".node-version", "20\n"),
        ("src-tauri/tauri.conf.json", TAURI_CONFIG),
    ]
}

#[tokio::test]
async fn test_zip_extract_then_inspect() {
    let workspace = TempDir::new().unwrap();
    let summary = extract_archive(&zip_archive(&project_files()), workspace.path()).unwrap();
    assert_eq!(summary.format, ArchiveFormat::Zip);

    let orchestrator = PrepOrchestrator::new(Arc::new(RealFileSystem::new()));
    let report = orchestrator.inspect(workspace.path(), true).await;

    assert_eq!(report.patch, PatchOutcome::Patched);
    assert_eq!(report.facts.app_name.as_deref(), Some("Notes"));
    assert_eq!(report.facts.node_version.as_deref(), Some("20"));
    assert_eq!(report.facts.package_manager.name, Some(PackageManagerId::Yarn));
    assert_eq!(report.outputs.get("exec-command"), Some("yarn exec"));

    let text = fs::read_to_string(workspace.path().join("src-tauri/tauri.conf.json")).unwrap();
    assert!(text.ends_with('\n'));
    let config: Value = serde_json::from_str(&text).unwrap();
    let bundle = &config["bundle"];
    assert_eq!(bundle["active"], true);
    assert_eq!(bundle["targets"], serde_json::json!(["app", "dmg", "nsis"]));
    assert_eq!(bundle["createUpdaterArtifacts"], true);
    assert_eq!(bundle["icon"], serde_json::json!(["icons/icon.png"]));
    assert_eq!(bundle["windows"]["certificateThumbprint"], Value::Null);
    assert!(bundle["windows"]["signCommand"]
        .as_str()
        .unwrap()
        .starts_with("trusted-signing-cli"));
    assert_eq!(config["identifier"], "com.example.notes");
}

#[tokio::test]
async fn test_tar_gz_extract_then_inspect() {
    let workspace = TempDir::new().unwrap();
    let summary = extract_archive(&tar_gz_archive(&project_files()), workspace.path()).unwrap();
    assert_eq!(summary.format, ArchiveFormat::TarGz);

    let report = PrepOrchestrator::default()
        .inspect(workspace.path(), true)
        .await;
    assert_eq!(report.patch, PatchOutcome::Patched);
    assert_eq!(report.facts.app_version.as_deref(), Some("2.3.0"));
}

#[tokio::test]
async fn test_project_without_tauri_config() {
    let workspace = TempDir::new().unwrap();
    let files = [("package.json", r#"{"name": "plain", "version": "1.0.0"}"#)];
    extract_archive(&zip_archive(&files), workspace.path()).unwrap();

    let report = PrepOrchestrator::default()
        .inspect(workspace.path(), true)
        .await;
    assert_eq!(report.patch, PatchOutcome::Skipped);
    assert_eq!(report.facts.app_name.as_deref(), Some("plain"));
    assert!(!workspace.path().join("src-tauri").exists());
}

#[test]
fn test_unknown_archive_format_is_rejected() {
    let workspace = TempDir::new().unwrap();
    let err = extract_archive(b"plain text, not an archive", workspace.path()).unwrap_err();
    assert!(matches!(err, FetchError::UnsupportedArchive));
}

#[test]
fn test_zip_slip_entry_is_rejected() {
    let workspace = TempDir::new().unwrap();
    let archive = zip_archive(&[("ok.txt", "fine"), ("../escape.txt", "nope")]);

    let err = extract_archive(&archive, workspace.path()).unwrap_err();
    assert!(matches!(err, FetchError::UnsafeEntry(_)));
    assert!(!workspace.path().join("ok.txt").exists());
}
