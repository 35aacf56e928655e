//! Detection over real project trees on disk

mod support;

use support::{project, TAURI_CONFIG};
use tauri_prep::detect::{detect_all, resolve_node_version, NodeVersionSource};
use tauri_prep::fs::RealFileSystem;
use tauri_prep::output::StepOutputs;
use tauri_prep::stack::PackageManagerId;

#[test]
fn test_bun_pin_without_lock_file() {
    let dir = project(&[("package.json", r#"{"packageManager":"bun@1.1.0"}"#)]);

    let facts = detect_all(&RealFileSystem::new(), dir.path());
    assert_eq!(facts.package_manager.name, Some(PackageManagerId::Bun));
    assert_eq!(facts.package_manager.version.as_deref(), Some("1.1.0"));

    let outputs = StepOutputs::from_facts(&facts);
    assert_eq!(outputs.get("exec-command"), Some("bunx"));
    assert_eq!(outputs.get("install-command"), Some("bun install"));
    assert_eq!(outputs.get("bun-version"), Some("1.1.0"));
    assert_eq!(outputs.get("npm-version"), Some(""));
}

#[test]
fn test_full_tauri_project() {
    let dir = project(&[
        (
            "package.json",
            r#"{"name": "notes-web", "version": "0.0.1", "packageManager": "pnpm@9.1.0+sha512.abc"}"#,
        ),
        ("pnpm-lock.yaml", "lockfileVersion: '9.0'\n"),
        (".nvmrc", "v20.11.1\n"),
        ("src-tauri/tauri.conf.json", TAURI_CONFIG),
    ]);

    let facts = detect_all(&RealFileSystem::new(), dir.path());
    assert_eq!(facts.app_name.as_deref(), Some("Notes"));
    assert_eq!(facts.app_version.as_deref(), Some("2.3.0"));
    assert_eq!(facts.node_version.as_deref(), Some("v20.11.1"));
    assert_eq!(facts.package_manager.name, Some(PackageManagerId::Pnpm));
    assert_eq!(facts.package_manager.version.as_deref(), Some("9.1.0"));
}

#[test]
fn test_lock_file_wins_over_mismatched_pin() {
    let dir = project(&[
        ("package.json", r#"{"packageManager": "yarn@4.0.2"}"#),
        ("package-lock.json", "{}"),
    ]);

    let facts = detect_all(&RealFileSystem::new(), dir.path());
    assert_eq!(facts.package_manager.name, Some(PackageManagerId::Npm));
    assert_eq!(facts.package_manager.version, None);

    let outputs = StepOutputs::from_facts(&facts);
    assert_eq!(outputs.get("install-command"), Some("npm ci"));
    assert_eq!(outputs.get("npm-version"), Some(""));
}

#[test]
fn test_node_version_source_order() {
    let dir = project(&[
        ("package.json", r#"{"engines": {"node": ">=18"}, "volta": {"node": "18.19.0"}}"#),
        (".tool-versions", "python 3.12.1\nnodejs 20.10.0\n"),
    ]);

    let resolved = resolve_node_version(&RealFileSystem::new(), dir.path()).unwrap();
    assert_eq!(resolved.version, "20.10.0");
    assert_eq!(resolved.source, NodeVersionSource::ToolVersions);
}

#[test]
fn test_malformed_files_are_absent() {
    let dir = project(&[
        ("package.json", "{ not json"),
        ("src-tauri/tauri.conf.json", "[1, 2"),
        (".node-version", "\n# comment\n"),
    ]);

    let facts = detect_all(&RealFileSystem::new(), dir.path());
    assert_eq!(facts.app_name, None);
    assert_eq!(facts.app_version, None);
    assert_eq!(facts.node_version, None);
    assert!(!facts.package_manager.is_known());

    let outputs = StepOutputs::from_facts(&facts);
    assert_eq!(outputs.get("package-manager"), Some(""));
    assert_eq!(outputs.get("install-command"), Some(""));
}

#[test]
fn test_empty_directory() {
    let dir = project(&[]);
    let facts = detect_all(&RealFileSystem::new(), dir.path());
    assert_eq!(facts, Default::default());
}
