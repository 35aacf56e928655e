//! Application name and version
//!
//! The Tauri config is preferred over `package.json` because it is what ends up in
//! the installer metadata.

use super::manifest::Manifest;
use crate::fs::{probe, FileSystem};
use crate::tauri::TAURI_CONFIG_PATH;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

fn tauri_config(fs: &dyn FileSystem, project_root: &Path) -> Option<Value> {
    probe::read_json(fs, &project_root.join(TAURI_CONFIG_PATH))
}

pub fn detect_app_name(fs: &dyn FileSystem, project_root: &Path) -> Option<String> {
    let name = tauri_config(fs, project_root)
        .and_then(|config| probe::scalar_at(&config, "/productName"))
        .or_else(|| Manifest::load(fs, project_root)?.name());

    debug!(name = name.as_deref().unwrap_or(""), "Detected app name");
    name
}

pub fn detect_app_version(fs: &dyn FileSystem, project_root: &Path) -> Option<String> {
    let version = tauri_config(fs, project_root)
        .and_then(|config| probe::scalar_at(&config, "/version"))
        .or_else(|| Manifest::load(fs, project_root)?.version());

    debug!(
        version = version.as_deref().unwrap_or(""),
        "Detected app version"
    );
    version
}
