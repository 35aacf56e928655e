use super::bundle::{apply_bundle, is_truthy, BundleSettings};
use super::TAURI_CONFIG_PATH;
use crate::fs::{probe, FileSystem};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched,
    /// No readable, parseable config, or one that parses to `null`/`false`/`0`/`""`
    Skipped,
    /// The config exists but could not be patched; the build continues regardless
    Failed(String),
}

/// Serializes a config the way the Tauri CLI and `JSON.stringify(_, null, 2)` do
pub fn to_config_string(config: &Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    out.push('\n');
    Ok(out)
}

/// Forces the bundle settings into the project's Tauri config.
///
/// Never fails: a missing config is skipped and any error while patching is
/// reported as [`PatchOutcome::Failed`] after logging a warning.
pub fn patch_tauri_config(
    fs: &dyn FileSystem,
    project_root: &Path,
    settings: &BundleSettings,
) -> PatchOutcome {
    let config_path = project_root.join(TAURI_CONFIG_PATH);
    let Some(config) = probe::read_json(fs, &config_path).filter(is_truthy) else {
        info!(
            "No valid {} found, skipping Tauri config update",
            TAURI_CONFIG_PATH
        );
        return PatchOutcome::Skipped;
    };

    match write_patched(fs, &config_path, config, settings) {
        Ok(()) => {
            info!(
                "Updated {} with bundle configuration",
                TAURI_CONFIG_PATH
            );
            PatchOutcome::Patched
        }
        Err(e) => {
            let message = format!("Failed to update Tauri config: {:#}", e);
            warn!(path = %config_path.display(), "{}", message);
            PatchOutcome::Failed(message)
        }
    }
}

fn write_patched(
    fs: &dyn FileSystem,
    config_path: &Path,
    mut config: Value,
    settings: &BundleSettings,
) -> Result<()> {
    let Value::Object(map) = &mut config else {
        anyhow::bail!("expected a JSON object at the top level");
    };
    apply_bundle(map, settings);

    let serialized = to_config_string(&config)?;
    fs.write_string(config_path, &serialized)
}
