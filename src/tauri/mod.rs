//! Tauri packaging config (`src-tauri/tauri.conf.json`) patching

pub mod bundle;
pub mod patch;

pub use bundle::{merge_bundle, BundleSettings};
pub use patch::{patch_tauri_config, PatchOutcome};

/// Location of the Tauri config relative to the project root
pub const TAURI_CONFIG_PATH: &str = "src-tauri/tauri.conf.json";
