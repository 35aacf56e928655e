//! `package.json` access for the detectors

use crate::fs::{probe, FileSystem};
use serde_json::Value;
use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

/// Parsed project manifest. Field accessors return `None` for missing, empty or
/// non-scalar values; numbers are rendered as text.
#[derive(Debug, Clone)]
pub struct Manifest(Value);

impl Manifest {
    pub fn load(fs: &dyn FileSystem, project_root: &Path) -> Option<Self> {
        probe::read_json(fs, &project_root.join(MANIFEST_FILE)).map(Self)
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn name(&self) -> Option<String> {
        probe::scalar_at(&self.0, "/name")
    }

    pub fn version(&self) -> Option<String> {
        probe::scalar_at(&self.0, "/version")
    }

    pub fn package_manager(&self) -> Option<PackageManagerPin> {
        probe::string_at(&self.0, "/packageManager").map(PackageManagerPin::parse)
    }

    pub fn volta_node(&self) -> Option<String> {
        probe::scalar_at(&self.0, "/volta/node")
    }

    pub fn engines_node(&self) -> Option<String> {
        probe::scalar_at(&self.0, "/engines/node")
    }
}

/// The `packageManager` field, e.g. `pnpm@10.27.0+sha256.abc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerPin {
    pub name: String,
    pub version: Option<String>,
}

impl PackageManagerPin {
    pub fn parse(value: &str) -> Self {
        // Corepack appends an integrity hash after '+'
        let without_hash = value.split('+').next().unwrap_or_default();
        let normalized = without_hash.strip_prefix('^').unwrap_or(without_hash);

        match normalized.split_once('@') {
            Some((name, version)) => Self {
                name: name.to_string(),
                version: Some(version.to_string()).filter(|v| !v.is_empty()),
            },
            None => Self {
                name: normalized.to_string(),
                version: None,
            },
        }
    }
}
