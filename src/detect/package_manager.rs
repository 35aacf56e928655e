//! Package manager detection from lock files and the `packageManager` pin

use super::manifest::Manifest;
use crate::fs::{probe, FileSystem};
use crate::stack::{PackageManagerId, LOCK_FILES};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Detected package manager. `version` is only ever set alongside `name`; a missing
/// name means "unknown", never an implicit npm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageManagerFact {
    pub name: Option<PackageManagerId>,
    pub version: Option<String>,
}

impl PackageManagerFact {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.name.is_some()
    }
}

pub fn detect_package_manager(fs: &dyn FileSystem, project_root: &Path) -> PackageManagerFact {
    let manifest = || Manifest::load(fs, project_root);

    if let Some((lock_file, id)) = LOCK_FILES
        .iter()
        .find(|(lock_file, _)| probe::exists(fs, &project_root.join(lock_file)))
    {
        // The lock file is authoritative for the name; a pin naming another manager
        // contributes nothing.
        let version = manifest()
            .and_then(|m| m.package_manager())
            .filter(|pin| pin.name == id.name())
            .and_then(|pin| pin.version);

        debug!(
            lock_file,
            package_manager = %id,
            version = version.as_deref().unwrap_or(""),
            "Detected package manager from lock file"
        );
        return PackageManagerFact {
            name: Some(*id),
            version,
        };
    }

    let Some(pin) = manifest().and_then(|m| m.package_manager()) else {
        debug!("No lock file or packageManager field found");
        return PackageManagerFact::unknown();
    };

    match PackageManagerId::from_name(&pin.name) {
        Some(id) => {
            debug!(
                package_manager = %id,
                version = pin.version.as_deref().unwrap_or(""),
                "Detected package manager from packageManager field"
            );
            PackageManagerFact {
                name: Some(id),
                version: pin.version,
            }
        }
        None => {
            debug!(name = %pin.name, "Ignoring unsupported packageManager");
            PackageManagerFact::unknown()
        }
    }
}
