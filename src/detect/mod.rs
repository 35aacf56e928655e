//! Read-only build metadata detection over an extracted project tree

pub mod app_identity;
pub mod manifest;
pub mod node_version;
pub mod package_manager;

pub use app_identity::{detect_app_name, detect_app_version};
pub use manifest::{Manifest, PackageManagerPin, MANIFEST_FILE};
pub use node_version::{detect_node_version, resolve_node_version, NodeVersion, NodeVersionSource};
pub use package_manager::{detect_package_manager, PackageManagerFact};

use crate::fs::FileSystem;
use crate::output::BuildFacts;
use std::path::Path;

/// Runs every detector in turn. The detectors share no state, so
/// [`crate::pipeline::detect_concurrently`] may run the same set in parallel.
pub fn detect_all(fs: &dyn FileSystem, project_root: &Path) -> BuildFacts {
    BuildFacts {
        app_name: detect_app_name(fs, project_root),
        app_version: detect_app_version(fs, project_root),
        node_version: detect_node_version(fs, project_root),
        package_manager: detect_package_manager(fs, project_root),
    }
}
