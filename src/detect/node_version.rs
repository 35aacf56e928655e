//! Node.js runtime version detection
//!
//! Sources are consulted in a fixed order and the first one that yields a value
//! wins. Values are returned verbatim (`v20.10.0`, `20`, `lts/*`, `>=18` are all
//! valid answers); picking an actual release is left to the toolchain installer.

use super::manifest::Manifest;
use crate::fs::{probe, FileSystem};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Tool name used for Node.js in asdf/mise `.tool-versions` files
const TOOL_VERSIONS_NODE: &str = "nodejs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeVersionSource {
    NodeVersionFile,
    Nvmrc,
    ToolVersions,
    Volta,
    Engines,
}

impl NodeVersionSource {
    /// Highest priority first
    pub const ORDER: [NodeVersionSource; 5] = [
        Self::NodeVersionFile,
        Self::Nvmrc,
        Self::ToolVersions,
        Self::Volta,
        Self::Engines,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NodeVersionFile => ".node-version",
            Self::Nvmrc => ".nvmrc",
            Self::ToolVersions => ".tool-versions",
            Self::Volta => "package.json#volta.node",
            Self::Engines => "package.json#engines.node",
        }
    }

    fn read(&self, fs: &dyn FileSystem, project_root: &Path) -> Option<String> {
        match self {
            Self::NodeVersionFile | Self::Nvmrc => {
                let content = probe::read_text(fs, &project_root.join(self.label()))?;
                parse_version_file(&content)
            }
            Self::ToolVersions => {
                let content = probe::read_text(fs, &project_root.join(self.label()))?;
                parse_tool_versions(&content, TOOL_VERSIONS_NODE)
            }
            Self::Volta => Manifest::load(fs, project_root)?.volta_node(),
            Self::Engines => Manifest::load(fs, project_root)?.engines_node(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeVersion {
    pub version: String,
    pub source: NodeVersionSource,
}

pub fn resolve_node_version(fs: &dyn FileSystem, project_root: &Path) -> Option<NodeVersion> {
    let found = NodeVersionSource::ORDER.iter().find_map(|source| {
        source.read(fs, project_root).map(|version| NodeVersion {
            version,
            source: *source,
        })
    });

    match &found {
        Some(node) => debug!(
            version = %node.version,
            source = node.source.label(),
            "Detected Node.js version"
        ),
        None => debug!("No Node.js version pinned"),
    }

    found
}

pub fn detect_node_version(fs: &dyn FileSystem, project_root: &Path) -> Option<String> {
    resolve_node_version(fs, project_root).map(|node| node.version)
}

/// `.node-version` / `.nvmrc`: the first meaningful line
pub(crate) fn parse_version_file(content: &str) -> Option<String> {
    probe::meaningful_lines(content).next().map(str::to_string)
}

/// `.tool-versions`: `<tool> <version> [<fallback>...]`, primary version only
pub(crate) fn parse_tool_versions(content: &str, tool: &str) -> Option<String> {
    probe::meaningful_lines(content).find_map(|line| {
        let mut tokens = line.split_whitespace();
        if tokens.next()? != tool {
            return None;
        }
        tokens.next().map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn root() -> &'static Path {
        Path::new("/mock")
    }

    #[test]
    fn test_version_file_formats() {
        assert_eq!(parse_version_file("v20.10.0\n"), Some("v20.10.0".into()));
        assert_eq!(parse_version_file("  20  "), Some("20".into()));
        assert_eq!(parse_version_file("lts/*"), Some("lts/*".into()));
        assert_eq!(parse_version_file("# comment\n\n18.19.0\n"), Some("18.19.0".into()));
        assert_eq!(parse_version_file("   \n\n"), None);
        assert_eq!(parse_version_file("# only a comment"), None);
    }

    #[test]
    fn test_tool_versions_primary_only() {
        let content = "python 3.12.1\nnodejs 20.10.0 18.0.0\n";
        assert_eq!(
            parse_tool_versions(content, "nodejs"),
            Some("20.10.0".into())
        );
    }

    #[test]
    fn test_tool_versions_ignores_other_tools() {
        assert_eq!(parse_tool_versions("node 20.1.0\nruby 3.3.0\n", "nodejs"), None);
    }

    #[test]
    fn test_tool_versions_skips_entry_without_version() {
        let content = "# runtimes\nnodejs\nnodejs 22.0.0\n";
        assert_eq!(parse_tool_versions(content, "nodejs"), Some("22.0.0".into()));
    }

    #[test]
    fn test_tool_versions_tabs() {
        assert_eq!(
            parse_tool_versions("nodejs\t21.5.0", "nodejs"),
            Some("21.5.0".into())
        );
    }

    #[test]
    fn test_node_version_file_first() {
        let fs = MockFileSystem::new();
        fs.add_file(".node-version", "20.10.0");
        fs.add_file(".nvmrc", "18");
        fs.add_file(".tool-versions", "nodejs 16.0.0");
        fs.add_file(
            "package.json",
            r#"{"volta": {"node": "19.0.0"}, "engines": {"node": ">=14"}}"#,
        );

        let node = resolve_node_version(&fs, root()).unwrap();
        assert_eq!(node.version, "20.10.0");
        assert_eq!(node.source, NodeVersionSource::NodeVersionFile);
    }

    #[test]
    fn test_blank_node_version_falls_through_to_nvmrc() {
        let fs = MockFileSystem::new();
        fs.add_file(".node-version", "\n# nothing here\n");
        fs.add_file(".nvmrc", "lts/iron");

        let node = resolve_node_version(&fs, root()).unwrap();
        assert_eq!(node.version, "lts/iron");
        assert_eq!(node.source, NodeVersionSource::Nvmrc);
    }

    #[test]
    fn test_tool_versions_before_manifest() {
        let fs = MockFileSystem::new();
        fs.add_file(".tool-versions", "nodejs 20.10.0 18.0.0");
        fs.add_file("package.json", r#"{"volta": {"node": "19.0.0"}}"#);

        assert_eq!(detect_node_version(&fs, root()), Some("20.10.0".into()));
    }

    #[test]
    fn test_volta_before_engines() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "package.json",
            r#"{"volta": {"node": "20.11.1"}, "engines": {"node": ">=18"}}"#,
        );

        let node = resolve_node_version(&fs, root()).unwrap();
        assert_eq!(node.version, "20.11.1");
        assert_eq!(node.source, NodeVersionSource::Volta);
    }

    #[test]
    fn test_numeric_volta_pin() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "package.json",
            r#"{"volta": {"node": 20}, "engines": {"node": ">=18"}}"#,
        );

        let node = resolve_node_version(&fs, root()).unwrap();
        assert_eq!(node.version, "20");
        assert_eq!(node.source, NodeVersionSource::Volta);
    }

    #[test]
    fn test_engines_range_last_resort() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"engines": {"node": "^18 || ^20"}}"#);

        let node = resolve_node_version(&fs, root()).unwrap();
        assert_eq!(node.version, "^18 || ^20");
        assert_eq!(node.source, NodeVersionSource::Engines);
    }

    #[test]
    fn test_version_file_beats_engines() {
        let fs = MockFileSystem::new();
        fs.add_file(".nvmrc", "v22.1.0");
        fs.add_file("package.json", r#"{"engines": {"node": ">=18"}}"#);

        assert_eq!(detect_node_version(&fs, root()), Some("v22.1.0".into()));
    }

    #[test]
    fn test_malformed_manifest_is_absent() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"engines": {"node": ">=18"}"#);

        assert_eq!(detect_node_version(&fs, root()), None);
    }

    #[test]
    fn test_nothing_pinned() {
        let fs = MockFileSystem::new();
        fs.add_dir(".");
        assert_eq!(detect_node_version(&fs, root()), None);
    }
}
