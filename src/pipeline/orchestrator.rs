use crate::config::PrepConfig;
use crate::detect::{
    detect_app_name, detect_app_version, detect_node_version, detect_package_manager,
};
use crate::fetch::{self, ExtractSummary};
use crate::fs::{FileSystem, RealFileSystem};
use crate::output::{BuildFacts, StepOutputs};
use crate::tauri::{patch_tauri_config, BundleSettings, PatchOutcome};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct PrepReport {
    pub extract: Option<ExtractSummary>,
    #[serde(serialize_with = "serialize_patch")]
    pub patch: PatchOutcome,
    pub facts: BuildFacts,
    pub outputs: StepOutputs,
}

fn serialize_patch<S: serde::Serializer>(outcome: &PatchOutcome, s: S) -> Result<S::Ok, S::Error> {
    match outcome {
        PatchOutcome::Patched => s.serialize_str("patched"),
        PatchOutcome::Skipped => s.serialize_str("skipped"),
        PatchOutcome::Failed(message) => s.serialize_str(&format!("failed: {}", message)),
    }
}

/// Sequences fetch → extract → patch → detect. Only the fetch/extract phase can fail;
/// the config patch is finished before any detector reads the tree.
pub struct PrepOrchestrator {
    fs: Arc<dyn FileSystem>,
    bundle: BundleSettings,
}

impl Default for PrepOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem::new()))
    }
}

impl PrepOrchestrator {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            bundle: BundleSettings::default(),
        }
    }

    pub fn with_bundle_settings(mut self, bundle: BundleSettings) -> Self {
        self.bundle = bundle;
        self
    }

    pub async fn execute(&self, config: &PrepConfig) -> Result<PrepReport> {
        let start = Instant::now();
        info!(
            workspace = %config.workspace.display(),
            bucket = %config.s3.bucket,
            key = %config.s3.key,
            "Starting build preparation"
        );

        let phase_start = Instant::now();
        let summary = fetch::fetch_and_extract(&config.s3, &config.workspace)
            .await
            .with_context(|| {
                format!(
                    "Failed to fetch s3://{}/{}",
                    config.s3.bucket, config.s3.key
                )
            })?;
        info!(
            phase = "fetch",
            duration_ms = phase_start.elapsed().as_millis(),
            "Phase complete"
        );

        let mut report = self.inspect(&config.workspace, true).await;
        report.extract = Some(summary);

        info!(
            total_time_ms = start.elapsed().as_millis(),
            "Build preparation complete"
        );
        Ok(report)
    }

    /// Patch (optionally) and detect over an already-extracted tree
    pub async fn inspect(&self, project_root: &Path, patch: bool) -> PrepReport {
        let phase_start = Instant::now();
        let patch = if patch {
            patch_tauri_config(self.fs.as_ref(), project_root, &self.bundle)
        } else {
            PatchOutcome::Skipped
        };
        info!(
            phase = "patch",
            duration_ms = phase_start.elapsed().as_millis(),
            "Phase complete"
        );

        let phase_start = Instant::now();
        let facts = detect_concurrently(Arc::clone(&self.fs), project_root.to_path_buf()).await;
        info!(
            phase = "detect",
            duration_ms = phase_start.elapsed().as_millis(),
            "Phase complete"
        );

        let outputs = StepOutputs::from_facts(&facts);
        PrepReport {
            extract: None,
            patch,
            facts,
            outputs,
        }
    }
}

fn spawn_detector<T, F>(fs: &Arc<dyn FileSystem>, root: &Path, detector: F) -> JoinHandle<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn FileSystem, &Path) -> T + Send + 'static,
{
    let fs = Arc::clone(fs);
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || detector(fs.as_ref(), &root))
}

async fn joined<T: Default>(name: &str, handle: JoinHandle<T>) -> T {
    handle.await.unwrap_or_else(|e| {
        warn!(detector = name, error = %e, "Detector task failed");
        T::default()
    })
}

/// Runs the independent detectors on the blocking pool and gathers their results
pub async fn detect_concurrently(fs: Arc<dyn FileSystem>, project_root: PathBuf) -> BuildFacts {
    let name = spawn_detector(&fs, &project_root, detect_app_name);
    let version = spawn_detector(&fs, &project_root, detect_app_version);
    let node = spawn_detector(&fs, &project_root, detect_node_version);
    let manager = spawn_detector(&fs, &project_root, detect_package_manager);

    let (app_name, app_version, node_version, package_manager) = tokio::join!(
        joined("app-name", name),
        joined("app-version", version),
        joined("node-version", node),
        joined("package-manager", manager),
    );

    BuildFacts {
        app_name,
        app_version,
        node_version,
        package_manager,
    }
}
