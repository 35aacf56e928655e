use super::commands::{DetectArgs, RunArgs};
use super::output::OutputFormatter;
use crate::action::{issue_error, issue_warning, OutputWriter};
use crate::config::{default_workspace, EnvInputs, PrepConfig};
use crate::pipeline::PrepOrchestrator;
use crate::tauri::PatchOutcome;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// The CI entry point. Any failure is reported as an `::error::` command and exit code 1.
pub async fn handle_run(args: &RunArgs) -> i32 {
    let orchestrator = PrepOrchestrator::default();

    let report = if args.skip_fetch {
        let workspace = args.workspace.clone().unwrap_or_else(default_workspace);
        info!(workspace = %workspace.display(), "Skipping fetch, inspecting workspace");
        orchestrator.inspect(&workspace, true).await
    } else {
        let config = match PrepConfig::from_inputs(&EnvInputs, args.workspace.clone()) {
            Ok(config) => config,
            Err(e) => {
                error!("Configuration error: {}", e);
                issue_error(&e.to_string());
                return 1;
            }
        };
        debug!(?config, "Resolved step configuration");

        match orchestrator.execute(&config).await {
            Ok(report) => report,
            Err(e) => {
                error!("{:#}", e);
                issue_error(&format!("{:#}", e));
                return 1;
            }
        }
    };

    if let Some(message) = patch_warning(&report.patch) {
        issue_warning(message);
    }

    if let Err(e) = OutputWriter::from_env().write(&report.outputs) {
        error!("{:#}", e);
        issue_error(&format!("{:#}", e));
        return 1;
    }

    info!(
        app_name = report.facts.app_name.as_deref().unwrap_or(""),
        app_version = report.facts.app_version.as_deref().unwrap_or(""),
        node_version = report.facts.node_version.as_deref().unwrap_or(""),
        package_manager = report.outputs.get("package-manager").unwrap_or(""),
        "Step outputs set"
    );
    0
}

/// The `::warning::` text for a failed patch; the outcome already carries the full message
fn patch_warning(outcome: &PatchOutcome) -> Option<&str> {
    match outcome {
        PatchOutcome::Failed(message) => Some(message.as_str()),
        PatchOutcome::Patched | PatchOutcome::Skipped => None,
    }
}

/// Local inspection of an already-extracted project
pub async fn handle_detect(args: &DetectArgs) -> i32 {
    let project_path = match args.project_path.clone() {
        Some(path) => path,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to get current directory: {}", e);
                return 1;
            }
        },
    };
    debug!("Project path: {}", project_path.display());

    if !project_path.is_dir() {
        error!(
            "Project path is not a directory: {}",
            project_path.display()
        );
        return 1;
    }

    let project_path: PathBuf = match project_path.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to canonicalize project path: {}", e);
            return 1;
        }
    };

    let report = PrepOrchestrator::default()
        .inspect(&project_path, args.patch)
        .await;

    match OutputFormatter::new(args.format.into()).format(&report) {
        Ok(text) => {
            print!("{}", text);
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}
