//! Output formatting for the `detect` command

use crate::pipeline::PrepReport;
use crate::tauri::PatchOutcome;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &PrepReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report as YAML")
            }
            OutputFormat::Human => Ok(format_human(report)),
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn format_human(report: &PrepReport) -> String {
    let mut output = String::new();

    output.push_str("Build Metadata\n");
    output.push_str(&"\u{2501}".repeat(40));
    output.push_str("\n\n");

    let width = report
        .outputs
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, value) in report.outputs.iter() {
        output.push_str(&format!("{:<width$}  {}\n", name, or_dash(value), width = width));
    }

    output.push('\n');
    let patch = match &report.patch {
        PatchOutcome::Patched => "patched".to_string(),
        PatchOutcome::Skipped => "not patched".to_string(),
        PatchOutcome::Failed(message) => format!("failed ({})", message),
    };
    output.push_str(&format!("Tauri config: {}\n", patch));

    output
}
