use super::command::escape_data;
use crate::output::StepOutputs;
use anyhow::{Context, Result};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Destination for step outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputWriter {
    /// The runner's `GITHUB_OUTPUT` file
    File(PathBuf),
    /// Legacy `::set-output` commands on stdout, for runners without an output file
    Stdout,
}

impl OutputWriter {
    pub fn from_env() -> Self {
        match env::var_os("GITHUB_OUTPUT").filter(|v| !v.is_empty()) {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::Stdout,
        }
    }

    pub fn write(&self, outputs: &StepOutputs) -> Result<()> {
        match self {
            Self::File(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file {:?}", path))?;

                let mut buffer = String::new();
                for (name, value) in outputs.iter() {
                    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                    buffer.push_str(&format_file_command(name, value, &delimiter));
                }
                file.write_all(buffer.as_bytes())
                    .with_context(|| format!("Failed to write output file {:?}", path))?;
            }
            Self::Stdout => {
                for (name, value) in outputs.iter() {
                    println!("{}", format_set_output(name, value));
                }
            }
        }

        debug!(count = outputs.len(), "Step outputs written");
        Ok(())
    }
}

/// Heredoc form used by the runner's file commands; safe for multi-line values
pub fn format_file_command(name: &str, value: &str, delimiter: &str) -> String {
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

pub fn format_set_output(name: &str, value: &str) -> String {
    format!("::set-output name={}::{}", name, escape_data(value))
}
