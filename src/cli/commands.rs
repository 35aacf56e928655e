use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fetch a Tauri project archive, patch its bundle settings and detect build metadata
#[derive(Parser, Debug)]
#[command(
    name = "tauri-prep",
    about = "Prepare a Tauri project for a CI build",
    version,
    long_about = "tauri-prep downloads a project archive from S3-compatible storage, extracts it \
                  into the workspace, forces the bundle settings in src-tauri/tauri.conf.json and \
                  reports the app name/version, Node.js version and package manager as step outputs."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the full CI step",
        long_about = "Reads the step inputs from INPUT_* environment variables, fetches and \
                      extracts the archive, patches the Tauri config and writes the step outputs \
                      to $GITHUB_OUTPUT.\n\n\
                      Examples:\n  \
                      tauri-prep run\n  \
                      tauri-prep run --workspace /tmp/ws --skip-fetch"
    )]
    Run(RunArgs),

    #[command(
        about = "Detect build metadata in an extracted project",
        long_about = "Inspects a local project tree and prints what the CI step would output.\n\n\
                      Examples:\n  \
                      tauri-prep detect\n  \
                      tauri-prep detect /path/to/app --format json\n  \
                      tauri-prep detect --patch"
    )]
    Detect(DetectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Extraction directory (defaults to $GITHUB_WORKSPACE, then the current directory)"
    )]
    pub workspace: Option<PathBuf>,

    #[arg(long, help = "Skip the S3 download and use the workspace as-is")]
    pub skip_fetch: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Also patch src-tauri/tauri.conf.json")]
    pub patch: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
