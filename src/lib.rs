//! tauri-prep - build preparation for Tauri apps in CI
//!
//! Downloads a project archive from S3-compatible storage, extracts it into the
//! workspace, forces the bundle section of `src-tauri/tauri.conf.json` and reports
//! the metadata a later build step needs.
//!
//! # Detection
//!
//! - **App identity**: `productName`/`version` from the Tauri config, falling back to
//!   `package.json`
//! - **Node.js version**: `.node-version`, `.nvmrc`, `.tool-versions`, Volta pin, then
//!   `engines.node`, first hit wins
//! - **Package manager**: lock file first, `packageManager` field second
//!
//! # Example Usage
//!
//! ```ignore
//! use tauri_prep::detect::detect_all;
//! use tauri_prep::fs::RealFileSystem;
//! use tauri_prep::output::StepOutputs;
//! use std::path::Path;
//!
//! let facts = detect_all(&RealFileSystem::new(), Path::new("."));
//! for (name, value) in StepOutputs::from_facts(&facts).iter() {
//!     println!("{name}={value}");
//! }
//! ```

pub mod action;
pub mod cli;
pub mod config;
pub mod detect;
pub mod fetch;
pub mod fs;
pub mod output;
pub mod pipeline;
pub mod stack;
pub mod tauri;
pub mod util;

pub use config::{ConfigError, PrepConfig, S3Settings};
pub use detect::detect_all;
pub use fetch::FetchError;
pub use output::{BuildFacts, StepOutputs};
pub use pipeline::{PrepOrchestrator, PrepReport};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
