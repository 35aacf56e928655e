//! GitHub Actions host boundary: step outputs and workflow commands

pub mod command;
pub mod output;

pub use command::{escape_data, issue_error, issue_warning};
pub use output::OutputWriter;
