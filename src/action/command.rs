//! Workflow commands (`::error::`, `::warning::`) printed to stdout

/// Escapes a message the way the Actions toolkit does before embedding it in a
/// workflow command
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn format_command(command: &str, message: &str) -> String {
    format!("::{}::{}", command, escape_data(message))
}

/// Marks the step as failed in the run summary
pub fn issue_error(message: &str) {
    println!("{}", format_command("error", message));
}

pub fn issue_warning(message: &str) {
    println!("{}", format_command("warning", message));
}
