//! Absence-on-failure probes over a [`FileSystem`].
//!
//! Every optional input the detectors look at goes through these helpers. A missing
//! file, an unreadable file and a file that fails to parse all collapse into `None`,
//! so callers can chain sources with `or_else` without ever seeing an error.

use super::FileSystem;
use serde_json::Value;
use std::path::Path;
use tracing::trace;

pub fn exists(fs: &dyn FileSystem, path: &Path) -> bool {
    fs.exists(path)
}

pub fn read_text(fs: &dyn FileSystem, path: &Path) -> Option<String> {
    match fs.read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            trace!(path = %path.display(), error = %e, "Source not available");
            None
        }
    }
}

pub fn read_json(fs: &dyn FileSystem, path: &Path) -> Option<Value> {
    let content = read_text(fs, path)?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            trace!(path = %path.display(), error = %e, "Ignoring malformed JSON");
            None
        }
    }
}

/// Non-blank, non-`#` lines of a text file, trimmed
pub fn meaningful_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// String at a JSON pointer, treating empty strings like missing keys
pub fn string_at<'a>(doc: &'a Value, pointer: &str) -> Option<&'a str> {
    doc.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Scalar at a JSON pointer rendered as text. Non-empty strings and non-zero
/// numbers count; `0`, `""`, booleans, arrays and objects are absent.
pub fn scalar_at(doc: &Value, pointer: &str) -> Option<String> {
    match doc.pointer(pointer)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}
