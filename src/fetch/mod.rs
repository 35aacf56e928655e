//! Project archive retrieval: S3 `GetObject` followed by extraction into the
//! workspace. Any failure here is fatal for the whole step.

pub mod extract;
pub mod s3;
pub mod sigv4;

pub use extract::{extract_archive, ArchiveFormat, ExtractSummary};
pub use s3::S3Client;
pub use sigv4::Credentials;

use crate::config::S3Settings;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid S3 endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GetObject s3://{bucket}/{key} failed with {status}: {body}")]
    Status {
        bucket: String,
        key: String,
        status: u16,
        body: String,
    },

    #[error("Unsupported archive format (expected zip or tar.gz)")]
    UnsupportedArchive,

    #[error("Corrupt archive: {0}")]
    Archive(String),

    #[error("Archive entry escapes the destination directory: {0}")]
    UnsafeEntry(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Extraction task failed: {0}")]
    Join(String),
}

impl FetchError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Downloads the configured object and unpacks it into `destination`
pub async fn fetch_and_extract(
    settings: &S3Settings,
    destination: &Path,
) -> Result<ExtractSummary, FetchError> {
    let client = S3Client::new(settings.clone())?;
    let bytes = client.get_object().await?;
    info!(
        bucket = %settings.bucket,
        key = %settings.key,
        bytes = bytes.len(),
        "Downloaded project archive"
    );

    let destination = destination.to_path_buf();
    let summary = tokio::task::spawn_blocking(move || extract_archive(&bytes, &destination))
        .await
        .map_err(|e| FetchError::Join(e.to_string()))??;

    info!(
        format = ?summary.format,
        entries = summary.entries,
        "Extracted project archive"
    );
    Ok(summary)
}
