//! Archive extraction. ZIP is the format CI pipelines upload; gzip'd tarballs are
//! accepted as well.

use super::FetchError;
use flate2::read::GzDecoder;
use serde::Serialize;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};
use tracing::trace;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const EMPTY_ZIP_MAGIC: &[u8] = b"PK\x05\x06";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(EMPTY_ZIP_MAGIC) {
            Some(Self::Zip)
        } else if bytes.starts_with(GZIP_MAGIC) {
            Some(Self::TarGz)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    pub format: ArchiveFormat,
    /// Files and directories written
    pub entries: usize,
}

/// Unpacks `bytes` under `destination`, creating it if needed. Every entry path is
/// validated before anything is written.
pub fn extract_archive(bytes: &[u8], destination: &Path) -> Result<ExtractSummary, FetchError> {
    let format = ArchiveFormat::sniff(bytes).ok_or(FetchError::UnsupportedArchive)?;
    fs::create_dir_all(destination).map_err(|e| FetchError::io(destination, e))?;

    let entries = match format {
        ArchiveFormat::Zip => extract_zip(bytes, destination)?,
        ArchiveFormat::TarGz => extract_tar_gz(bytes, destination)?,
    };
    Ok(ExtractSummary { format, entries })
}

fn safe_relative_path(name: &str) -> Result<PathBuf, FetchError> {
    let path = Path::new(name);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(FetchError::UnsafeEntry(name.to_string()))
            }
        }
    }
    Ok(clean)
}

fn zip_error(e: zip::result::ZipError) -> FetchError {
    FetchError::Archive(e.to_string())
}

fn extract_zip(bytes: &[u8], destination: &Path) -> Result<usize, FetchError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(zip_error)?;

    let mut targets = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let file = archive.by_index_raw(index).map_err(zip_error)?;
        targets.push(safe_relative_path(file.name())?);
    }

    let mut written = 0;
    for (index, relative) in targets.into_iter().enumerate() {
        if relative.as_os_str().is_empty() {
            continue;
        }
        let mut file = archive.by_index(index).map_err(zip_error)?;
        let target = destination.join(&relative);

        if file.is_dir() {
            fs::create_dir_all(&target).map_err(|e| FetchError::io(&target, e))?;
        } else {
            write_entry(&mut file, &target)?;
        }
        restore_mode(&target, file.unix_mode())?;

        trace!(path = %relative.display(), "Extracted");
        written += 1;
    }
    Ok(written)
}

#[cfg(unix)]
fn restore_mode(target: &Path, mode: Option<u32>) -> Result<(), FetchError> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        fs::set_permissions(target, fs::Permissions::from_mode(mode & 0o7777))
            .map_err(|e| FetchError::io(target, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn restore_mode(_target: &Path, _mode: Option<u32>) -> Result<(), FetchError> {
    Ok(())
}

fn write_entry(reader: &mut impl Read, target: &Path) -> Result<(), FetchError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
    }
    let mut out = fs::File::create(target).map_err(|e| FetchError::io(target, e))?;
    io::copy(reader, &mut out).map_err(|e| FetchError::io(target, e))?;
    Ok(())
}

fn tar_error(e: io::Error) -> FetchError {
    FetchError::Archive(e.to_string())
}

fn extract_tar_gz(bytes: &[u8], destination: &Path) -> Result<usize, FetchError> {
    // First pass only validates paths so a bad entry leaves nothing behind
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    for entry in archive.entries().map_err(tar_error)? {
        let entry = entry.map_err(tar_error)?;
        let path = entry.path().map_err(tar_error)?;
        safe_relative_path(&path.to_string_lossy())?;
    }

    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    archive.set_preserve_permissions(true);
    let mut written = 0;
    for entry in archive.entries().map_err(tar_error)? {
        let mut entry = entry.map_err(tar_error)?;
        let relative = entry.path().map_err(tar_error)?.into_owned();
        if entry
            .unpack_in(destination)
            .map_err(|e| FetchError::io(&destination.join(&relative), e))?
        {
            trace!(path = %relative.display(), "Extracted");
            written += 1;
        }
    }
    Ok(written)
}
