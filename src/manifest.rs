//! Sidecar storage.
//!
//! A manifest directory `<root>/bm11-<alg>sums` mirrors the tracked tree: the
//! digest of `<root>/<rel>` lives in `<root>/bm11-<alg>sums/<rel>.<ext>` as
//! plain lowercase hex. Sidecars are written once and never replaced.

use crate::algorithm::Algorithm;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Checksum file not found: {0}")]
    NotFound(PathBuf),
    #[error("Checksum file already exists: {0}")]
    AlreadyExists(PathBuf),
}

fn map_io(path: &Path, e: std::io::Error) -> ManifestError {
    match e.kind() {
        ErrorKind::PermissionDenied => ManifestError::PermissionDenied(path.to_path_buf()),
        ErrorKind::NotFound => ManifestError::NotFound(path.to_path_buf()),
        _ => ManifestError::Io(e),
    }
}

pub fn manifest_dir(root: &Path, algorithm: Algorithm) -> PathBuf {
    root.join(algorithm.manifest_dir_name())
}

pub fn legacy_manifest_dir(root: &Path, algorithm: Algorithm) -> PathBuf {
    root.join(algorithm.legacy_dir_name())
}

/// Maps a root-relative tracked path to its sidecar path.
pub fn sidecar_path(root: &Path, algorithm: Algorithm, relative_path: &Path) -> PathBuf {
    append_extension(
        &manifest_dir(root, algorithm).join(relative_path),
        algorithm.extension(),
    )
}

/// Inverse of `sidecar_path`: maps a path relative to the manifest directory
/// back to the tracked file's root-relative path.
///
/// Returns `None` if the name does not carry the algorithm's extension.
pub fn tracked_path_for_sidecar(algorithm: Algorithm, sidecar_relative: &Path) -> Option<PathBuf> {
    let extension = sidecar_relative.extension()?;
    if extension != algorithm.extension() {
        return None;
    }
    Some(sidecar_relative.with_extension(""))
}

/// Appends `.extension` to the full file name, keeping any existing extension.
pub fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Creates the manifest directory for `algorithm` if it is missing.
///
/// Returns true if the directory was created by this call.
pub fn ensure_manifest_dir(root: &Path, algorithm: Algorithm) -> Result<bool, ManifestError> {
    let dir = manifest_dir(root, algorithm);
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(&dir).map_err(|e| map_io(&dir, e))?;
    Ok(true)
}

/// Reads a stored digest, ignoring trailing whitespace.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// damaged sidecar reads back as a digest that matches nothing.
pub fn read_digest(path: &Path) -> Result<String, ManifestError> {
    let content = std::fs::read(path).map_err(|e| map_io(path, e))?;
    Ok(String::from_utf8_lossy(&content).trim_end().to_string())
}

/// Writes `digest` as the whole content of a new sidecar at `path`.
///
/// Parent directories are created as needed. The content is written to a
/// temporary file in the target directory, fsynced, then linked into place
/// without clobbering, so a crash never leaves a truncated sidecar and an
/// existing sidecar is never replaced.
pub fn write_digest(path: &Path, digest: &str) -> Result<(), ManifestError> {
    use std::io::Write;

    let parent = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;

    let mut temp_file =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| map_io(parent, e))?;

    temp_file
        .write_all(digest.as_bytes())
        .map_err(|e| map_io(path, e))?;

    temp_file.as_file().sync_all().map_err(ManifestError::Io)?;

    temp_file.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == ErrorKind::AlreadyExists {
            ManifestError::AlreadyExists(path.to_path_buf())
        } else {
            map_io(path, e.error)
        }
    })?;

    debug!("Wrote {}", path.display());

    Ok(())
}
