//! Directory traversal for the manifest engine.
//!
//! `list_directory` lists the immediate children of one directory.
//! `list_tracked_files` walks a whole tree and returns every regular file,
//! relative to the root, skipping the manifest directories (current and
//! legacy, for every algorithm) that live at the root level. The exclusion
//! is by name, so manifest directories created while a caller is working
//! through the returned list are never entered on a later walk either.

use crate::algorithm::Algorithm;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub name: PathBuf,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

fn map_io(path: &Path, e: std::io::Error) -> TreeError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        TreeError::PermissionDenied(path.to_path_buf())
    } else {
        TreeError::Io(e)
    }
}

/// Resolves `path` to the absolute root of an operation.
///
/// Fails with `NotFound` if nothing exists at `path` and with
/// `NotADirectory` if it is not a directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf, TreeError> {
    let root = path.canonicalize().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TreeError::NotFound(path.to_path_buf())
        } else {
            map_io(path, e)
        }
    })?;

    if !root.is_dir() {
        return Err(TreeError::NotADirectory(path.to_path_buf()));
    }

    Ok(root)
}

/// Lists the immediate children of `dir`, sorted by name.
///
/// Symlinks are reported as such and never followed.
pub fn list_directory(dir: &Path) -> Result<Vec<FsEntry>, TreeError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| map_io(dir, e))?;

    let mut entries = Vec::new();

    for entry in read_dir {
        let entry = entry.map_err(TreeError::Io)?;
        let path = entry.path();

        let file_type = entry.file_type().map_err(|e| map_io(&path, e))?;

        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };

        entries.push(FsEntry {
            name: entry.file_name().into(),
            kind,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(entries)
}

/// Lists every tracked file under `root` as a root-relative path.
///
/// A file is tracked when it is a regular file and the first component of
/// its relative path is not a manifest directory name.
pub fn list_tracked_files(root: &Path) -> Result<Vec<PathBuf>, TreeError> {
    walk_files(root, is_tracked)
}

/// Lists every regular file under `dir` as a `dir`-relative path, with no
/// exclusions.
pub fn list_all_files(dir: &Path) -> Result<Vec<PathBuf>, TreeError> {
    walk_files(dir, |_| true)
}

fn is_tracked(relative_path: &Path) -> bool {
    match relative_path.components().next() {
        Some(Component::Normal(first)) => !Algorithm::is_manifest_dir_name(first),
        _ => true,
    }
}

fn walk_files(
    base: &Path,
    include: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>, TreeError> {
    let mut files = Vec::new();
    let mut pending: Vec<PathBuf> = vec![PathBuf::new()];

    while let Some(relative_dir) = pending.pop() {
        let entries = list_directory(&base.join(&relative_dir))?;
        let mut subdirs = Vec::new();

        for entry in entries {
            let relative_path = relative_dir.join(&entry.name);
            if !include(&relative_path) {
                continue;
            }
            match entry.kind {
                EntryKind::File => files.push(relative_path),
                EntryKind::Dir => subdirs.push(relative_path),
                EntryKind::Symlink => {}
            }
        }

        // Reversed so that popping yields names in ascending order.
        pending.extend(subdirs.into_iter().rev());
    }

    Ok(files)
}
