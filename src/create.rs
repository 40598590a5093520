use crate::algorithm::{Algorithm, Mode};
use crate::checksum::{ChecksumError, checksum_file};
use crate::manifest::{ManifestError, ensure_manifest_dir, sidecar_path, write_digest};
use crate::report::{MessageSink, Stopwatch, format_elapsed};
use crate::tree::{TreeError, list_tracked_files, resolve_root};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("Directory listing error: {0}")]
    Tree(#[from] TreeError),
    #[error("Checksum error: {0}")]
    Checksum(#[from] ChecksumError),
    #[error("Checksum file error: {0}")]
    Manifest(#[from] ManifestError),
}

#[derive(Debug)]
pub struct CreateResult {
    /// Files that had at least one sidecar written by this run.
    pub files_processed: usize,
    /// Sidecar files written, relative to the root.
    pub sidecars_written: Vec<PathBuf>,
}

/// Creates or extends the checksum manifests of the tree at `path`.
///
/// For every algorithm selected by `mode` the manifest directory is created
/// if missing. Then each tracked file is checksummed and a sidecar is written
/// for every selected algorithm that does not have one yet.
///
/// # Behavior
///
/// - Existing sidecars are never overwritten, so a second run over an
///   unchanged tree writes nothing and reports zero files.
/// - Adding files to the tree and re-running only fills the gaps.
/// - A file counts as processed if at least one of its sidecars was written.
///
/// # Errors
///
/// Returns an error if the root is missing, a file cannot be read, or a
/// sidecar cannot be written. Sidecars written before the failure stay in
/// place.
pub fn create_checksums(
    path: &Path,
    mode: Mode,
    sink: &mut dyn MessageSink,
) -> Result<CreateResult, CreateError> {
    let root = resolve_root(path)?;
    info!("Creating checksums in {}", root.display());

    let mut adding = false;
    for &algorithm in mode.algorithms() {
        if ensure_manifest_dir(&root, algorithm)? {
            sink.emit(&format!(
                "{} checksum folder not found in starting directory. Creating new checksums for all discovered files...",
                algorithm
            ));
        } else {
            sink.emit(&format!(
                "{} checksum folder found in starting directory. Adding checksums for new files only...",
                algorithm
            ));
            adding = true;
        }
    }
    if adding {
        sink.emit("Existing checksum will not be replaced.");
    }

    let files = list_tracked_files(&root)?;

    let stopwatch = Stopwatch::start();
    sink.emit("\nCalculating new checksums...");

    let mut files_processed = 0;
    let mut sidecars_written = Vec::new();

    for relative_path in &files {
        let file_path = root.join(relative_path);

        let digests = mode
            .algorithms()
            .iter()
            .map(|&algorithm| Ok((algorithm, checksum_file(&file_path, algorithm)?)))
            .collect::<Result<Vec<(Algorithm, String)>, ChecksumError>>()?;

        let mut written = false;
        for (algorithm, digest) in digests {
            let sidecar = sidecar_path(&root, algorithm, relative_path);
            if sidecar.exists() {
                continue;
            }
            write_digest(&sidecar, &digest)?;
            sidecars_written.push(
                sidecar
                    .strip_prefix(&root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| sidecar.clone()),
            );
            written = true;
        }

        if written {
            files_processed += 1;
        }
    }

    sink.emit(&format!(
        "\nChecksum calculation complete. {} files(s) checksummed. Operation took {}\n",
        files_processed,
        format_elapsed(stopwatch.elapsed())
    ));
    info!(
        "Checksummed {} of {} files in {}",
        files_processed,
        files.len(),
        root.display()
    );

    Ok(CreateResult {
        files_processed,
        sidecars_written,
    })
}
