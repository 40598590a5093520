use crate::algorithm::Algorithm;
use crate::checksum::{ChecksumError, checksum_file};
use crate::manifest::{
    ManifestError, manifest_dir, read_digest, sidecar_path, tracked_path_for_sidecar,
};
use crate::report::{MessageSink, OperationReport, Stopwatch, format_elapsed};
use crate::tree::{EntryKind, TreeError, list_directory, list_tracked_files, resolve_root};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("Directory listing error: {0}")]
    Tree(#[from] TreeError),
    #[error("Checksum error: {0}")]
    Checksum(#[from] ChecksumError),
    #[error("Checksum file error: {0}")]
    Manifest(#[from] ManifestError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistics {
    /// Report elapsed time and the operation counts at the end.
    Emit,
    /// Only separate runs with a blank line when problems were found. Used
    /// when verifying several trees in a row.
    Omit,
}

/// A problem found while verifying. Every finding counts as one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Tracked file present but it has no sidecar.
    MissingChecksum { algorithm: Algorithm, path: PathBuf },
    /// Tracked file content no longer matches its sidecar.
    ChecksumMismatch { algorithm: Algorithm, path: PathBuf },
    /// Sidecar present but its tracked file is gone.
    OrphanChecksum { algorithm: Algorithm, path: PathBuf },
}

impl Finding {
    pub fn path(&self) -> &Path {
        match self {
            Finding::MissingChecksum { path, .. }
            | Finding::ChecksumMismatch { path, .. }
            | Finding::OrphanChecksum { path, .. } => path,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingChecksum { algorithm, path } => {
                write!(f, "* {} checksum is missing for file: {}", algorithm, path.display())
            }
            Finding::ChecksumMismatch { algorithm, path } => {
                write!(f, "* File does not match {} checksum: {}", algorithm, path.display())
            }
            Finding::OrphanChecksum { algorithm, path } => write!(
                f,
                "* {} Checksum Available For Missing File: {}",
                algorithm,
                path.display()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    /// Algorithms whose manifest directory was present.
    pub algorithms: Vec<Algorithm>,
    /// Findings in the order they were reported.
    pub findings: Vec<Finding>,
    pub report: OperationReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Neither manifest directory exists. Not an error.
    NoVerificationData,
    Verified(VerifyResult),
}

impl VerifyOutcome {
    pub fn error_count(&self) -> usize {
        match self {
            VerifyOutcome::NoVerificationData => 0,
            VerifyOutcome::Verified(result) => result.report.errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdirectoryOutcome {
    pub name: PathBuf,
    pub outcome: VerifyOutcome,
}

/// Verifies the tree at `path` against its checksum manifests.
///
/// Only algorithms whose manifest directory exists take part. The run has two
/// passes:
///
/// * Forward: every tracked file is checksummed and compared with its
///   sidecar, reporting files without a sidecar and files whose content no
///   longer matches.
/// * Reverse: every sidecar in each manifest directory is mapped back to its
///   tracked path, reporting sidecars whose file is no longer a tracked
///   file (removed, or replaced by something that is not a regular file).
///
/// Findings are reported through `sink` as they are found and processing
/// continues. Only I/O failures abort the run.
pub fn verify_tree(
    path: &Path,
    statistics: Statistics,
    sink: &mut dyn MessageSink,
) -> Result<VerifyOutcome, VerifyError> {
    let root = resolve_root(path)?;

    let algorithms: Vec<Algorithm> = Algorithm::ALL
        .into_iter()
        .filter(|&algorithm| manifest_dir(&root, algorithm).is_dir())
        .collect();

    if algorithms.is_empty() {
        sink.emit("No verification data could be found. Aborting...\n");
        info!("No checksum manifests in {}", root.display());
        return Ok(VerifyOutcome::NoVerificationData);
    }

    info!("Verifying {}", root.display());
    let stopwatch = Stopwatch::start();
    sink.emit("Verifying based on files and checksums available...\n");

    let mut report = OperationReport::default();
    let mut findings = Vec::new();

    let tracked_files = list_tracked_files(&root)?;

    for relative_path in &tracked_files {
        report.files_scanned += 1;
        let file_path = root.join(relative_path);

        let digests = algorithms
            .iter()
            .map(|&algorithm| Ok((algorithm, checksum_file(&file_path, algorithm)?)))
            .collect::<Result<Vec<(Algorithm, String)>, ChecksumError>>()?;

        for (algorithm, digest) in digests {
            let sidecar = sidecar_path(&root, algorithm, relative_path);
            match read_digest(&sidecar) {
                Err(ManifestError::NotFound(_)) => record(
                    &mut findings,
                    sink,
                    Finding::MissingChecksum {
                        algorithm,
                        path: relative_path.clone(),
                    },
                ),
                Err(e) => return Err(e.into()),
                Ok(stored) if stored != digest => record(
                    &mut findings,
                    sink,
                    Finding::ChecksumMismatch {
                        algorithm,
                        path: relative_path.clone(),
                    },
                ),
                Ok(_) => match algorithm {
                    Algorithm::Md5 => report.md5_matched += 1,
                    Algorithm::Sha1 => report.sha1_matched += 1,
                },
            }
        }
    }

    let tracked_set: BTreeSet<&Path> = tracked_files.iter().map(PathBuf::as_path).collect();

    for &algorithm in &algorithms {
        let dir = manifest_dir(&root, algorithm);
        for sidecar_relative in list_tracked_files(&dir)? {
            let Some(tracked) = tracked_path_for_sidecar(algorithm, &sidecar_relative) else {
                warn!(
                    "Ignoring {}: not a {} checksum file",
                    dir.join(&sidecar_relative).display(),
                    algorithm
                );
                continue;
            };
            if !tracked_set.contains(tracked.as_path()) {
                record(
                    &mut findings,
                    sink,
                    Finding::OrphanChecksum {
                        algorithm,
                        path: tracked,
                    },
                );
            }
        }
    }

    report.errors = findings.len();

    match statistics {
        Statistics::Emit => {
            let separator = if report.errors > 0 { "\n" } else { "" };
            sink.emit(&format!(
                "{}Verification complete. Operation took {}\n",
                separator,
                format_elapsed(stopwatch.elapsed())
            ));
            for line in report.lines() {
                sink.emit(&line);
            }
        }
        Statistics::Omit => {
            if report.errors > 0 {
                sink.emit("");
            }
        }
    }

    info!(
        "Verified {} files in {} with {} errors",
        report.files_scanned,
        root.display(),
        report.errors
    );

    Ok(VerifyOutcome::Verified(VerifyResult {
        algorithms,
        findings,
        report,
    }))
}

fn record(findings: &mut Vec<Finding>, sink: &mut dyn MessageSink, finding: Finding) {
    sink.emit(&finding.to_string());
    findings.push(finding);
}

/// Verifies every immediate subdirectory of `path` in name order.
///
/// Each subdirectory is verified as a tree of its own with statistics
/// omitted; only the total elapsed time is reported at the end. Error counts
/// are returned per subdirectory and are not summed into a combined report.
pub fn verify_subdirectories(
    path: &Path,
    sink: &mut dyn MessageSink,
) -> Result<Vec<SubdirectoryOutcome>, VerifyError> {
    let root = resolve_root(path)?;
    let stopwatch = Stopwatch::start();

    // Symlinks count when they resolve to a directory.
    let subdirectories: Vec<PathBuf> = list_directory(&root)?
        .into_iter()
        .filter(|entry| match entry.kind {
            EntryKind::Dir => true,
            EntryKind::Symlink => root.join(&entry.name).is_dir(),
            EntryKind::File => false,
        })
        .map(|entry| entry.name)
        .collect();

    let mut outcomes = Vec::with_capacity(subdirectories.len());
    for name in subdirectories {
        sink.emit(&format!("Verifying files in directory: {}\n", name.display()));
        let outcome = verify_tree(&root.join(&name), Statistics::Omit, sink)?;
        outcomes.push(SubdirectoryOutcome { name, outcome });
    }

    sink.emit(&format!(
        "Verification of all direct subdirectories complete. Operation took {}\n",
        format_elapsed(stopwatch.elapsed())
    ));

    Ok(outcomes)
}

#[cfg(test)]
mod tests;
