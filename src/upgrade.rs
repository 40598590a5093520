use crate::algorithm::Algorithm;
use crate::manifest::{append_extension, legacy_manifest_dir, manifest_dir};
use crate::report::{MessageSink, Stopwatch, format_elapsed};
use crate::tree::{TreeError, list_all_files, resolve_root};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    #[error("Directory listing error: {0}")]
    Tree(#[from] TreeError),
    #[error("Failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[error("Refusing to overwrite existing file: {0}")]
    TargetExists(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeResult {
    /// False if no legacy manifest directory was found.
    pub legacy_found: bool,
    /// Algorithms whose legacy manifest was converted.
    pub upgraded: Vec<Algorithm>,
    /// Algorithms skipped because a current manifest already exists.
    pub skipped: Vec<Algorithm>,
    pub files_upgraded: usize,
}

fn rename(from: &Path, to: &Path) -> Result<(), UpgradeError> {
    if to.symlink_metadata().is_ok() {
        return Err(UpgradeError::TargetExists(to.to_path_buf()));
    }
    std::fs::rename(from, to).map_err(|source| UpgradeError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Converts legacy `bm-<alg>sums` manifests under `path` to the current layout.
///
/// For each algorithm with a legacy manifest, the directory is renamed to its
/// current name and every sidecar inside gets the algorithm's extension
/// appended. Contents are untouched. An algorithm whose current manifest
/// already exists is skipped entirely; the two are never merged.
pub fn upgrade_legacy(
    path: &Path,
    sink: &mut dyn MessageSink,
) -> Result<UpgradeResult, UpgradeError> {
    let root = resolve_root(path)?;

    let legacy_found = Algorithm::ALL
        .iter()
        .any(|&algorithm| legacy_manifest_dir(&root, algorithm).exists());

    let mut result = UpgradeResult {
        legacy_found,
        upgraded: Vec::new(),
        skipped: Vec::new(),
        files_upgraded: 0,
    };

    if !legacy_found {
        sink.emit("No legacy BMChecksum files found.");
        return Ok(result);
    }

    info!("Upgrading legacy checksums in {}", root.display());
    let stopwatch = Stopwatch::start();

    for algorithm in Algorithm::ALL {
        let current = manifest_dir(&root, algorithm);
        let legacy = legacy_manifest_dir(&root, algorithm);

        if current.exists() {
            sink.emit(&format!(
                "Current version of {algorithm} checksum data found. Skipping {algorithm} checksum upgrade...\n"
            ));
            result.skipped.push(algorithm);
            continue;
        }
        if !legacy.exists() {
            continue;
        }

        sink.emit(&format!(
            "Upgrading legacy {algorithm} checksums to current format...\n"
        ));
        rename(&legacy, &current)?;

        // Descending order within each directory, so that `x.md5` has moved
        // to `x.md5.md5` before `x` is renamed to `x.md5`.
        let mut files = list_all_files(&current)?;
        files.reverse();

        for relative in files {
            let from = current.join(&relative);
            let to = append_extension(&from, algorithm.extension());
            rename(&from, &to)?;
            debug!("Renamed {} to {}", from.display(), to.display());
            result.files_upgraded += 1;
        }
        result.upgraded.push(algorithm);
    }

    sink.emit(&format!(
        "Checksum upgrade complete. {} checksum files(s) upgraded. The operation took {}\n",
        result.files_upgraded,
        format_elapsed(stopwatch.elapsed())
    ));
    info!(
        "Upgraded {} legacy checksum files in {}",
        result.files_upgraded,
        root.display()
    );

    Ok(result)
}
