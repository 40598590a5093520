use super::*;
use crate::algorithm::Mode;
use crate::create::create_checksums;
use std::fs;
use tempfile::TempDir;

/// Builds a tree from `(relative path, content)` pairs.
fn tree_with(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (relative, content) in files {
        let path = temp.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    temp
}

fn checksummed_tree(files: &[(&str, &str)], mode: Mode) -> TempDir {
    let temp = tree_with(files);
    let mut discard: Vec<String> = Vec::new();
    create_checksums(temp.path(), mode, &mut discard).unwrap();
    temp
}

fn verify(root: &Path, statistics: Statistics) -> (VerifyOutcome, Vec<String>) {
    let mut messages: Vec<String> = Vec::new();
    let outcome = verify_tree(root, statistics, &mut messages).unwrap();
    (outcome, messages)
}

fn verified(outcome: VerifyOutcome) -> VerifyResult {
    match outcome {
        VerifyOutcome::Verified(result) => result,
        VerifyOutcome::NoVerificationData => panic!("Expected verification to run"),
    }
}
