use assert_cmd::{Command, cargo::cargo_bin_cmd};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn bmchecksum_cmd() -> Command {
    cargo_bin_cmd!("bmchecksum")
}

/// Builds a tree from `(relative path, content)` pairs.
pub fn tree_with(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (relative, content) in files {
        let path = temp.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    temp
}

// Each integration test file is compiled as its own crate, and not all of
// them create checksums up front.
#[allow(dead_code)]
pub fn create(root: &Path, args: &[&str]) {
    bmchecksum_cmd()
        .arg("create")
        .args(args)
        .arg(root)
        .assert()
        .success();
}
