mod common;

use common::{bmchecksum_cmd, tree_with};
use predicates::prelude::*;

#[test]
fn create_without_flags_respects_rust_log_info() {
    let temp = tree_with(&[("file.txt", "hello")]);

    bmchecksum_cmd()
        .env("RUST_LOG", "info")
        .arg("create")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 2 checksum files"));
}

#[test]
fn create_without_flags_respects_rust_log_warn() {
    let temp = tree_with(&[("file.txt", "hello")]);

    bmchecksum_cmd()
        .env("RUST_LOG", "warn")
        .arg("create")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn verbose_overrides_rust_log_warn() {
    let temp = tree_with(&[("file.txt", "hello")]);

    bmchecksum_cmd()
        .env("RUST_LOG", "warn")
        .arg("-v")
        .arg("create")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 2 checksum files"));
}

#[test]
fn verbose_debug_logs_digests() {
    let temp = tree_with(&[("file.txt", "hello")]);

    bmchecksum_cmd()
        .env("RUST_LOG", "warn")
        .arg("-vv")
        .arg("create")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("MD5 checksum of"))
        .stderr(predicate::str::contains("5d41402abc4b2a76b9719d911017c592"));
}

#[test]
fn log_level_overrides_rust_log_warn() {
    let temp = tree_with(&[("file.txt", "hello")]);

    bmchecksum_cmd()
        .env("RUST_LOG", "warn")
        .arg("--log-level")
        .arg("info")
        .arg("create")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 2 checksum files"));
}

#[test]
fn log_level_conflicts_with_verbose() {
    bmchecksum_cmd()
        .arg("--log-level")
        .arg("info")
        .arg("-v")
        .arg("verify")
        .arg(".")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--log-level <LEVEL>"))
        .stderr(predicate::str::contains("--verbose"));
}

#[test]
fn engine_output_goes_to_stdout_and_logs_to_stderr() {
    let temp = tree_with(&[("file.txt", "hello")]);

    let output = bmchecksum_cmd()
        .env("RUST_LOG", "info")
        .arg("create")
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stdout.contains("Calculating new checksums..."));
    assert!(!stderr.contains("Calculating new checksums..."));
    // capture() makes stderr non-tty, so plain prefixes are used.
    assert!(stderr.contains("INFO: "));
    for ch in stderr.chars() {
        assert!(
            ch.is_ascii(),
            "stderr unexpectedly contains non-ASCII character: {ch:?}"
        );
    }
}
