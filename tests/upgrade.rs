mod common;

use common::{bmchecksum_cmd, tree_with};
use predicates::prelude::*;

#[test]
fn upgrade_converts_legacy_layout() {
    let temp = tree_with(&[
        ("file.txt", "hello"),
        ("bm-md5sums/file.txt", "5d41402abc4b2a76b9719d911017c592\n"),
    ]);

    bmchecksum_cmd()
        .arg("upgrade")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Upgrading legacy MD5 checksums to current format...",
        ))
        .stdout(predicate::str::contains("1 checksum files(s) upgraded"));

    assert!(temp.path().join("bm11-md5sums/file.txt.md5").exists());

    bmchecksum_cmd()
        .arg("verify")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Errors found: 0"));

    bmchecksum_cmd()
        .arg("upgrade")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No legacy BMChecksum files found."));
}
