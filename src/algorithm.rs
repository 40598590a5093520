//! Digest algorithms and the manifest naming they imply.
//!
//! Every algorithm owns a manifest directory at the root of a checksummed
//! tree. The current layout (`bm11-<alg>sums`) stores one sidecar file per
//! tracked file with the algorithm's extension appended. The legacy layout
//! (`bm-<alg>sums`) stored the same sidecars without an extension and is only
//! read by the upgrade process.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    Md5,
    Sha1,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Md5, Algorithm::Sha1];

    /// Human-readable name used in messages, e.g. `SHA-1`.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA-1",
        }
    }

    /// Extension appended to a tracked file's name to form its sidecar name.
    pub fn extension(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
        }
    }

    pub fn manifest_dir_name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "bm11-md5sums",
            Algorithm::Sha1 => "bm11-sha1sums",
        }
    }

    pub fn legacy_dir_name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "bm-md5sums",
            Algorithm::Sha1 => "bm-sha1sums",
        }
    }

    /// Returns true if `name` is the current or legacy manifest directory
    /// name of any algorithm.
    pub fn is_manifest_dir_name(name: &std::ffi::OsStr) -> bool {
        Self::ALL.iter().any(|alg| {
            name == std::ffi::OsStr::new(alg.manifest_dir_name())
                || name == std::ffi::OsStr::new(alg.legacy_dir_name())
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which manifests the checksum process creates or extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Both,
    Md5Only,
    Sha1Only,
}

impl Mode {
    pub fn algorithms(self) -> &'static [Algorithm] {
        match self {
            Mode::Both => &Algorithm::ALL,
            Mode::Md5Only => &[Algorithm::Md5],
            Mode::Sha1Only => &[Algorithm::Sha1],
        }
    }

    pub fn includes(self, algorithm: Algorithm) -> bool {
        self.algorithms().contains(&algorithm)
    }
}
