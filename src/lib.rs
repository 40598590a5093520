//! Checksum manifests for directory trees.
//!
//! The engine computes per-file MD5 and SHA-1 digests, stores them as sidecar
//! files in manifest directories mirroring the tree, verifies them later, and
//! upgrades manifests written in the legacy layout. All user-facing output goes
//! through a caller-supplied [`MessageSink`].

pub mod algorithm;
pub mod checksum;
pub mod create;
pub mod manifest;
pub mod report;
pub mod tree;
pub mod upgrade;
pub mod verify;

pub use algorithm::{Algorithm, Mode};
pub use create::{CreateError, CreateResult, create_checksums};
pub use report::{MessageSink, OperationReport};
pub use tree::resolve_root;
pub use upgrade::{UpgradeError, UpgradeResult, upgrade_legacy};
pub use verify::{
    Finding, Statistics, SubdirectoryOutcome, VerifyError, VerifyOutcome, VerifyResult,
    verify_subdirectories, verify_tree,
};
