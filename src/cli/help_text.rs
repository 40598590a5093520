pub(super) const ROOT_LONG_ABOUT: &str = "\
Store and later verify the checksums of files in a directory tree

bmchecksum computes MD5 and/or SHA-1 checksums for every file below a base directory
and stores each one in a small sidecar file. The sidecars live in manifest directories
at the top of the base directory and mirror its layout:

  <base>/bm11-md5sums/<path/to/file>.md5
  <base>/bm11-sha1sums/<path/to/file>.sha1

Each sidecar contains nothing but the lowercase hex digest. Verifying recomputes every
checksum and compares it with the stored one.

COMMANDS:

  create
    Create checksums for all files. If a manifest directory already exists, only files
    without a checksum are added; existing checksums are never replaced.

  verify
    Recompute all checksums and report files whose content changed, files without a
    checksum, and checksums whose file has disappeared.

  verify-subdirs
    Run 'verify' on every direct subdirectory of the base directory in turn.

  upgrade
    Convert checksums written by version 1.0 (bm-md5sums, bm-sha1sums) to the
    current layout.

EXAMPLES:

  # Create MD5 and SHA-1 checksums
  $ bmchecksum create /data/photos

  # Only SHA-1
  $ bmchecksum create --mode sha1 /data/photos

  # Check for corruption
  $ bmchecksum verify /data/photos || echo 'Integrity check failed!'

  # Check every album below /data/photos separately
  $ bmchecksum verify-subdirs /data/photos

EXIT STATUS:

  0    Success
  1    Verification found at least one error
  255  Any other error (missing directory, I/O error, invalid arguments)
";

pub(super) const VERIFY_LONG_ABOUT: &str = "\
Verify file checksums against the stored manifests

Every file below the base directory is checksummed with each algorithm whose manifest
directory exists and compared with its sidecar. Three kinds of error are reported:

  * <ALG> checksum is missing for file: <path>
      The file has no sidecar (for example it was added after checksumming).

  * File does not match <ALG> checksum: <path>
      The file content changed or is corrupted.

  * <ALG> Checksum Available For Missing File: <path>
      A sidecar exists but the file it describes is gone.

Processing always continues past errors. A summary with the number of files, matched
checksums and errors is printed at the end. The exit status is 1 if any error was found.
";
