use crate::algorithm::Algorithm;
use md5::Md5;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

const CHUNK_SIZE: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
}

/// Computes the digest of a file under `algorithm`, as lowercase hex.
///
/// The file is streamed in fixed-size chunks so its size is unbounded. A read
/// failure part way through is returned as an error; no partial digest is
/// ever produced.
///
/// # Errors
/// - `ChecksumError::PermissionDenied`: Insufficient permissions to read the file
/// - `ChecksumError::Io`: File doesn't exist or other I/O errors
pub fn checksum_file(path: &Path, algorithm: Algorithm) -> Result<String, ChecksumError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ChecksumError::PermissionDenied(path.to_path_buf())
        } else {
            ChecksumError::Io(e)
        }
    })?;

    let hex = match algorithm {
        Algorithm::Md5 => {
            let mut hasher = Md5::new();
            read_chunks(file, |chunk| hasher.update(chunk))?;
            format!("{:x}", hasher.finalize())
        }
        Algorithm::Sha1 => {
            let mut hasher = Sha1::new();
            read_chunks(file, |chunk| hasher.update(chunk))?;
            format!("{:x}", hasher.finalize())
        }
    };

    debug!("{} checksum of {} is {}", algorithm, path.display(), hex);

    Ok(hex)
}

fn read_chunks(
    mut reader: impl Read,
    mut consume: impl FnMut(&[u8]),
) -> Result<(), ChecksumError> {
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(ChecksumError::Io)?;
        if bytes_read == 0 {
            return Ok(());
        }
        consume(&buffer[..bytes_read]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file_with(content: &[u8]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_checksum_simple_file() {
        let temp_file = temp_file_with(b"Hello, world!");

        assert_eq!(
            checksum_file(temp_file.path(), Algorithm::Md5).unwrap(),
            "6cd3556deb0da54bca060b4c39479839"
        );
        assert_eq!(
            checksum_file(temp_file.path(), Algorithm::Sha1).unwrap(),
            "943a702d06f34599aee1f8da8ef9f7296031d699"
        );
    }

    #[test]
    fn test_checksum_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();

        assert_eq!(
            checksum_file(temp_file.path(), Algorithm::Md5).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            checksum_file(temp_file.path(), Algorithm::Sha1).unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_checksum_spans_many_chunks() {
        let content = vec![b'A'; CHUNK_SIZE * 10 + 17];
        let temp_file = temp_file_with(&content);

        let streamed = checksum_file(temp_file.path(), Algorithm::Sha1).unwrap();
        let one_shot = format!("{:x}", Sha1::digest(&content));

        assert_eq!(streamed, one_shot);
        assert_eq!(streamed.len(), 40);
    }

    #[test]
    fn test_checksum_nonexistent_file() {
        let result = checksum_file(Path::new("/nonexistent/file.txt"), Algorithm::Md5);

        match result {
            Err(ChecksumError::Io(_)) => {}
            _ => panic!("Expected IO error for nonexistent file"),
        }
    }

    #[test]
    fn test_checksum_deterministic() {
        let temp_file = temp_file_with(b"test content");

        let result1 = checksum_file(temp_file.path(), Algorithm::Md5).unwrap();
        let result2 = checksum_file(temp_file.path(), Algorithm::Md5).unwrap();

        assert_eq!(result1, result2);
    }

    #[test]
    #[cfg(unix)]
    fn test_checksum_permission_denied() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let temp_file = temp_file_with(b"test content");

        let mut perms = fs::metadata(temp_file.path()).unwrap().permissions();
        perms.set_mode(0o000);
        fs::set_permissions(temp_file.path(), perms).unwrap();

        // Root ignores file permissions.
        if File::open(temp_file.path()).is_ok() {
            return;
        }

        match checksum_file(temp_file.path(), Algorithm::Sha1) {
            Err(ChecksumError::PermissionDenied(_)) => {}
            _ => panic!("Expected PermissionDenied error for permission denied"),
        }
    }
}
