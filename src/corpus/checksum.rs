//! Streaming content digests for dataset files.
//!
//! BLAKE3 truncated to 128 bits (32 hex chars). The digest detects accidental
//! corruption and truncation, not adversarial tampering, so the truncated form
//! keeps checked-in indexes compact while staying deterministic across
//! platforms. Files are fed to the hasher in fixed-size chunks; audio files
//! run to gigabytes and must never be read whole into memory.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::corpus::error::DataError;

const CHUNK_SIZE: usize = 64 * 1024;
const DIGEST_BYTES: usize = 16;

/// Digest a file's bytes. Identical content produces an identical digest.
/// A missing file is `NotFound`; other read failures are environment errors.
pub fn file_checksum(path: &Path) -> Result<String, DataError> {
    let mut file = File::open(path).map_err(|err| DataError::from_read(path, err))?;
    let mut hasher = blake3::Hasher::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let read = file
            .read(&mut chunk)
            .map_err(|err| DataError::from_read(path, err))?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }
    let digest = hasher.finalize();
    Ok(hex::encode(&digest.as_bytes()[..DIGEST_BYTES]))
}

/// Digest an in-memory byte slice with the same truncation as [file_checksum].
pub fn bytes_checksum(data: &[u8]) -> String {
    let digest = blake3::hash(data);
    hex::encode(&digest.as_bytes()[..DIGEST_BYTES])
}
