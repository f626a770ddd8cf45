//! Error taxonomy for the corpus engine.
//!
//! Structural violations (unknown track ids, malformed indexes) are fatal and
//! surface immediately; data-availability problems degrade to `None` at the
//! call sites that can tolerate them and are reported by the validator rather
//! than raised.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum DataError {
    /// Requested dataset name is not in the loader registry.
    UnknownDataset { name: String },
    /// Requested track id is not a key of the dataset index. Raised at Track
    /// construction, before any file I/O.
    InvalidTrackId { dataset: String, track_id: String },
    /// Requested annotation role has no registered parser for this dataset.
    UnknownRole { dataset: String, role: String },
    /// A resolved path did not exist when a parser or the checksum needed to
    /// read it. Raised lazily, at first access.
    NotFound { path: PathBuf },
    /// An actively fetched file disagreed with its expected checksum. Used by
    /// download verification only; the validator reports mismatches instead.
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
    /// The serialized index violated a structural invariant.
    InvalidIndex { message: String },
    /// An annotation file exists but could not be parsed.
    Parse { path: PathBuf, message: String },
    /// Environment failure unrelated to the dataset's own state.
    Io { path: PathBuf, source: io::Error },
    /// A remote resource could not be fetched.
    Download { url: String, message: String },
}

impl DataError {
    pub fn parse(path: &Path, message: impl Into<String>) -> DataError {
        DataError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Map a read failure at the parser boundary: a nonexistent path becomes
    /// `NotFound` naming the exact path, anything else stays an I/O error.
    pub fn from_read(path: &Path, err: io::Error) -> DataError {
        if err.kind() == io::ErrorKind::NotFound {
            DataError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::UnknownDataset { name } => {
                write!(f, "unknown dataset '{name}'")
            }
            DataError::InvalidTrackId { dataset, track_id } => {
                write!(f, "track id '{track_id}' is not in the {dataset} index")
            }
            DataError::UnknownRole { dataset, role } => {
                write!(f, "no parser registered for role '{role}' in {dataset}")
            }
            DataError::NotFound { path } => {
                write!(f, "file not found: {}", path.display())
            }
            DataError::ChecksumMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "checksum mismatch for {}: expected {expected}, got {actual}",
                path.display()
            ),
            DataError::InvalidIndex { message } => write!(f, "invalid index: {message}"),
            DataError::Parse { path, message } => {
                write!(f, "failed to parse {}: {message}", path.display())
            }
            DataError::Io { path, source } => {
                write!(f, "i/o error on {}: {source}", path.display())
            }
            DataError::Download { url, message } => {
                write!(f, "download failed for {url}: {message}")
            }
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
