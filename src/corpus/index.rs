//! Dataset index: the checked-in inventory of track id -> file role -> path
//! and checksum. Loaded once, structurally validated, then shared read-only.
//!
//! The serialized form is the compatibility-sensitive surface of the crate:
//! indexes are versioned and distributed independently of code, so every
//! entry keeps the exact 2-element `[relative_path|null, checksum|null]`
//! shape on the wire.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::error::DataError;

/// One manifest entry: relative path and content checksum.
///
/// `(null, null)` declares the role absent for its track. A present path with
/// a `null` checksum asks for an existence-only check: once the file is
/// confirmed present it is always considered valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef(pub Option<String>, pub Option<String>);

impl FileRef {
    pub fn path(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn checksum(&self) -> Option<&str> {
        self.1.as_deref()
    }

    /// Role declared not applicable for this track.
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

/// Per-track mapping from role name to file reference. Role names are
/// dataset-specific and fixed by convention in each dataset module. Sorted
/// keys keep validation reports and path iteration deterministic.
pub type TrackManifest = BTreeMap<String, FileRef>;

/// Opaque manifest revision: legacy indexes carry a number, newer ones a
/// string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexVersion {
    Text(String),
    Number(f64),
}

impl fmt::Display for IndexVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexVersion::Text(v) => write!(f, "{v}"),
            IndexVersion::Number(v) => write!(f, "{v}"),
        }
    }
}

/// Immutable manifest for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<IndexVersion>,
    pub tracks: BTreeMap<String, TrackManifest>,
    /// Files that describe the whole dataset rather than one track, e.g. a
    /// global CSV of titles and artists. Serialized under the `metadata` key.
    #[serde(
        default,
        rename = "metadata",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub metadata_files: BTreeMap<String, FileRef>,
}

impl DatasetIndex {
    /// Parse and structurally validate a serialized index.
    pub fn from_str(raw: &str) -> Result<DatasetIndex, DataError> {
        let index: DatasetIndex =
            serde_json::from_str(raw).map_err(|err| DataError::InvalidIndex {
                message: err.to_string(),
            })?;
        index.check()?;
        Ok(index)
    }

    pub fn from_file(path: &Path) -> Result<DatasetIndex, DataError> {
        let raw = fs::read_to_string(path).map_err(|err| DataError::from_read(path, err))?;
        DatasetIndex::from_str(&raw)
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.contains_key(track_id)
    }

    pub fn track_ids(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Structural invariants: every track has a non-empty manifest, and a
    /// checksum never appears without a path to hang it on.
    fn check(&self) -> Result<(), DataError> {
        for (track_id, manifest) in &self.tracks {
            if manifest.is_empty() {
                return Err(DataError::InvalidIndex {
                    message: format!("track '{track_id}' has an empty manifest"),
                });
            }
            for (role, file_ref) in manifest {
                if file_ref.path().is_none() && file_ref.checksum().is_some() {
                    return Err(DataError::InvalidIndex {
                        message: format!(
                            "track '{track_id}' role '{role}' has a checksum but no path"
                        ),
                    });
                }
            }
        }
        for (role, file_ref) in &self.metadata_files {
            if file_ref.path().is_none() {
                return Err(DataError::InvalidIndex {
                    message: format!("metadata role '{role}' has no path"),
                });
            }
        }
        Ok(())
    }
}
