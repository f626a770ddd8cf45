//! Validate a local dataset copy against its index.
//!
//! Missing and corrupted files are findings, not errors: a caller can always
//! run validation on a hopelessly broken copy and get a full report. Only
//! genuine environment failures (a file that exists but cannot be read)
//! propagate. Roles are visited in sorted order so two runs over the same
//! tree produce identical reports.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::corpus::checksum::file_checksum;
use crate::corpus::error::DataError;
use crate::corpus::index::{DatasetIndex, FileRef};
use crate::corpus::paths::resolve_file;

/// Per-track findings plus dataset-level metadata findings. Metadata files
/// get their own fields rather than a reserved pseudo track id, so no real
/// track id can ever collide with them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Track id -> resolved paths that do not exist on disk.
    pub missing: BTreeMap<String, Vec<PathBuf>>,
    /// Track id -> resolved paths whose content digest disagrees with the
    /// index. Never overlaps with `missing` for the same path.
    pub mismatched: BTreeMap<String, Vec<PathBuf>>,
    pub metadata_missing: Vec<PathBuf>,
    pub metadata_mismatched: Vec<PathBuf>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
            && self.mismatched.is_empty()
            && self.metadata_missing.is_empty()
            && self.metadata_mismatched.is_empty()
    }

    fn count(map: &BTreeMap<String, Vec<PathBuf>>) -> usize {
        map.values().map(Vec::len).sum()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} missing, {} mismatched, {} metadata missing, {} metadata mismatched",
            Self::count(&self.missing),
            Self::count(&self.mismatched),
            self.metadata_missing.len(),
            self.metadata_mismatched.len()
        )
    }
}

enum Finding {
    Ok,
    Missing(PathBuf),
    Mismatched(PathBuf),
}

/// Check one manifest entry against disk. `(null, null)` entries are skipped
/// by the callers; a null checksum downgrades to an existence-only check.
fn check_file(data_home: &Path, file_ref: &FileRef) -> Result<Finding, DataError> {
    let Some(path) = resolve_file(data_home, file_ref.path()) else {
        return Ok(Finding::Ok);
    };
    if !path.is_file() {
        return Ok(Finding::Missing(path));
    }
    if let Some(expected) = file_ref.checksum() {
        let actual = file_checksum(&path)?;
        if actual != expected {
            return Ok(Finding::Mismatched(path));
        }
    }
    Ok(Finding::Ok)
}

/// Walk every track and metadata entry of `index` under `data_home`.
/// Pure with respect to the index and the filesystem: no writes, no caching.
pub fn validate_index(
    index: &DatasetIndex,
    data_home: &Path,
) -> Result<ValidationReport, DataError> {
    let mut report = ValidationReport::default();

    for (track_id, manifest) in &index.tracks {
        for file_ref in manifest.values() {
            if file_ref.is_absent() {
                continue;
            }
            match check_file(data_home, file_ref)? {
                Finding::Ok => {}
                Finding::Missing(path) => {
                    report.missing.entry(track_id.clone()).or_default().push(path);
                }
                Finding::Mismatched(path) => {
                    report
                        .mismatched
                        .entry(track_id.clone())
                        .or_default()
                        .push(path);
                }
            }
        }
    }

    for file_ref in index.metadata_files.values() {
        match check_file(data_home, file_ref)? {
            Finding::Ok => {}
            Finding::Missing(path) => report.metadata_missing.push(path),
            Finding::Mismatched(path) => report.metadata_mismatched.push(path),
        }
    }

    Ok(report)
}
