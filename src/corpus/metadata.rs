//! Dataset-level metadata: the per-track record type and the keyed cache.
//!
//! Metadata tables are parsed from a single dataset-global file (usually
//! CSV), so the parse is cached per data home rather than per track. The
//! cache is owned by its Dataset instance; two Datasets pointed at different
//! roots each keep their own parsed tables and cannot stomp on each other.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::corpus::error::DataError;

/// One track's metadata with every field enumerated up front. Loaders fill
/// what their source table carries; everything else stays `None` by default
/// instead of appearing and disappearing with the table's column set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Track id -> metadata record.
pub type MetadataTable = BTreeMap<String, TrackMetadata>;

/// Per-dataset metadata file parser.
pub type MetadataLoaderFn = fn(&Path) -> Result<MetadataTable, DataError>;

/// Keyed cache: data home -> parsed table, or `None` for "metadata absent at
/// this root" (the sentinel is cached too, so repeated access does not
/// re-stat the file). The mutex serializes the read-check-populate sequence;
/// contention is negligible at this data volume.
#[derive(Debug, Default)]
pub struct MetadataCache {
    slots: Mutex<HashMap<PathBuf, Option<Arc<MetadataTable>>>>,
}

impl MetadataCache {
    pub fn new() -> MetadataCache {
        MetadataCache::default()
    }

    /// Return the cached entry for `root`, running `load` only on the first
    /// access for that root.
    pub fn get_or_load(
        &self,
        root: &Path,
        load: impl FnOnce() -> Option<MetadataTable>,
    ) -> Option<Arc<MetadataTable>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = slots.get(root) {
            return entry.clone();
        }
        let loaded = load().map(Arc::new);
        slots.insert(root.to_path_buf(), loaded.clone());
        loaded
    }

    /// Number of roots with a cached entry (including absent sentinels).
    pub fn cached_roots(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
