//! Dataset aggregate: one index, one data home, one parser registry.
//!
//! Every concrete dataset module instantiates this same engine with its own
//! index and parsers instead of re-implementing the index/validate/lazy-load
//! pattern. Load once, then hand out Track views by id.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::annotations::Annotation;
use crate::corpus::download::{fetch_remotes, DownloadReport, RemoteResource};
use crate::corpus::error::DataError;
use crate::corpus::index::{DatasetIndex, IndexVersion};
use crate::corpus::metadata::{MetadataCache, MetadataLoaderFn, MetadataTable, TrackMetadata};
use crate::corpus::paths::{ensure_data_home, resolve_data_home, resolve_file};
use crate::corpus::track::Track;
use crate::corpus::validate::{validate_index, ValidationReport};

/// A per-role annotation parser. Pure: `None` in, `None` out; missing file
/// surfaces as `NotFound` naming the path.
pub type ParserFn = fn(Option<&Path>) -> Result<Option<Annotation>, DataError>;

/// Role name -> parser. Built once per dataset module and shared across all
/// of its Track instances.
#[derive(Debug, Clone, Default)]
pub struct ParserRegistry {
    entries: BTreeMap<String, ParserFn>,
}

impl ParserRegistry {
    pub fn new() -> ParserRegistry {
        ParserRegistry::default()
    }

    pub fn register(mut self, role: &str, parser: ParserFn) -> ParserRegistry {
        self.entries.insert(role.to_string(), parser);
        self
    }

    pub fn get(&self, role: &str) -> Option<ParserFn> {
        self.entries.get(role).copied()
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug)]
pub struct Dataset {
    name: String,
    index: Arc<DatasetIndex>,
    data_home: PathBuf,
    parsers: Arc<ParserRegistry>,
    remotes: Vec<RemoteResource>,
    metadata_loader: Option<MetadataLoaderFn>,
    metadata_cache: MetadataCache,
}

impl Dataset {
    /// An explicit `data_home` is the dataset's root, used as given. With
    /// `None`, the dataset gets its own named subdirectory of the configured
    /// default root, so datasets sharing the default never collide. Nothing
    /// is created or checked on disk here.
    pub fn new(
        name: &str,
        index: DatasetIndex,
        data_home: Option<&Path>,
        parsers: ParserRegistry,
    ) -> Dataset {
        let data_home = match data_home {
            Some(root) => root.to_path_buf(),
            None => resolve_data_home(None).join(name),
        };
        Dataset {
            name: name.to_string(),
            index: Arc::new(index),
            data_home,
            parsers: Arc::new(parsers),
            remotes: Vec::new(),
            metadata_loader: None,
            metadata_cache: MetadataCache::new(),
        }
    }

    pub fn with_metadata_loader(mut self, loader: MetadataLoaderFn) -> Dataset {
        self.metadata_loader = Some(loader);
        self
    }

    pub fn with_remotes(mut self, remotes: Vec<RemoteResource>) -> Dataset {
        self.remotes = remotes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&IndexVersion> {
        self.index.version.as_ref()
    }

    pub fn data_home(&self) -> &Path {
        &self.data_home
    }

    pub fn index(&self) -> &DatasetIndex {
        &self.index
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    pub fn remotes(&self) -> &[RemoteResource] {
        &self.remotes
    }

    pub fn track_ids(&self) -> Vec<&str> {
        self.index.track_ids().collect()
    }

    /// Construct a Track view. Same fail-fast contract as `Track::new`:
    /// unknown ids are rejected before any file I/O.
    pub fn track(&self, track_id: &str) -> Result<Track, DataError> {
        Track::new(
            &self.name,
            track_id,
            &self.index,
            &self.data_home,
            Arc::clone(&self.parsers),
        )
    }

    /// One Track per index entry. The track count is bounded and modest, so
    /// the mapping is materialized eagerly.
    pub fn load_tracks(&self) -> Result<BTreeMap<String, Track>, DataError> {
        let mut tracks = BTreeMap::new();
        for track_id in self.index.tracks.keys() {
            tracks.insert(track_id.clone(), self.track(track_id)?);
        }
        Ok(tracks)
    }

    /// Compare the local copy against the index. Explicit and non-blocking:
    /// never gates track construction or annotation access.
    pub fn validate(&self, data_home: Option<&Path>) -> Result<ValidationReport, DataError> {
        let home = match data_home {
            Some(root) => root.to_path_buf(),
            None => self.data_home.clone(),
        };
        validate_index(&self.index, &home)
    }

    /// The dataset's metadata table, parsed at most once per data home.
    /// Declared-but-absent and unparseable metadata both degrade to `None`
    /// with a warning; per-track attributes must keep working without it.
    pub fn metadata(&self) -> Option<Arc<MetadataTable>> {
        let loader = self.metadata_loader?;
        self.metadata_cache.get_or_load(&self.data_home, || {
            let file_ref = self
                .index
                .metadata_files
                .get("metadata")
                .or_else(|| self.index.metadata_files.values().next())?;
            let path = resolve_file(&self.data_home, file_ref.path())?;
            if !path.is_file() {
                warn!(
                    dataset = %self.name,
                    path = %path.display(),
                    "metadata file declared in the index but absent on disk"
                );
                return None;
            }
            match loader(&path) {
                Ok(table) => Some(table),
                Err(err) => {
                    warn!(dataset = %self.name, error = %err, "failed to parse metadata");
                    None
                }
            }
        })
    }

    pub fn track_metadata(&self, track_id: &str) -> Option<TrackMetadata> {
        self.metadata()
            .and_then(|table| table.get(track_id).cloned())
    }

    /// Fetch declared remote resources into the data home. Idempotent:
    /// resources already present with matching checksums are skipped unless
    /// `force`. `resources = None` fetches everything.
    pub fn download(
        &self,
        resources: Option<&[&str]>,
        force: bool,
    ) -> Result<DownloadReport, DataError> {
        if self.remotes.is_empty() {
            warn!(
                dataset = %self.name,
                "no remote resources declared; obtain this dataset manually"
            );
            return Ok(DownloadReport::default());
        }
        let home = ensure_data_home(Some(&self.data_home))?;
        fetch_remotes(&self.remotes, &home, resources, force)
    }
}
