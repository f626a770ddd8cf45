//! The index-driven validation and lazy-loading engine.
//!
//! One generic pipeline shared by every dataset module: a checked-in
//! [DatasetIndex] names each track's files and checksums, [validate_index]
//! compares a local copy against it, and [Dataset] hands out [Track] views
//! that parse annotations lazily through a per-dataset [ParserRegistry].

pub mod checksum;
pub mod dataset;
pub mod download;
pub mod error;
pub mod index;
pub mod metadata;
pub mod paths;
pub mod track;
pub mod validate;

pub use checksum::file_checksum;
pub use dataset::{Dataset, ParserFn, ParserRegistry};
pub use download::{fetch_remotes, DownloadReport, RemoteResource, Unpack};
pub use error::DataError;
pub use index::{DatasetIndex, FileRef, IndexVersion, TrackManifest};
pub use metadata::{MetadataCache, MetadataLoaderFn, MetadataTable, TrackMetadata};
pub use paths::{ensure_data_home, resolve_data_home, resolve_file, DATA_HOME_ENV};
pub use track::{
    Track, ROLE_AUDIO, ROLE_BEATS, ROLE_CHORDS, ROLE_F0, ROLE_KEY, ROLE_LYRICS, ROLE_SECTIONS,
};
pub use validate::{validate_index, ValidationReport};
