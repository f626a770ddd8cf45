//! Per-track view: resolved file paths plus lazily parsed, cached
//! annotations.
//!
//! Construction is always cheap: the id is checked against the index, every
//! manifest role is joined onto the data home, and nothing else happens. Disk
//! is touched only when an annotation is first accessed; a missing file
//! surfaces there as `NotFound`, one role at a time, never at construction.
//!
//! Each annotation role gets one explicit `OnceCell` slot. The first access
//! runs the registered parser and memoizes the result; later accesses on the
//! same instance return the cached value without re-reading the file, even if
//! the file has changed on disk since (mutate-after-read is not detected).
//! A failed first access leaves the slot empty, so the next access retries.
//! Instances never share slots, and a Track is meant for single-threaded use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use crate::annotations::{
    Annotation, AudioData, BeatData, ChordData, F0Data, KeyData, LyricData, SectionData,
};
use crate::corpus::dataset::ParserRegistry;
use crate::corpus::error::DataError;
use crate::corpus::index::DatasetIndex;
use crate::corpus::paths::resolve_file;
use crate::parsers::audio::load_wav;

/// Conventional role names shared across dataset modules.
pub const ROLE_AUDIO: &str = "audio";
pub const ROLE_BEATS: &str = "beats";
pub const ROLE_CHORDS: &str = "chords";
pub const ROLE_SECTIONS: &str = "sections";
pub const ROLE_KEY: &str = "key";
pub const ROLE_F0: &str = "f0";
pub const ROLE_LYRICS: &str = "lyrics";

#[derive(Debug)]
pub struct Track {
    track_id: String,
    dataset: String,
    /// Resolved absolute path per manifest role; `None` for roles the
    /// manifest declares absent.
    paths: BTreeMap<String, Option<PathBuf>>,
    parsers: Arc<ParserRegistry>,
    slots: BTreeMap<String, OnceCell<Option<Annotation>>>,
}

impl Track {
    /// Fails fast with `InvalidTrackId` when the id is not in the index; this
    /// runs before any path is touched, so a bad id gives the same error no
    /// matter what is (or is not) on disk.
    pub fn new(
        dataset: &str,
        track_id: &str,
        index: &DatasetIndex,
        data_home: &Path,
        parsers: Arc<ParserRegistry>,
    ) -> Result<Track, DataError> {
        let manifest = index
            .tracks
            .get(track_id)
            .ok_or_else(|| DataError::InvalidTrackId {
                dataset: dataset.to_string(),
                track_id: track_id.to_string(),
            })?;
        let paths = manifest
            .iter()
            .map(|(role, file_ref)| (role.clone(), resolve_file(data_home, file_ref.path())))
            .collect();
        let slots = parsers
            .roles()
            .map(|role| (role.to_string(), OnceCell::new()))
            .collect();
        Ok(Track {
            track_id: track_id.to_string(),
            dataset: dataset.to_string(),
            paths,
            parsers,
            slots,
        })
    }

    pub fn track_id(&self) -> &str {
        &self.track_id
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Manifest roles in sorted order, with their resolved paths.
    pub fn paths(&self) -> impl Iterator<Item = (&str, Option<&Path>)> {
        self.paths
            .iter()
            .map(|(role, path)| (role.as_str(), path.as_deref()))
    }

    /// Resolved path for a role. `None` means the role is absent for this
    /// track (or not in the manifest at all); presence on disk is not checked.
    pub fn path(&self, role: &str) -> Option<&Path> {
        self.paths.get(role).and_then(|path| path.as_deref())
    }

    /// Lazily parse and cache the annotation for `role`. The registered
    /// parser runs at most once per instance; an absent role yields `None`
    /// without invoking it at all.
    pub fn annotation(&self, role: &str) -> Result<Option<&Annotation>, DataError> {
        let (slot, parser) = match (self.slots.get(role), self.parsers.get(role)) {
            (Some(slot), Some(parser)) => (slot, parser),
            _ => {
                return Err(DataError::UnknownRole {
                    dataset: self.dataset.clone(),
                    role: role.to_string(),
                })
            }
        };
        let value = slot.get_or_try_init(|| match self.path(role) {
            None => Ok(None),
            path => parser(path),
        })?;
        Ok(value.as_ref())
    }

    pub fn beats(&self) -> Result<Option<&BeatData>, DataError> {
        Ok(self.annotation(ROLE_BEATS)?.and_then(Annotation::as_beats))
    }

    pub fn chords(&self) -> Result<Option<&ChordData>, DataError> {
        Ok(self.annotation(ROLE_CHORDS)?.and_then(Annotation::as_chords))
    }

    pub fn sections(&self) -> Result<Option<&SectionData>, DataError> {
        Ok(self
            .annotation(ROLE_SECTIONS)?
            .and_then(Annotation::as_sections))
    }

    pub fn key(&self) -> Result<Option<&KeyData>, DataError> {
        Ok(self.annotation(ROLE_KEY)?.and_then(Annotation::as_key))
    }

    pub fn f0(&self) -> Result<Option<&F0Data>, DataError> {
        Ok(self.annotation(ROLE_F0)?.and_then(Annotation::as_f0))
    }

    pub fn lyrics(&self) -> Result<Option<&LyricData>, DataError> {
        Ok(self.annotation(ROLE_LYRICS)?.and_then(Annotation::as_lyrics))
    }

    /// Decode the track's audio. Deliberately uncached: a decoded buffer can
    /// run to hundreds of megabytes, so every call re-reads the file instead
    /// of pinning samples in memory for the life of the Track.
    pub fn audio(&self) -> Result<Option<AudioData>, DataError> {
        match self.path(ROLE_AUDIO) {
            None => Ok(None),
            Some(path) => load_wav(path).map(Some),
        }
    }
}
