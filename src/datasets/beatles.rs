//! The Beatles reference annotations (Isophonics): beats, chords, keys, and
//! structural sections for the studio albums. Audio is not distributed with
//! the annotations; every track declares its audio role absent, and paths
//! resolve only for the annotation files.

use std::path::Path;

use crate::corpus::{
    DataError, Dataset, DatasetIndex, ParserRegistry, RemoteResource, Unpack, ROLE_BEATS,
    ROLE_CHORDS, ROLE_KEY, ROLE_SECTIONS,
};
use crate::parsers;

pub const NAME: &str = "beatles";

const INDEX_JSON: &str = include_str!("../../data/indexes/beatles_index.json");

const ANNOTATIONS_URL: &str =
    "http://isophonics.net/files/annotations/The%20Beatles%20Annotations.tar.gz";
const ANNOTATIONS_CHECKSUM: &str = "62425c552d37c6bb655a78e4603828cc";

pub fn dataset(data_home: Option<&Path>) -> Result<Dataset, DataError> {
    let index = DatasetIndex::from_str(INDEX_JSON)?;
    let parsers = ParserRegistry::new()
        .register(ROLE_BEATS, parsers::beats::parse)
        .register(ROLE_CHORDS, parsers::chords::parse)
        .register(ROLE_KEY, parsers::key::parse_segments)
        .register(ROLE_SECTIONS, parsers::sections::parse);
    Ok(Dataset::new(NAME, index, data_home, parsers).with_remotes(vec![
        RemoteResource::new("annotations", ANNOTATIONS_URL, "beatles_annotations.tar.gz")
            .with_checksum(ANNOTATIONS_CHECKSUM)
            .with_unpack(Unpack::TarGz),
    ]))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn audio_is_declared_absent_for_every_track() {
        let dataset = dataset(Some(Path::new("/data/beatles"))).expect("open");
        for track_id in dataset.track_ids() {
            let track = dataset.track(track_id).expect("track");
            assert_eq!(track.path("audio"), None, "{track_id} should have no audio");
            assert!(track.path(ROLE_CHORDS).is_some());
        }
    }

    #[test]
    fn annotation_paths_resolve_under_the_data_home() {
        let dataset = dataset(Some(Path::new("/data/beatles"))).expect("open");
        let track = dataset.track("0101").expect("track");
        let beats = track.path(ROLE_BEATS).expect("beats path");
        assert!(beats.starts_with("/data/beatles/annotations/beat"));
    }
}
