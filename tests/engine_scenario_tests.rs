//! End-to-end scenarios over a small dataset built in a tempdir: a manifest
//! with one real file and one declared-absent role, exercised through the
//! public Dataset/Track surface.

use std::fs;
use std::path::Path;

use mirkit::corpus::{
    file_checksum, DataError, Dataset, DatasetIndex, ParserRegistry, ROLE_BEATS,
};
use mirkit::parsers;

fn write_wav(path: &Path, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for &sample in samples {
        writer.write_sample(sample).expect("write sample");
    }
    writer.finalize().expect("finalize");
}

fn index_with_checksum(checksum: &str) -> DatasetIndex {
    let raw = format!(
        r#"{{"tracks": {{"t1": {{
            "audio": ["a.wav", "{checksum}"],
            "beats": ["t1.beats", null],
            "label": [null, null]
        }}}}}}"#
    );
    DatasetIndex::from_str(&raw).expect("index")
}

fn registry() -> ParserRegistry {
    ParserRegistry::new().register(ROLE_BEATS, parsers::beats::parse)
}

#[test]
fn intact_copy_validates_clean_and_loads() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_wav(&dir.path().join("a.wav"), &[0, 1000, -1000, 500]);
    fs::write(dir.path().join("t1.beats"), "0.25 1\n0.75 2\n").expect("write beats");
    let checksum = file_checksum(&dir.path().join("a.wav")).expect("checksum");

    let dataset = Dataset::new(
        "demo",
        index_with_checksum(&checksum),
        Some(dir.path()),
        registry(),
    );

    let report = dataset.validate(None).expect("validate");
    assert!(report.is_clean(), "expected clean report, got: {report}");

    let track = dataset.track("t1").expect("track");
    assert_eq!(track.path("audio"), Some(dir.path().join("a.wav")).as_deref());
    assert_eq!(track.path("label"), None);

    let beats = track.beats().expect("parse").expect("beats");
    assert_eq!(beats.times, vec![0.25, 0.75]);

    let audio = track.audio().expect("decode").expect("audio");
    assert_eq!(audio.sample_rate, 8000);
    assert_eq!(audio.samples.len(), 4);
}

#[test]
fn corrupted_audio_reports_mismatched_not_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_wav(&dir.path().join("a.wav"), &[1, 2, 3]);
    fs::write(dir.path().join("t1.beats"), "0.5\n").expect("write beats");

    // Index expects different content than what is on disk.
    let dataset = Dataset::new(
        "demo",
        index_with_checksum("ffffffffffffffffffffffffffffffff"),
        Some(dir.path()),
        registry(),
    );

    let report = dataset.validate(None).expect("validate");
    assert!(report.missing.is_empty());
    assert_eq!(report.mismatched["t1"], vec![dir.path().join("a.wav")]);

    // Validation is reporting, not gating: the track still loads.
    let track = dataset.track("t1").expect("track");
    assert!(track.audio().expect("decode").is_some());
}

#[test]
fn missing_audio_reports_missing_and_fails_lazily() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("t1.beats"), "0.5\n").expect("write beats");

    let dataset = Dataset::new(
        "demo",
        index_with_checksum("00000000000000000000000000000000"),
        Some(dir.path()),
        registry(),
    );

    let report = dataset.validate(None).expect("validate");
    assert_eq!(report.missing["t1"], vec![dir.path().join("a.wav")]);
    assert!(report.mismatched.is_empty());

    // Construction never touches the filesystem; only access does.
    let track = dataset.track("t1").expect("track");
    match track.audio() {
        Err(DataError::NotFound { path }) => assert_eq!(path, dir.path().join("a.wav")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn unknown_id_gives_the_same_error_regardless_of_disk_state() {
    let dataset = Dataset::new(
        "demo",
        index_with_checksum("00000000000000000000000000000000"),
        Some(Path::new("/definitely/not/a/real/root")),
        registry(),
    );
    match dataset.track("does-not-exist-id") {
        Err(DataError::InvalidTrackId { dataset, track_id }) => {
            assert_eq!(dataset, "demo");
            assert_eq!(track_id, "does-not-exist-id");
        }
        other => panic!("expected InvalidTrackId, got {other:?}"),
    }
}

#[test]
fn separate_track_instances_own_separate_caches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let beats_path = dir.path().join("t1.beats");
    fs::write(&beats_path, "1.0\n").expect("write beats");

    let dataset = Dataset::new(
        "demo",
        index_with_checksum("00000000000000000000000000000000"),
        Some(dir.path()),
        registry(),
    );

    let first = dataset.track("t1").expect("track");
    assert_eq!(first.beats().expect("parse").expect("beats").times, vec![1.0]);

    // A second instance for the same id re-reads the (changed) file; only
    // the first instance keeps its memoized value.
    fs::write(&beats_path, "2.0\n").expect("rewrite");
    let second = dataset.track("t1").expect("track");
    assert_eq!(second.beats().expect("parse").expect("beats").times, vec![2.0]);
    assert_eq!(first.beats().expect("cached").expect("beats").times, vec![1.0]);
}

#[test]
fn load_tracks_matches_the_index_and_resolves_paths() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset = Dataset::new(
        "demo",
        index_with_checksum("00000000000000000000000000000000"),
        Some(dir.path()),
        registry(),
    );
    let tracks = dataset.load_tracks().expect("load");
    assert_eq!(tracks.len(), dataset.index().len());
    assert_eq!(
        tracks["t1"].path("beats"),
        Some(dir.path().join("t1.beats")).as_deref()
    );
}
