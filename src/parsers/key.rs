//! Key annotations, in two shapes: `.lab`-style `start end key` segments for
//! corpora that annotate modulations, and single-line global key files
//! (`D minor`) for corpora that label one key per excerpt.

use std::path::Path;

use crate::annotations::{Annotation, KeyData};
use crate::corpus::error::DataError;
use crate::parsers::{content_lines, parse_number, read_annotation_file};

pub fn load_key_segments(path: &Path) -> Result<KeyData, DataError> {
    let raw = read_annotation_file(path)?;
    let mut intervals = Vec::new();
    let mut keys = Vec::new();
    for (line_no, line) in content_lines(&raw) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(DataError::parse(
                path,
                format!("line {line_no}: expected 'start end key', got '{line}'"),
            ));
        }
        let start = parse_number(path, line_no, fields[0])?;
        let end = parse_number(path, line_no, fields[1])?;
        intervals.push((start, end));
        keys.push(fields[2..].join(" "));
    }
    Ok(KeyData { intervals, keys })
}

/// One key for the whole excerpt. The interval is `(0, 0)`: the excerpt's
/// extent is unknown without decoding the audio, and key lookup never needs
/// it.
pub fn load_global_key(path: &Path) -> Result<KeyData, DataError> {
    let raw = read_annotation_file(path)?;
    let key = raw.trim();
    if key.is_empty() {
        return Err(DataError::parse(path, "empty key file"));
    }
    Ok(KeyData {
        intervals: vec![(0.0, 0.0)],
        keys: vec![key.to_string()],
    })
}

pub fn parse_segments(path: Option<&Path>) -> Result<Option<Annotation>, DataError> {
    match path {
        None => Ok(None),
        Some(path) => load_key_segments(path).map(|data| Some(Annotation::Key(data))),
    }
}

pub fn parse_global(path: Option<&Path>) -> Result<Option<Annotation>, DataError> {
    match path {
        None => Ok(None),
        Some(path) => load_global_key(path).map(|data| Some(Annotation::Key(data))),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn parses_key_segments() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("keys.lab");
        fs::write(&path, "0.0 81.2 E\n81.2 103.7 C# min\n").expect("write");
        let keys = load_key_segments(&path).expect("parse");
        assert_eq!(keys.keys, vec!["E", "C# min"]);
        assert_eq!(keys.intervals[1], (81.2, 103.7));
    }

    #[test]
    fn parses_global_key_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("track.key");
        fs::write(&path, "D minor\n").expect("write");
        let keys = load_global_key(&path).expect("parse");
        assert_eq!(keys.keys, vec!["D minor"]);
        assert_eq!(keys.intervals, vec![(0.0, 0.0)]);
    }

    #[test]
    fn empty_global_key_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("track.key");
        fs::write(&path, "  \n").expect("write");
        assert!(matches!(load_global_key(&path), Err(DataError::Parse { .. })));
    }
}
