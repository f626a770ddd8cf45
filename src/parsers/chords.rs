//! Chord label files in `.lab` form: `start end label` per line. Labels use
//! the Harte syntax (`C:maj`, `A:min7`, `N` for no-chord) but are carried
//! through verbatim; label grammar is not interpreted here.

use std::path::Path;

use crate::annotations::{Annotation, ChordData};
use crate::corpus::error::DataError;
use crate::parsers::{content_lines, parse_number, read_annotation_file};

pub fn load_chords(path: &Path) -> Result<ChordData, DataError> {
    let raw = read_annotation_file(path)?;
    let mut intervals = Vec::new();
    let mut labels = Vec::new();
    for (line_no, line) in content_lines(&raw) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(DataError::parse(
                path,
                format!("line {line_no}: expected 'start end label', got '{line}'"),
            ));
        }
        let start = parse_number(path, line_no, fields[0])?;
        let end = parse_number(path, line_no, fields[1])?;
        intervals.push((start, end));
        labels.push(fields[2..].join(" "));
    }
    Ok(ChordData { intervals, labels })
}

pub fn parse(path: Option<&Path>) -> Result<Option<Annotation>, DataError> {
    match path {
        None => Ok(None),
        Some(path) => load_chords(path).map(|data| Some(Annotation::Chords(data))),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn parses_lab_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chords.lab");
        fs::write(&path, "0.000 2.612 N\n2.612 11.459 E\n11.459 12.921 A:min7\n")
            .expect("write");
        let chords = load_chords(&path).expect("parse");
        assert_eq!(chords.intervals.len(), 3);
        assert_eq!(chords.intervals[1], (2.612, 11.459));
        assert_eq!(chords.labels, vec!["N", "E", "A:min7"]);
    }

    #[test]
    fn short_row_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chords.lab");
        fs::write(&path, "0.0 1.0\n").expect("write");
        assert!(matches!(load_chords(&path), Err(DataError::Parse { .. })));
    }
}
