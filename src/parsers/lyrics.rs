//! Timed lyric transcripts: `start end text...` per line. Instrumental
//! tracks ship empty transcript files; those parse to "no annotation".

use std::path::Path;

use crate::annotations::{Annotation, LyricData};
use crate::corpus::error::DataError;
use crate::parsers::{content_lines, parse_number, read_annotation_file};

pub fn load_lyrics(path: &Path) -> Result<Option<LyricData>, DataError> {
    let raw = read_annotation_file(path)?;
    let mut intervals = Vec::new();
    let mut lines = Vec::new();
    for (line_no, line) in content_lines(&raw) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(DataError::parse(
                path,
                format!("line {line_no}: expected 'start end text', got '{line}'"),
            ));
        }
        let start = parse_number(path, line_no, fields[0])?;
        let end = parse_number(path, line_no, fields[1])?;
        intervals.push((start, end));
        lines.push(fields[2..].join(" "));
    }
    if intervals.is_empty() {
        return Ok(None);
    }
    Ok(Some(LyricData { intervals, lines }))
}

pub fn parse(path: Option<&Path>) -> Result<Option<Annotation>, DataError> {
    match path {
        None => Ok(None),
        Some(path) => Ok(load_lyrics(path)?.map(Annotation::Lyrics)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn parses_timed_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("lyrics.txt");
        fs::write(&path, "21.18 23.90 are you going to scarborough fair\n").expect("write");
        let lyrics = load_lyrics(&path).expect("parse").expect("some");
        assert_eq!(lyrics.intervals, vec![(21.18, 23.90)]);
        assert_eq!(lyrics.lines[0], "are you going to scarborough fair");
    }

    #[test]
    fn empty_transcript_is_no_annotation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("lyrics.txt");
        fs::write(&path, "").expect("write");
        assert!(load_lyrics(&path).expect("parse").is_none());
    }
}
