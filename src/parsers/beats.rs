//! Beat list files: one beat per line, `time [position]`, whitespace
//! separated. Position is the beat's index inside its bar (1 = downbeat) and
//! is optional per line; files with times only are common.

use std::path::Path;

use crate::annotations::{Annotation, BeatData};
use crate::corpus::error::DataError;
use crate::parsers::{content_lines, parse_number, read_annotation_file};

pub fn load_beats(path: &Path) -> Result<BeatData, DataError> {
    let raw = read_annotation_file(path)?;
    let mut times = Vec::new();
    let mut positions = Vec::new();
    for (line_no, line) in content_lines(&raw) {
        let mut fields = line.split_whitespace();
        let time = fields
            .next()
            .ok_or_else(|| DataError::parse(path, format!("line {line_no}: empty beat row")))?;
        times.push(parse_number(path, line_no, time)?);
        positions.push(match fields.next() {
            Some(pos) => Some(pos.parse::<u32>().map_err(|_| {
                DataError::parse(path, format!("line {line_no}: invalid beat position '{pos}'"))
            })?),
            None => None,
        });
    }
    Ok(BeatData { times, positions })
}

/// Registry adapter: absent role propagates as `None`.
pub fn parse(path: Option<&Path>) -> Result<Option<Annotation>, DataError> {
    match path {
        None => Ok(None),
        Some(path) => load_beats(path).map(|data| Some(Annotation::Beats(data))),
    }
}
