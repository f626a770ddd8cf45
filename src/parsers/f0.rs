//! Fundamental-frequency contours. Two source shapes: `time frequency
//! [confidence]` columns, and one-frequency-per-line files sampled on a fixed
//! hop (the time axis is synthesized). Frequency 0.0 marks unvoiced frames in
//! both shapes.

use std::path::Path;

use crate::annotations::{Annotation, F0Data};
use crate::corpus::error::DataError;
use crate::parsers::{content_lines, parse_number, read_annotation_file};

pub fn load_contour(path: &Path) -> Result<F0Data, DataError> {
    let raw = read_annotation_file(path)?;
    let mut times = Vec::new();
    let mut frequencies = Vec::new();
    let mut confidence = Vec::new();
    let mut any_confidence = false;
    for (line_no, line) in content_lines(&raw) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(DataError::parse(
                path,
                format!("line {line_no}: expected 'time frequency', got '{line}'"),
            ));
        }
        times.push(parse_number(path, line_no, fields[0])?);
        frequencies.push(parse_number(path, line_no, fields[1])?);
        match fields.get(2) {
            Some(field) => {
                confidence.push(parse_number(path, line_no, field)?);
                any_confidence = true;
            }
            None => confidence.push(0.0),
        }
    }
    Ok(F0Data {
        times,
        frequencies,
        confidence: if any_confidence { Some(confidence) } else { None },
    })
}

/// One frequency per line, sampled every `hop_seconds`.
pub fn load_fixed_hop(path: &Path, hop_seconds: f64) -> Result<F0Data, DataError> {
    let raw = read_annotation_file(path)?;
    let mut frequencies = Vec::new();
    for (line_no, line) in content_lines(&raw) {
        frequencies.push(parse_number(path, line_no, line)?);
    }
    Ok(F0Data::from_fixed_hop(frequencies, hop_seconds))
}

pub fn parse_contour(path: Option<&Path>) -> Result<Option<Annotation>, DataError> {
    match path {
        None => Ok(None),
        Some(path) => load_contour(path).map(|data| Some(Annotation::F0(data))),
    }
}
