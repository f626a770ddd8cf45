//! Structural segmentation files: `start end label` per line. Some corpora
//! ship empty section files for tracks that were never segmented; those parse
//! to "no annotation" rather than an error.

use std::path::Path;

use crate::annotations::{Annotation, SectionData};
use crate::corpus::error::DataError;
use crate::parsers::{content_lines, parse_number, read_annotation_file};

/// Returns `None` for an empty file (annotation declared but never written).
pub fn load_sections(path: &Path) -> Result<Option<SectionData>, DataError> {
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
    if intervals.is_empty() {
        return Ok(None);
    }
    Ok(Some(SectionData { intervals, labels }))
}

pub fn parse(path: Option<&Path>) -> Result<Option<Annotation>, DataError> {
    match path {
        None => Ok(None),
        Some(path) => Ok(load_sections(path)?.map(Annotation::Sections)),
    }
}
