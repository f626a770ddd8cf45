//! Per-format annotation parsers.
//!
//! Each submodule is a pure function from file bytes to one normalized record
//! type. All parsers share the same outer contract: a `None` path (role
//! absent for the track) yields `Ok(None)` without touching the filesystem,
//! and a non-`None` path that does not exist fails with `NotFound` naming the
//! exact path. Read errors are mapped here, at the parser boundary, so
//! callers never see a bare I/O trace from inside a format reader.

pub mod audio;
pub mod beats;
pub mod chords;
pub mod f0;
pub mod key;
pub mod lyrics;
pub mod metadata_csv;
pub mod sections;

use std::fs;
use std::path::Path;

use crate::corpus::error::DataError;

/// Read a whole annotation file, mapping a missing file to `NotFound`.
/// Annotation files are small text; streaming is only needed for audio.
pub(crate) fn read_annotation_file(path: &Path) -> Result<String, DataError> {
    fs::read_to_string(path).map_err(|err| DataError::from_read(path, err))
}

/// Parse one numeric field with line context for the error message.
pub(crate) fn parse_number(path: &Path, line_no: usize, field: &str) -> Result<f64, DataError> {
    field.parse::<f64>().map_err(|_| {
        DataError::parse(path, format!("line {line_no}: invalid number '{field}'"))
    })
}

/// Non-blank lines with 1-based line numbers.
pub(crate) fn content_lines(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    raw.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}
