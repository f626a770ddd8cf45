//! Shared CSV plumbing for dataset-level metadata tables. Each dataset module
//! maps the raw rows onto the fully-enumerated TrackMetadata record; the
//! column layout is dataset-specific, so only the reading and header lookup
//! live here.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::corpus::error::DataError;

/// Header row plus data rows. Field access goes through [column_index] so a
/// reordered column in a future metadata revision keeps working.
pub struct CsvTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

pub fn read_csv(path: &Path) -> Result<CsvTable, DataError> {
    let file = File::open(path).map_err(|err| DataError::from_read(path, err))?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|err| DataError::parse(path, err.to_string()))?
        .clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.map_err(|err| DataError::parse(path, err.to_string()))?);
    }
    Ok(CsvTable { headers, rows })
}

impl CsvTable {
    pub fn column_index(&self, path: &Path, name: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| DataError::parse(path, format!("missing column '{name}'")))
    }
}

/// Empty CSV cells become `None` rather than empty strings.
pub fn cell(row: &StringRecord, index: usize) -> Option<String> {
    row.get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_headers_and_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("meta.csv");
        fs::write(&path, "track_id,composer,work\nBeethoven-S3,Beethoven,Symphony 3\n")
            .expect("write");
        let table = read_csv(&path).expect("read");
        let composer = table.column_index(&path, "composer").expect("column");
        assert_eq!(cell(&table.rows[0], composer), Some("Beethoven".to_string()));
    }

    #[test]
    fn empty_cell_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("meta.csv");
        fs::write(&path, "track_id,work\nX, \n").expect("write");
        let table = read_csv(&path).expect("read");
        assert_eq!(cell(&table.rows[0], 1), None);
    }

    #[test]
    fn unknown_column_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("meta.csv");
        fs::write(&path, "track_id\nX\n").expect("write");
        let table = read_csv(&path).expect("read");
        assert!(matches!(
            table.column_index(&path, "tempo"),
            Err(DataError::Parse { .. })
        ));
    }
}
