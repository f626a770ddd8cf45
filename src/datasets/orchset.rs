//! Orchset: symphonic excerpts with predominant-melody f0 ground truth and a
//! global CSV describing each excerpt's source work and melodic instruments.

use std::path::Path;

use crate::corpus::{
    DataError, Dataset, DatasetIndex, MetadataTable, ParserRegistry, RemoteResource,
    TrackMetadata, Unpack, ROLE_F0,
};
use crate::parsers;
use crate::parsers::metadata_csv::{cell, read_csv};

pub const NAME: &str = "orchset";

const INDEX_JSON: &str = include_str!("../../data/indexes/orchset_index.json");

const DATASET_URL: &str = "https://zenodo.org/record/1289786/files/Orchset_dataset_0.tar.gz";
const DATASET_CHECKSUM: &str = "cf6fe52d64624f1ddb01b44ea87b81ab";

pub fn dataset(data_home: Option<&Path>) -> Result<Dataset, DataError> {
    let index = DatasetIndex::from_str(INDEX_JSON)?;
    let parsers = ParserRegistry::new().register(ROLE_F0, parsers::f0::parse_contour);
    Ok(Dataset::new(NAME, index, data_home, parsers)
        .with_metadata_loader(load_metadata)
        .with_remotes(vec![RemoteResource::new(
            "dataset",
            DATASET_URL,
            "Orchset_dataset.tar.gz",
        )
        .with_checksum(DATASET_CHECKSUM)
        .with_unpack(Unpack::TarGz)]))
}

/// Columns: track_id, composer, work, excerpt. Empty cells degrade to `None`.
fn load_metadata(path: &Path) -> Result<MetadataTable, DataError> {
    let table = read_csv(path)?;
    let id = table.column_index(path, "track_id")?;
    let composer = table.column_index(path, "composer")?;
    let work = table.column_index(path, "work")?;
    let excerpt = table.column_index(path, "excerpt")?;

    let mut out = MetadataTable::new();
    for row in &table.rows {
        let Some(track_id) = cell(row, id) else {
            continue;
        };
        out.insert(
            track_id,
            TrackMetadata {
                composer: cell(row, composer),
                work: cell(row, work),
                excerpt: cell(row, excerpt),
                genre: Some("classical".to_string()),
                ..TrackMetadata::default()
            },
        );
    }
    Ok(out)
}
