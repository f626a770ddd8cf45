//! Concrete dataset loaders.
//!
//! Each module binds the generic engine to one corpus: an embedded index, a
//! parser registry for its annotation roles, optional remotes and a metadata
//! loader. Everything else (validation, lazy loading, caching) is shared.

pub mod beatles;
pub mod giantsteps_key;
pub mod ikala;
pub mod orchset;

use std::path::Path;

use crate::corpus::{DataError, Dataset};

/// Registered dataset names, sorted.
pub const NAMES: &[&str] = &[
    beatles::NAME,
    giantsteps_key::NAME,
    ikala::NAME,
    orchset::NAME,
];

/// Open a dataset by name.
pub fn open(name: &str, data_home: Option<&Path>) -> Result<Dataset, DataError> {
    match name {
        beatles::NAME => beatles::dataset(data_home),
        giantsteps_key::NAME => giantsteps_key::dataset(data_home),
        ikala::NAME => ikala::dataset(data_home),
        orchset::NAME => orchset::dataset(data_home),
        _ => Err(DataError::UnknownDataset {
            name: name.to_string(),
        }),
    }
}
