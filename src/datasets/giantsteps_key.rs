//! GiantSteps Key: electronic music excerpts with one global key label per
//! track, stored as single-line `.key` files.

use std::path::Path;

use crate::corpus::{
    DataError, Dataset, DatasetIndex, ParserRegistry, RemoteResource, Unpack, ROLE_KEY,
};
use crate::parsers;

pub const NAME: &str = "giantsteps_key";

const INDEX_JSON: &str = include_str!("../../data/indexes/giantsteps_key_index.json");

const KEYS_URL: &str =
    "https://codeload.github.com/GiantSteps/giantsteps-key-dataset/tar.gz/refs/heads/master";
const KEYS_CHECKSUM: &str = "8114cfafa7fd86d8da07365ff70bff52";

pub fn dataset(data_home: Option<&Path>) -> Result<Dataset, DataError> {
    let index = DatasetIndex::from_str(INDEX_JSON)?;
    let parsers = ParserRegistry::new().register(ROLE_KEY, parsers::key::parse_global);
    Ok(Dataset::new(NAME, index, data_home, parsers).with_remotes(vec![
        RemoteResource::new("keys", KEYS_URL, "giantsteps-key.tar.gz")
            .with_checksum(KEYS_CHECKSUM)
            .with_unpack(Unpack::TarGz),
    ]))
}
