//! iKala: Mandarin pop excerpts with frame-level vocal pitch and timed
//! lyrics. The pitch files carry one frequency per line on a fixed 32 ms
//! hop; the time axis is synthesized at parse time. The corpus is distributed
//! by request only, so no remote resources are declared and `download()` is a
//! logged no-op.

use std::path::Path;

use crate::annotations::Annotation;
use crate::corpus::{
    DataError, Dataset, DatasetIndex, ParserRegistry, ROLE_F0, ROLE_LYRICS,
};
use crate::parsers;
use crate::parsers::f0::load_fixed_hop;

pub const NAME: &str = "ikala";

const INDEX_JSON: &str = include_str!("../../data/indexes/ikala_index.json");

/// Pitch label hop: 512 samples at 16 kHz.
const PITCH_HOP_SECONDS: f64 = 0.032;

pub fn dataset(data_home: Option<&Path>) -> Result<Dataset, DataError> {
    let index = DatasetIndex::from_str(INDEX_JSON)?;
    let parsers = ParserRegistry::new()
        .register(ROLE_F0, parse_pitch)
        .register(ROLE_LYRICS, parsers::lyrics::parse);
    Ok(Dataset::new(NAME, index, data_home, parsers))
}

fn parse_pitch(path: Option<&Path>) -> Result<Option<Annotation>, DataError> {
    match path {
        None => Ok(None),
        Some(path) => {
            load_fixed_hop(path, PITCH_HOP_SECONDS).map(|data| Some(Annotation::F0(data)))
        }
    }
}
