//! mirkit: uniform programmatic access to music-information-retrieval
//! research corpora.
//!
//! Each dataset binds a checked-in index (track id -> file role -> path and
//! checksum) to a set of per-format parsers. The [corpus] engine validates a
//! local copy against the index, resolves paths under a configurable data
//! home, and materializes annotations lazily per track; [datasets] holds the
//! per-corpus bindings.
//!
//! ```no_run
//! use mirkit::datasets;
//!
//! let beatles = datasets::open("beatles", None)?;
//! let report = beatles.validate(None)?;
//! if report.is_clean() {
//!     let track = beatles.track("0101")?;
//!     if let Some(chords) = track.chords()? {
//!         println!("{} chord segments", chords.labels.len());
//!     }
//! }
//! # Ok::<(), mirkit::corpus::DataError>(())
//! ```

pub mod annotations;
pub mod cli;
pub mod corpus;
pub mod datasets;
pub mod parsers;
