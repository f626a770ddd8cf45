//! Normalized in-memory annotation records.
//!
//! Every per-format parser converts its source file into one of these types,
//! so downstream code sees the same shapes no matter which corpus the data
//! came from. Times are seconds, frequencies Hz.

use serde::{Deserialize, Serialize};

/// Beat times with optional metric positions (1 = downbeat). `positions[i]`
/// is `None` when the source file carries times only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatData {
    pub times: Vec<f64>,
    pub positions: Vec<Option<u32>>,
}

/// Chord labels over (start, end) intervals, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordData {
    pub intervals: Vec<(f64, f64)>,
    pub labels: Vec<String>,
}

/// Structural section labels over (start, end) intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionData {
    pub intervals: Vec<(f64, f64)>,
    pub labels: Vec<String>,
}

/// Key labels. Global-key corpora produce a single interval spanning the
/// whole excerpt; segment corpora produce one entry per modulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyData {
    pub intervals: Vec<(f64, f64)>,
    pub keys: Vec<String>,
}

/// A sampled fundamental-frequency contour. A frequency of 0.0 marks an
/// unvoiced frame. `confidence` is present only for corpora that annotate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct F0Data {
    pub times: Vec<f64>,
    pub frequencies: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Vec<f64>>,
}

impl F0Data {
    /// Build a contour from frame values sampled on a fixed hop, synthesizing
    /// the time axis. Used for corpora that store one frequency per line.
    pub fn from_fixed_hop(frequencies: Vec<f64>, hop_seconds: f64) -> F0Data {
        let times = (0..frequencies.len())
            .map(|frame| frame as f64 * hop_seconds)
            .collect();
        F0Data {
            times,
            frequencies,
            confidence: None,
        }
    }
}

/// Timed lyric lines over (start, end) intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricData {
    pub intervals: Vec<(f64, f64)>,
    pub lines: Vec<String>,
}

/// Decoded audio. Interleaved f32 samples in [-1, 1]. This type is never
/// held in a track's annotation cache; see `Track::audio`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioData {
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.channels as f64 * self.sample_rate as f64)
    }
}

/// Sum of all cacheable annotation records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Annotation {
    Beats(BeatData),
    Chords(ChordData),
    Sections(SectionData),
    Key(KeyData),
    F0(F0Data),
    Lyrics(LyricData),
}

impl Annotation {
    pub fn as_beats(&self) -> Option<&BeatData> {
        match self {
            Annotation::Beats(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_chords(&self) -> Option<&ChordData> {
        match self {
            Annotation::Chords(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_sections(&self) -> Option<&SectionData> {
        match self {
            Annotation::Sections(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyData> {
        match self {
            Annotation::Key(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_f0(&self) -> Option<&F0Data> {
        match self {
            Annotation::F0(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_lyrics(&self) -> Option<&LyricData> {
        match self {
            Annotation::Lyrics(data) => Some(data),
            _ => None,
        }
    }
}
