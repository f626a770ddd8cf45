//! WAV decoding. Integer samples are normalized to f32 in [-1, 1]; float
//! files pass through. Decoding happens on every access (see `Track::audio`),
//! so nothing here caches.

use std::path::Path;

use crate::annotations::AudioData;
use crate::corpus::error::DataError;

fn map_hound_error(path: &Path, err: hound::Error) -> DataError {
    match err {
        hound::Error::IoError(io_err) => DataError::from_read(path, io_err),
        other => DataError::parse(path, other.to_string()),
    }
}

pub fn load_wav(path: &Path) -> Result<AudioData, DataError> {
    let reader = hound::WavReader::open(path).map_err(|err| map_hound_error(path, err))?;
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<f32>, hound::Error>>()
            .map_err(|err| map_hound_error(path, err))?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<Vec<f32>, hound::Error>>()
                .map_err(|err| map_hound_error(path, err))?
        }
    };
    Ok(AudioData {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}
