//! WAV carrier files for the acoustic channel.
//!
//! Writes single-channel 16-bit signed PCM. Reading accepts any 16-bit
//! integer WAV; extra channels are discarded.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while reading or writing WAV carriers.
#[derive(Error, Debug)]
pub enum AudioCarrierError {
    #[error("Audio load error: {0}")]
    AudioLoadError(String),

    #[error("Audio save error: {0}")]
    AudioSaveError(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),
}

/// A mono 16-bit PCM waveform with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioCarrier {
    sample_rate: u32,
    samples: Vec<i16>,
}

impl AudioCarrier {
    /// Wraps samples produced by the modulator.
    pub fn from_samples(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Loads a WAV file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AudioCarrierError> {
        let reader =
            WavReader::open(path).map_err(|e| AudioCarrierError::AudioLoadError(e.to_string()))?;

        Self::from_reader(reader)
    }

    /// Loads WAV data held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AudioCarrierError> {
        let reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| AudioCarrierError::AudioLoadError(e.to_string()))?;

        Self::from_reader(reader)
    }

    fn from_reader<R: Read + Seek>(reader: WavReader<R>) -> Result<Self, AudioCarrierError> {
        let spec = reader.spec();

        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(AudioCarrierError::UnsupportedFormat(format!(
                "Only 16-bit PCM WAV is supported, got {} bits {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }
        if spec.channels == 0 {
            return Err(AudioCarrierError::UnsupportedFormat(
                "WAV header declares zero channels".to_string(),
            ));
        }

        let interleaved: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AudioCarrierError::AudioLoadError(e.to_string()))?;

        let samples = if spec.channels == 1 {
            interleaved
        } else {
            warn!(
                channels = spec.channels,
                "multi-channel WAV, decoding the first channel only"
            );
            interleaved
                .into_iter()
                .step_by(spec.channels as usize)
                .collect()
        };

        Ok(Self {
            sample_rate: spec.sample_rate,
            samples,
        })
    }

    fn spec(&self) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    /// Saves the waveform as a mono 16-bit WAV file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AudioCarrierError> {
        let mut writer = WavWriter::create(path, self.spec())
            .map_err(|e| AudioCarrierError::AudioSaveError(e.to_string()))?;

        for sample in &self.samples {
            writer
                .write_sample(*sample)
                .map_err(|e| AudioCarrierError::AudioSaveError(e.to_string()))?;
        }

        writer
            .finalize()
            .map_err(|e| AudioCarrierError::AudioSaveError(e.to_string()))
    }

    /// Returns the waveform encoded as WAV bytes.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, AudioCarrierError> {
        let mut bytes = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut bytes), self.spec())
                .map_err(|e| AudioCarrierError::AudioSaveError(e.to_string()))?;

            for sample in &self.samples {
                writer
                    .write_sample(*sample)
                    .map_err(|e| AudioCarrierError::AudioSaveError(e.to_string()))?;
            }

            writer
                .finalize()
                .map_err(|e| AudioCarrierError::AudioSaveError(e.to_string()))?;
        }
        Ok(bytes)
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The PCM samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consumes the carrier and returns its samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(sample_count: usize) -> Vec<i16> {
        (0..sample_count)
            .map(|i| {
                let t = i as f64 / 44100.0;
                (f64::sin(2.0 * std::f64::consts::PI * 440.0 * t) * 16000.0) as i16
            })
            .collect()
    }

    #[test]
    fn test_wav_bytes_roundtrip() {
        let carrier = AudioCarrier::from_samples(sine(10_000), 44_100);
        let bytes = carrier.to_wav_bytes().unwrap();
        let loaded = AudioCarrier::from_bytes(&bytes).unwrap();

        assert_eq!(loaded, carrier);
        assert_eq!(loaded.sample_rate(), 44_100);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let carrier = AudioCarrier::from_samples(sine(4410), 22_050);
        carrier.save(&path).unwrap();
        let loaded = AudioCarrier::from_file(&path).unwrap();

        assert_eq!(loaded.samples(), carrier.samples());
        assert_eq!(loaded.sample_rate(), 22_050);
    }

    #[test]
    fn test_duration() {
        let carrier = AudioCarrier::from_samples(vec![0; 22_050], 44_100);
        assert!((carrier.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stereo_keeps_first_channel() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut bytes = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
            for (left, right) in [(1i16, -1i16), (2, -2), (3, -3)] {
                writer.write_sample(left).unwrap();
                writer.write_sample(right).unwrap();
            }
            writer.finalize().unwrap();
        }

        let loaded = AudioCarrier::from_bytes(&bytes).unwrap();
        assert_eq!(loaded.samples(), &[1, 2, 3]);
    }

    #[test]
    fn test_rejects_float_wav() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut bytes = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
            writer.write_sample(0.5f32).unwrap();
            writer.finalize().unwrap();
        }

        let result = AudioCarrier::from_bytes(&bytes);
        assert!(matches!(result, Err(AudioCarrierError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_garbage_is_load_error() {
        let result = AudioCarrier::from_bytes(b"definitely not a wav file");
        assert!(matches!(result, Err(AudioCarrierError::AudioLoadError(_))));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AudioCarrier::from_file(dir.path().join("missing.wav"));
        assert!(matches!(result, Err(AudioCarrierError::AudioLoadError(_))));
    }
}
