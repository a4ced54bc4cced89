//! Payload decoding pipelines.
//!
//! Decoding is best effort. Ambiguous tones, malformed chunks and a missing
//! sentinel all degrade to partial output, reported through the quality
//! counters rather than as errors. The only error is an invalid acoustic
//! configuration.

use image::RgbImage;
use tracing::{info, warn};

use crate::acoustic::{self, AcousticConfig, AcousticError, AudioCarrier};
use crate::frame::{unframe, Unframed};
use crate::payload::{decode_payload, PayloadAdapter, PayloadOutcome};
use crate::visual;

/// Bytes recovered from an audio carrier.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Recovered payload bytes.
    pub bytes: Vec<u8>,
    /// Windows analysed.
    pub windows: usize,
    /// Windows dropped as ambiguous.
    pub dropped_windows: usize,
    /// Sentinel found.
    pub terminated: bool,
    /// Chunks skipped by the framer.
    pub malformed_chunks: usize,
}

impl DecodedAudio {
    /// Returns true if nothing was dropped or skipped.
    pub fn is_clean(&self) -> bool {
        self.dropped_windows == 0 && self.terminated && self.malformed_chunks == 0
    }
}

/// Bytes recovered from an image carrier.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Recovered payload bytes.
    pub bytes: Vec<u8>,
    /// Bits read from the image.
    pub bits_read: usize,
    /// Sentinel found.
    pub terminated: bool,
    /// Chunks skipped by the framer.
    pub malformed_chunks: usize,
}

/// Demodulates and unframes an audio carrier at its own sample rate.
///
/// Durations, carriers and tolerance come from `config`; its sample rate is
/// ignored in favour of the carrier's.
pub fn decode_audio(
    carrier: &AudioCarrier,
    config: &AcousticConfig,
) -> Result<DecodedAudio, AcousticError> {
    decode_samples(carrier.samples(), &config.with_sample_rate(carrier.sample_rate()))
}

/// Demodulates and unframes raw samples at `config.sample_rate`.
pub fn decode_samples(
    samples: &[i16],
    config: &AcousticConfig,
) -> Result<DecodedAudio, AcousticError> {
    let demodulation = acoustic::demodulate(samples, config)?;
    if !demodulation.is_clean() {
        warn!(
            dropped = demodulation.dropped_count(),
            windows = demodulation.windows,
            "ambiguous windows dropped, bit alignment may be lost"
        );
    }

    let Unframed {
        bytes,
        terminated,
        malformed_chunks,
    } = unframe(&demodulation.bits);

    info!(
        bytes = bytes.len(),
        windows = demodulation.windows,
        dropped = demodulation.dropped_count(),
        "decoded audio payload"
    );

    Ok(DecodedAudio {
        bytes,
        windows: demodulation.windows,
        dropped_windows: demodulation.dropped_count(),
        terminated,
        malformed_chunks,
    })
}

/// Extracts and unframes an image carrier. Never fails.
pub fn decode_image(pixels: &RgbImage) -> DecodedImage {
    let bits = visual::extract(pixels);
    let Unframed {
        bytes,
        terminated,
        malformed_chunks,
    } = unframe(&bits);

    info!(bytes = bytes.len(), bits = bits.len(), "decoded image payload");

    DecodedImage {
        bytes,
        bits_read: bits.len(),
        terminated,
        malformed_chunks,
    }
}

/// Decodes an audio carrier and hands the bytes to `adapter`.
pub fn decode_audio_with<A: PayloadAdapter>(
    adapter: &A,
    carrier: &AudioCarrier,
    config: &AcousticConfig,
) -> Result<(PayloadOutcome<A::Payload>, DecodedAudio), AcousticError> {
    let decoded = decode_audio(carrier, config)?;
    Ok((decode_payload(adapter, &decoded.bytes), decoded))
}

/// Decodes an image carrier and hands the bytes to `adapter`.
pub fn decode_image_with<A: PayloadAdapter>(
    adapter: &A,
    pixels: &RgbImage,
) -> (PayloadOutcome<A::Payload>, DecodedImage) {
    let decoded = decode_image(pixels);
    (decode_payload(adapter, &decoded.bytes), decoded)
}
