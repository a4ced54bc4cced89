//! Payload encoding pipelines.
//!
//! 1. Frame the payload bytes (stuff reserved bytes, append the sentinel)
//! 2. Render the bitstream on a channel:
//!    - acoustic: one FSK tone per bit
//!    - visual: one LSB per color channel

use image::RgbImage;
use thiserror::Error;
use tracing::info;

use crate::acoustic::{self, AcousticConfig, AcousticError, AudioCarrier};
use crate::frame::frame;
use crate::payload::{PayloadAdapter, PayloadError};
use crate::visual::{self, VisualError};

/// Errors that can occur during encoding.
#[derive(Error, Debug)]
pub enum EncoderError {
    #[error(transparent)]
    Acoustic(#[from] AcousticError),

    #[error(transparent)]
    Visual(#[from] VisualError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Result of embedding a payload into an image.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// The carrier with the payload in its LSBs.
    pub pixels: RgbImage,
    /// Bits written, sentinel included.
    pub bits_embedded: usize,
    /// Bits the image can hold.
    pub capacity_bits: usize,
}

/// Modulates payload bytes into an FSK waveform.
pub fn encode_audio(payload: &[u8], config: &AcousticConfig) -> Result<AudioCarrier, EncoderError> {
    let bits = frame(payload);
    let samples = acoustic::modulate(&bits, config)?;
    let carrier = AudioCarrier::from_samples(samples, config.sample_rate);

    info!(
        payload_bytes = payload.len(),
        bits = bits.len(),
        duration_secs = carrier.duration_secs(),
        "encoded audio payload"
    );

    Ok(carrier)
}

/// Embeds payload bytes into a copy of `pixels`.
pub fn encode_image(payload: &[u8], pixels: &RgbImage) -> Result<EncodedImage, EncoderError> {
    let bits = frame(payload);
    let stego = visual::embed(pixels, &bits)?;
    let capacity_bits = visual::capacity_bits(pixels);

    info!(
        payload_bytes = payload.len(),
        bits = bits.len(),
        capacity_bits,
        "encoded image payload"
    );

    Ok(EncodedImage {
        pixels: stego,
        bits_embedded: bits.len(),
        capacity_bits,
    })
}

/// Serializes an application payload with `adapter`, then encodes it as audio.
pub fn encode_audio_with<A: PayloadAdapter>(
    adapter: &A,
    payload: &A::Payload,
    config: &AcousticConfig,
) -> Result<AudioCarrier, EncoderError> {
    let bytes = adapter.serialize(payload)?;
    encode_audio(&bytes, config)
}

/// Serializes an application payload with `adapter`, then embeds it.
pub fn encode_image_with<A: PayloadAdapter>(
    adapter: &A,
    payload: &A::Payload,
    pixels: &RgbImage,
) -> Result<EncodedImage, EncoderError> {
    let bytes = adapter.serialize(payload)?;
    encode_image(&bytes, pixels)
}
