//! # Whisper codec - covert payload transport over sound and pixels
//!
//! Carries an opaque byte payload (usually JSON metadata) over one of two
//! physical channels:
//!
//! - **Acoustic**: two-tone FSK. Each bit is a 0.1 s sine burst (880 Hz for
//!   `1`, 440 Hz for `0`) followed by a 0.05 s silent gap. Decoding slices the
//!   waveform on the same grid and classifies each window by its dominant
//!   frequency.
//! - **Visual**: LSB embedding. Each bit overwrites the least significant bit
//!   of one color channel, pixels in scan order, channels in R, G, B order.
//!
//! Both channels share one framing contract: bytes expand MSB first and a
//! zero sentinel byte marks the end.
//!
//! ## Pipeline
//!
//! ```text
//! payload --adapter--> bytes --frame--> bits --+--> modulate --> WAV
//!                                              +--> embed    --> PNG
//!
//! WAV --> demodulate --+
//! PNG --> extract    --+--> bits --unframe--> bytes --adapter--> payload
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use whisper_codec::{decode_audio, encode_audio, AcousticConfig};
//!
//! let config = AcousticConfig::default();
//! let carrier = encode_audio(b"HI", &config).unwrap();
//!
//! let decoded = decode_audio(&carrier, &config).unwrap();
//! assert_eq!(decoded.bytes, b"HI");
//! assert_eq!(decoded.dropped_windows, 0);
//! ```
//!
//! Decoding never fails on a noisy carrier. It returns whatever bytes it
//! recovered together with counters describing what was lost.
//!
//! ## Modules
//!
//! - [`frame`]: bit framing and sentinel handling
//! - [`acoustic`]: FSK modulator, demodulator and WAV carriers
//! - [`visual`]: LSB embedder, extractor and image carriers
//! - [`payload`]: payload adapters (JSON, raw bytes)
//! - [`encoder`] / [`decoder`]: end-to-end pipelines
//! - [`qr`]: QR rendering of payload text
//! - [`config`]: JSON configuration files

pub mod acoustic;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod frame;
pub mod payload;
pub mod qr;
pub mod visual;

// Re-export commonly used types at the crate root
pub use acoustic::{AcousticConfig, AcousticError, AudioCarrier, AudioCarrierError, Demodulation};
pub use config::{CodecConfig, ConfigError};
pub use decoder::{
    decode_audio, decode_audio_with, decode_image, decode_image_with, decode_samples, DecodedAudio,
    DecodedImage,
};
pub use encoder::{
    encode_audio, encode_audio_with, encode_image, encode_image_with, EncodedImage, EncoderError,
};
pub use frame::{frame, unframe, unframe_text, Bit, Bitstream, Unframed};
pub use payload::{
    decode_payload, JsonAdapter, PayloadAdapter, PayloadError, PayloadOutcome, RawAdapter,
};
pub use qr::{generate_qr, generate_qr_to_file, QrConfig, QrError, QrFormat};
pub use visual::{ImageCarrier, ImageCarrierError, VisualError};
