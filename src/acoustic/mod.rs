//! Acoustic channel: two-tone FSK over 16-bit mono PCM.
//!
//! Each bit becomes a fixed-length sine burst (880 Hz for `1`, 440 Hz for
//! `0` by default) followed by a silent guard gap. The demodulator slices the
//! signal on the same grid and classifies each window by its dominant
//! frequency.

mod config;
mod demodulate;
mod modulate;
pub mod wav;

use thiserror::Error;

pub use config::{
    AcousticConfig, DEFAULT_AMPLITUDE, DEFAULT_ANALYSIS_RESOLUTION, DEFAULT_FREQ_ONE,
    DEFAULT_FREQ_ZERO, DEFAULT_GAP_DURATION, DEFAULT_SAMPLE_RATE, DEFAULT_TOLERANCE,
    DEFAULT_TONE_DURATION,
};
pub use demodulate::{classify, demodulate, dominant_frequency, Demodulation, DroppedWindow};
pub use modulate::{modulate, synthesize_tone};
pub use wav::{AudioCarrier, AudioCarrierError};

/// Errors raised by the acoustic modulator and demodulator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcousticError {
    #[error("Invalid acoustic configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}
