//! FSK modulator.

use std::f64::consts::PI;

use tracing::debug;

use super::{AcousticConfig, AcousticError};
use crate::frame::Bit;

/// Renders a bitstream as a train of tones separated by silent gaps.
///
/// The output holds exactly `bits.len() * config.symbol_stride()` samples.
pub fn modulate(bits: &[Bit], config: &AcousticConfig) -> Result<Vec<i16>, AcousticError> {
    config.validate()?;

    let one = tone(config.freq_one_hz, config);
    let zero = tone(config.freq_zero_hz, config);
    let gap = config.gap_samples();

    let mut samples = Vec::with_capacity(bits.len() * config.symbol_stride());
    for bit in bits {
        match bit {
            Bit::One => samples.extend_from_slice(&one),
            Bit::Zero => samples.extend_from_slice(&zero),
        }
        samples.resize(samples.len() + gap, 0);
    }

    debug!(
        bits = bits.len(),
        samples = samples.len(),
        sample_rate = config.sample_rate,
        "modulated bitstream"
    );

    Ok(samples)
}

/// Synthesizes one tone segment at an arbitrary frequency.
///
/// Uses the configured sample rate, tone duration and amplitude.
pub fn synthesize_tone(freq_hz: f64, config: &AcousticConfig) -> Result<Vec<i16>, AcousticError> {
    config.validate()?;
    Ok(tone(freq_hz, config))
}

fn tone(freq_hz: f64, config: &AcousticConfig) -> Vec<i16> {
    let rate = config.sample_rate as f64;
    let amplitude = config.amplitude as f64;
    let angular = 2.0 * PI * freq_hz;

    (0..config.tone_samples())
        .map(|i| {
            let t = i as f64 / rate;
            // `as` truncates toward zero and saturates at the i16 bounds
            (amplitude * (angular * t).sin()) as i16
        })
        .collect()
}
