//! FSK demodulator.
//!
//! Windows of one tone length are taken every `tone + gap` samples, so that
//! each lands on a tone and skips the guard gap. Each window is classified
//! by the strongest bin of its magnitude spectrum.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use tracing::debug;

use super::{AcousticConfig, AcousticError};
use crate::frame::{Bit, Bitstream};

/// A window whose dominant frequency matched neither carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroppedWindow {
    /// Window position in symbol order.
    pub index: usize,
    /// First sample of the window.
    pub start_sample: usize,
    /// Dominant frequency measured in the window.
    pub dominant_hz: f64,
}

/// Bits recovered from a waveform, plus decode-quality counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Demodulation {
    /// Classified bits in window order.
    pub bits: Bitstream,
    /// Number of full windows analysed.
    pub windows: usize,
    /// Windows skipped because their frequency was ambiguous.
    pub dropped: Vec<DroppedWindow>,
}

impl Demodulation {
    /// Number of windows that produced no bit.
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Returns true if every window was classified.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Recovers a bitstream from FSK samples.
///
/// A trailing window shorter than one tone is discarded. Ambiguous windows
/// emit nothing and are recorded in [`Demodulation::dropped`].
pub fn demodulate(samples: &[i16], config: &AcousticConfig) -> Result<Demodulation, AcousticError> {
    config.validate()?;

    let window_len = config.tone_samples();
    let stride = config.symbol_stride();
    let analyzer = SpectrumAnalyzer::new(window_len, config);

    let mut result = Demodulation::default();
    let mut start = 0usize;

    while start + window_len <= samples.len() {
        let index = result.windows;
        let dominant_hz = analyzer.dominant_frequency(&samples[start..start + window_len]);

        match classify(dominant_hz, config) {
            Some(bit) => result.bits.push(bit),
            None => {
                debug!(index, start, dominant_hz, "dropping ambiguous window");
                result.dropped.push(DroppedWindow {
                    index,
                    start_sample: start,
                    dominant_hz,
                });
            }
        }

        result.windows += 1;
        start += stride;
    }

    debug!(
        windows = result.windows,
        bits = result.bits.len(),
        dropped = result.dropped.len(),
        "demodulated waveform"
    );

    Ok(result)
}

/// Dominant frequency of a single window, in Hz.
///
/// The window is zero-padded to the configured analysis resolution. Ties go
/// to the lowest frequency.
pub fn dominant_frequency(window: &[i16], config: &AcousticConfig) -> Result<f64, AcousticError> {
    config.validate()?;
    Ok(SpectrumAnalyzer::new(window.len(), config).dominant_frequency(window))
}

/// Maps a dominant frequency to a bit, or `None` if it is ambiguous.
///
/// The `1` carrier is checked first. Both bounds are inclusive.
pub fn classify(freq_hz: f64, config: &AcousticConfig) -> Option<Bit> {
    if (freq_hz - config.freq_one_hz).abs() <= config.tolerance_hz {
        Some(Bit::One)
    } else if (freq_hz - config.freq_zero_hz).abs() <= config.tolerance_hz {
        Some(Bit::Zero)
    } else {
        None
    }
}

/// Forward FFT planned once and reused across windows of equal length.
struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f64>>,
    fft_len: usize,
    sample_rate: f64,
}

impl SpectrumAnalyzer {
    fn new(window_len: usize, config: &AcousticConfig) -> Self {
        let sample_rate = config.sample_rate as f64;
        let fft_len = config.padded_len(window_len);

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_len);

        Self {
            fft,
            fft_len,
            sample_rate,
        }
    }

    fn dominant_frequency(&self, window: &[i16]) -> f64 {
        let mut buffer: Vec<Complex<f64>> = window
            .iter()
            .map(|&s| Complex::new(s as f64, 0.0))
            .collect();
        buffer.resize(self.fft_len, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        // Real input: the upper half mirrors the lower half.
        let mut peak_bin = 0usize;
        let mut peak = f64::NEG_INFINITY;
        for (bin, c) in buffer.iter().enumerate().take(self.fft_len / 2 + 1) {
            let magnitude = c.norm_sqr();
            if magnitude > peak {
                peak = magnitude;
                peak_bin = bin;
            }
        }

        peak_bin as f64 * self.sample_rate / self.fft_len as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acoustic::{modulate, synthesize_tone};
    use crate::frame::{frame, unframe};

    fn detect(freq: f64) -> f64 {
        let config = AcousticConfig::default();
        let tone = synthesize_tone(freq, &config).unwrap();
        dominant_frequency(&tone, &config).unwrap()
    }

    #[test]
    fn test_detects_carriers_exactly() {
        assert_eq!(detect(880.0), 880.0);
        assert_eq!(detect(440.0), 440.0);
    }

    #[test]
    fn test_tolerance_boundaries() {
        let config = AcousticConfig::default();
        assert_eq!(classify(detect(890.0), &config), Some(Bit::One));
        assert_eq!(classify(detect(931.0), &config), None);
        assert_eq!(classify(detect(490.0), &config), Some(Bit::Zero));
        assert_eq!(classify(detect(389.0), &config), None);
    }

    #[test]
    fn test_silence_is_ambiguous() {
        let config = AcousticConfig::default();
        let silence = vec![0i16; config.tone_samples()];
        assert_eq!(dominant_frequency(&silence, &config).unwrap(), 0.0);
        assert_eq!(classify(0.0, &config), None);
    }

    #[test]
    fn test_hi_roundtrip() {
        let config = AcousticConfig::default();
        let bits = frame(b"HI");
        let samples = modulate(&bits, &config).unwrap();

        let demod = demodulate(&samples, &config).unwrap();
        assert_eq!(demod.windows, 24);
        assert!(demod.is_clean());
        assert_eq!(demod.bits, bits);
        assert_eq!(unframe(&demod.bits).bytes, b"HI");
    }

    #[test]
    fn test_discards_trailing_partial_window() {
        let config = AcousticConfig::default();
        let mut samples = modulate(&[Bit::One, Bit::Zero], &config).unwrap();
        samples.extend(synthesize_tone(880.0, &config).unwrap().into_iter().take(100));

        let demod = demodulate(&samples, &config).unwrap();
        assert_eq!(demod.windows, 2);
        assert_eq!(demod.bits, vec![Bit::One, Bit::Zero]);
    }

    #[test]
    fn test_ambiguous_window_is_dropped_and_counted() {
        let config = AcousticConfig::default();
        let mut samples = modulate(&[Bit::One], &config).unwrap();
        samples.extend(synthesize_tone(660.0, &config).unwrap());
        samples.resize(samples.len() + config.gap_samples(), 0);
        samples.extend(modulate(&[Bit::Zero], &config).unwrap());

        let demod = demodulate(&samples, &config).unwrap();
        assert_eq!(demod.windows, 3);
        assert_eq!(demod.bits, vec![Bit::One, Bit::Zero]);
        assert_eq!(demod.dropped_count(), 1);
        assert_eq!(demod.dropped[0].index, 1);
        assert_eq!(demod.dropped[0].start_sample, config.symbol_stride());
        assert_eq!(demod.dropped[0].dominant_hz, 660.0);
    }

    #[test]
    fn test_empty_buffer() {
        let demod = demodulate(&[], &AcousticConfig::default()).unwrap();
        assert_eq!(demod.windows, 0);
        assert!(demod.bits.is_empty());
    }

    #[test]
    fn test_custom_carriers() {
        let config = AcousticConfig::default()
            .with_sample_rate(48_000)
            .with_frequencies(1200.0, 2200.0);
        let bits = frame(&[0x5A]);
        let samples = modulate(&bits, &config).unwrap();
        let demod = demodulate(&samples, &config).unwrap();
        assert_eq!(demod.bits, bits);
    }

    #[test]
    fn test_rejects_unbounded_spectrum_before_allocating() {
        let config = AcousticConfig {
            analysis_resolution_hz: 1e-12,
            ..AcousticConfig::default()
        };
        let window = vec![0i16; 4410];
        assert!(matches!(
            demodulate(&window, &config),
            Err(AcousticError::InvalidConfig { field: "analysis_resolution_hz", .. })
        ));
        assert!(dominant_frequency(&window, &config).is_err());
    }
}
