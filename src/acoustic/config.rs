//! Acoustic channel configuration.

use serde::{Deserialize, Serialize};

use super::AcousticError;

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default tone length per bit, in seconds.
pub const DEFAULT_TONE_DURATION: f64 = 0.1;

/// Default silent guard after each tone, in seconds.
pub const DEFAULT_GAP_DURATION: f64 = 0.05;

/// Default peak amplitude (full scale for 16-bit PCM).
pub const DEFAULT_AMPLITUDE: i16 = i16::MAX;

/// Default carrier for bit `1`, in Hz.
pub const DEFAULT_FREQ_ONE: f64 = 880.0;

/// Default carrier for bit `0`, in Hz.
pub const DEFAULT_FREQ_ZERO: f64 = 440.0;

/// Default classification tolerance around each carrier, in Hz.
pub const DEFAULT_TOLERANCE: f64 = 50.0;

/// Default upper bound on spectrum bin spacing, in Hz.
pub const DEFAULT_ANALYSIS_RESOLUTION: f64 = 1.0;

/// Upper bound on samples in one tone or gap segment.
pub const MAX_SEGMENT_SAMPLES: usize = 1 << 20;

/// Upper bound on the zero-padded spectrum length.
pub const MAX_ANALYSIS_LEN: usize = 1 << 20;

/// Parameters shared by the modulator and demodulator.
///
/// Both sides must agree on durations and carriers. The demodulator takes the
/// sample rate from the carrier file when one is available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcousticConfig {
    /// Samples per second.
    pub sample_rate: u32,
    /// Tone length per bit, in seconds.
    pub tone_duration_secs: f64,
    /// Silent guard after each tone, in seconds.
    pub gap_duration_secs: f64,
    /// Peak amplitude of each tone.
    pub amplitude: i16,
    /// Carrier frequency for bit `1`.
    pub freq_one_hz: f64,
    /// Carrier frequency for bit `0`.
    pub freq_zero_hz: f64,
    /// Maximum distance (inclusive) between the dominant frequency and a
    /// carrier for the window to be classified.
    pub tolerance_hz: f64,
    /// The spectrum is zero-padded until its bin spacing is at most this.
    pub analysis_resolution_hz: f64,
}

impl Default for AcousticConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            tone_duration_secs: DEFAULT_TONE_DURATION,
            gap_duration_secs: DEFAULT_GAP_DURATION,
            amplitude: DEFAULT_AMPLITUDE,
            freq_one_hz: DEFAULT_FREQ_ONE,
            freq_zero_hz: DEFAULT_FREQ_ZERO,
            tolerance_hz: DEFAULT_TOLERANCE,
            analysis_resolution_hz: DEFAULT_ANALYSIS_RESOLUTION,
        }
    }
}

impl AcousticConfig {
    /// Returns a copy with a different sample rate.
    pub fn with_sample_rate(self, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..self
        }
    }

    /// Returns a copy with different tone and gap durations.
    pub fn with_durations(self, tone_secs: f64, gap_secs: f64) -> Self {
        Self {
            tone_duration_secs: tone_secs,
            gap_duration_secs: gap_secs,
            ..self
        }
    }

    /// Returns a copy with different carrier frequencies.
    pub fn with_frequencies(self, freq_one_hz: f64, freq_zero_hz: f64) -> Self {
        Self {
            freq_one_hz,
            freq_zero_hz,
            ..self
        }
    }

    /// Returns a copy with a different classification tolerance.
    pub fn with_tolerance(self, tolerance_hz: f64) -> Self {
        Self {
            tolerance_hz,
            ..self
        }
    }

    /// Samples in one tone segment.
    pub fn tone_samples(&self) -> usize {
        seconds_to_samples(self.tone_duration_secs, self.sample_rate)
    }

    /// Samples in one silent gap.
    pub fn gap_samples(&self) -> usize {
        seconds_to_samples(self.gap_duration_secs, self.sample_rate)
    }

    /// Samples from the start of one symbol to the start of the next.
    pub fn symbol_stride(&self) -> usize {
        self.tone_samples().saturating_add(self.gap_samples())
    }

    /// Spectrum length for one tone window, zero-padded to the analysis
    /// resolution.
    pub fn analysis_len(&self) -> usize {
        self.padded_len(self.tone_samples())
    }

    /// Spectrum length for a window of `window_len` samples.
    pub(crate) fn padded_len(&self, window_len: usize) -> usize {
        let padded = (self.sample_rate as f64 / self.analysis_resolution_hz).ceil() as usize;
        window_len.max(padded).max(1)
    }

    /// Checks every parameter, rejecting the first invalid one.
    pub fn validate(&self) -> Result<(), AcousticError> {
        if self.sample_rate == 0 {
            return Err(invalid("sample_rate", "must be positive"));
        }
        if !(self.tone_duration_secs.is_finite() && self.tone_duration_secs > 0.0) {
            return Err(invalid("tone_duration_secs", "must be a positive number"));
        }
        check_segment("tone_duration_secs", self.tone_duration_secs, self.sample_rate)?;
        if self.tone_samples() == 0 {
            return Err(invalid(
                "tone_duration_secs",
                "shorter than one sample at this sample rate",
            ));
        }
        if !(self.gap_duration_secs.is_finite() && self.gap_duration_secs > 0.0) {
            return Err(invalid("gap_duration_secs", "must be a positive number"));
        }
        check_segment("gap_duration_secs", self.gap_duration_secs, self.sample_rate)?;
        if self.amplitude <= 0 {
            return Err(invalid("amplitude", "must be positive"));
        }

        let nyquist = self.sample_rate as f64 / 2.0;
        for (field, freq) in [
            ("freq_one_hz", self.freq_one_hz),
            ("freq_zero_hz", self.freq_zero_hz),
        ] {
            if !(freq.is_finite() && freq > 0.0) {
                return Err(invalid(field, "must be a positive number"));
            }
            if freq >= nyquist {
                return Err(AcousticError::InvalidConfig {
                    field,
                    reason: format!("{} Hz is not below the Nyquist limit {} Hz", freq, nyquist),
                });
            }
        }
        if self.freq_one_hz == self.freq_zero_hz {
            return Err(invalid("freq_one_hz", "must differ from freq_zero_hz"));
        }

        if !(self.tolerance_hz.is_finite() && self.tolerance_hz > 0.0) {
            return Err(invalid("tolerance_hz", "must be a positive number"));
        }
        if !(self.analysis_resolution_hz.is_finite() && self.analysis_resolution_hz > 0.0) {
            return Err(invalid("analysis_resolution_hz", "must be a positive number"));
        }
        if self.sample_rate as f64 / self.analysis_resolution_hz > MAX_ANALYSIS_LEN as f64 {
            return Err(AcousticError::InvalidConfig {
                field: "analysis_resolution_hz",
                reason: format!(
                    "spectrum would exceed {} bins at {} Hz",
                    MAX_ANALYSIS_LEN, self.sample_rate
                ),
            });
        }

        Ok(())
    }
}

fn check_segment(field: &'static str, secs: f64, sample_rate: u32) -> Result<(), AcousticError> {
    if secs * sample_rate as f64 > MAX_SEGMENT_SAMPLES as f64 {
        return Err(AcousticError::InvalidConfig {
            field,
            reason: format!("longer than {} samples", MAX_SEGMENT_SAMPLES),
        });
    }
    Ok(())
}

fn seconds_to_samples(secs: f64, sample_rate: u32) -> usize {
    (secs * sample_rate as f64).round().max(0.0) as usize
}

fn invalid(field: &'static str, reason: &str) -> AcousticError {
    AcousticError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}
