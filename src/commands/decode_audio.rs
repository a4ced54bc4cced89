//! Decode audio command - recover a payload from a WAV file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use whisper_codec::{decode_audio, generate_qr_to_file, AudioCarrier, QrConfig, QrFormat};

use super::{load_config, report_payload, CommandExecutor};

/// Recover a payload from a two-tone FSK WAV file.
///
/// Ambiguous tones are dropped rather than treated as errors. The command
/// fails only if nothing was recovered or the bytes are not JSON (without
/// --raw); the raw bytes are still printed in that case.
#[derive(Args, Debug)]
pub struct DecodeAudioCommand {
    /// Input WAV file
    pub input: PathBuf,

    /// Print the bytes as text instead of parsing them as JSON
    #[arg(long)]
    pub raw: bool,

    /// Write the recovered bytes to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also render the recovered payload as a QR code (.png, .svg or .txt)
    #[arg(long)]
    pub qr: Option<PathBuf>,

    /// JSON configuration file (tones, durations, tolerance)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CommandExecutor for DecodeAudioCommand {
    fn execute(&self) -> Result<()> {
        let config = load_config(self.config.as_ref())?;
        let carrier = AudioCarrier::from_file(&self.input)
            .with_context(|| format!("Failed to read audio from {}", self.input.display()))?;

        let decoded = decode_audio(&carrier, &config.acoustic).context("Failed to decode audio")?;

        eprintln!(
            "Analysed {} windows, dropped {}, sentinel {}",
            decoded.windows,
            decoded.dropped_windows,
            if decoded.terminated { "found" } else { "missing" }
        );

        if let Some(qr_path) = &self.qr {
            if decoded.bytes.is_empty() {
                eprintln!("Warning: nothing recovered, QR code not written");
            } else {
                let qr_config = QrConfig {
                    format: QrFormat::from_path(qr_path),
                    ..Default::default()
                };
                generate_qr_to_file(&decoded.bytes, qr_path, &qr_config).with_context(|| {
                    format!("Failed to write QR code to {}", qr_path.display())
                })?;
                eprintln!("QR code written to: {}", qr_path.display());
            }
        }

        report_payload(&decoded.bytes, self.raw, self.output.as_deref())
    }
}
