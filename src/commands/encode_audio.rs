//! Encode audio command - modulate a payload into a WAV file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use whisper_codec::{encode_audio, generate_qr_to_file, QrConfig, QrFormat};

use super::{load_config, load_payload, CommandExecutor};

/// Encode a payload as a two-tone FSK WAV file.
#[derive(Args, Debug)]
pub struct EncodeAudioCommand {
    /// Payload text (JSON unless --raw), or a file path with --from-file
    pub payload: String,

    /// Output WAV file
    pub output: PathBuf,

    /// Treat PAYLOAD as a path and read the bytes from it
    #[arg(long)]
    pub from_file: bool,

    /// Send the bytes as-is instead of validating them as JSON
    #[arg(long)]
    pub raw: bool,

    /// Also render the payload as a QR code (.png, .svg or .txt)
    #[arg(long)]
    pub qr: Option<PathBuf>,

    /// JSON configuration file (sample rate, tones, durations)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CommandExecutor for EncodeAudioCommand {
    fn execute(&self) -> Result<()> {
        let config = load_config(self.config.as_ref())?;
        let payload = load_payload(&self.payload, self.from_file, self.raw)?;

        let carrier = encode_audio(&payload, &config.acoustic).context("Failed to encode payload")?;
        carrier
            .save(&self.output)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!("Payload encoded to: {}", self.output.display());
        println!("  Payload: {} bytes", payload.len());
        println!(
            "  Audio: {:.2} s at {} Hz ({} samples)",
            carrier.duration_secs(),
            carrier.sample_rate(),
            carrier.samples().len()
        );

        if let Some(qr_path) = &self.qr {
            let qr_config = QrConfig {
                format: QrFormat::from_path(qr_path),
                ..Default::default()
            };
            generate_qr_to_file(&payload, qr_path, &qr_config)
                .with_context(|| format!("Failed to write QR code to {}", qr_path.display()))?;
            println!("  QR code: {}", qr_path.display());
        }

        Ok(())
    }
}
