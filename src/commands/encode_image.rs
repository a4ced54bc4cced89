//! Encode image command - hide a payload in an image's LSBs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use whisper_codec::{encode_image, ImageCarrier};

use super::{load_payload, CommandExecutor};

/// Hide a payload in the least significant bits of an image.
///
/// The output must be a lossless format (PNG or BMP).
#[derive(Args, Debug)]
pub struct EncodeImageCommand {
    /// Payload text (JSON unless --raw), or a file path with --from-file
    pub payload: String,

    /// Cover image
    pub input: PathBuf,

    /// Output image (.png or .bmp)
    pub output: PathBuf,

    /// Treat PAYLOAD as a path and read the bytes from it
    #[arg(long)]
    pub from_file: bool,

    /// Send the bytes as-is instead of validating them as JSON
    #[arg(long)]
    pub raw: bool,
}

impl CommandExecutor for EncodeImageCommand {
    fn execute(&self) -> Result<()> {
        let payload = load_payload(&self.payload, self.from_file, self.raw)?;
        let cover = ImageCarrier::from_file(&self.input)
            .with_context(|| format!("Failed to read image from {}", self.input.display()))?;

        let encoded = encode_image(&payload, cover.pixels()).context("Failed to embed payload")?;
        ImageCarrier::from_pixels(encoded.pixels)
            .save(&self.output)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!("Payload embedded in: {}", self.output.display());
        println!("  Payload: {} bytes", payload.len());
        println!(
            "  Bits used: {} of {} ({:.1}%)",
            encoded.bits_embedded,
            encoded.capacity_bits,
            100.0 * encoded.bits_embedded as f64 / encoded.capacity_bits.max(1) as f64
        );

        Ok(())
    }
}
