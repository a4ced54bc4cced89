//! Decode image command - recover a payload from an image's LSBs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use whisper_codec::{decode_image, ImageCarrier};

use super::{report_payload, CommandExecutor};

/// Recover a payload hidden in the least significant bits of an image.
#[derive(Args, Debug)]
pub struct DecodeImageCommand {
    /// Input image
    pub input: PathBuf,

    /// Print the bytes as text instead of parsing them as JSON
    #[arg(long)]
    pub raw: bool,

    /// Write the recovered bytes to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommandExecutor for DecodeImageCommand {
    fn execute(&self) -> Result<()> {
        let carrier = ImageCarrier::from_file(&self.input)
            .with_context(|| format!("Failed to read image from {}", self.input.display()))?;

        let decoded = decode_image(carrier.pixels());
        if !decoded.terminated {
            eprintln!(
                "Warning: no sentinel in {} bits, payload may be truncated",
                decoded.bits_read
            );
        }

        report_payload(&decoded.bytes, self.raw, self.output.as_deref())
    }
}
