//! Image capacity info command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use whisper_codec::visual::{capacity_bits, capacity_bytes};
use whisper_codec::ImageCarrier;

use super::CommandExecutor;

/// Show how much payload an image can carry.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Cover image
    pub input: PathBuf,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self) -> Result<()> {
        let carrier = ImageCarrier::from_file(&self.input)
            .with_context(|| format!("Failed to read image from {}", self.input.display()))?;
        let (width, height) = carrier.dimensions();

        println!("Image Capacity");
        println!("==============");
        println!("  Dimensions: {}x{} ({} pixels)", width, height, width as u64 * height as u64);
        println!("  Capacity: {} bits", capacity_bits(carrier.pixels()));
        println!("  Max text payload: {} bytes", capacity_bytes(carrier.pixels()));

        Ok(())
    }
}
