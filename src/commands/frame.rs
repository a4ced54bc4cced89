//! Frame command - show the bitstream a payload is sent as.

use anyhow::Result;
use clap::Args;

use whisper_codec::frame::{bits_to_string, frame};

use super::{load_payload, CommandExecutor};

/// Print the framed bitstream of a payload, one byte per group.
#[derive(Args, Debug)]
pub struct FrameCommand {
    /// Payload text (JSON unless --raw), or a file path with --from-file
    pub payload: String,

    /// Treat PAYLOAD as a path and read the bytes from it
    #[arg(long)]
    pub from_file: bool,

    /// Frame the bytes as-is instead of validating them as JSON
    #[arg(long)]
    pub raw: bool,
}

impl CommandExecutor for FrameCommand {
    fn execute(&self) -> Result<()> {
        let payload = load_payload(&self.payload, self.from_file, self.raw)?;
        let bits = frame(&payload);

        let groups: Vec<String> = bits.chunks(8).map(bits_to_string).collect();
        println!("{}", groups.join(" "));
        eprintln!("{} payload bytes, {} bits", payload.len(), bits.len());

        Ok(())
    }
}
