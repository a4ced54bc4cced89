//! Whisper - covert payload transport over sound and pixels
//!
//! A CLI over the whisper codec: two-tone FSK audio and image LSB carriers.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CapacityCommand, CommandExecutor, DecodeAudioCommand, DecodeImageCommand, EncodeAudioCommand,
    EncodeImageCommand, FrameCommand,
};

/// Whisper - covert payload transport over sound and pixels
///
/// Payloads (JSON by default) are framed with a zero sentinel byte and sent
/// as 880/440 Hz tones in a WAV file, or as least significant bits of an
/// image's color channels.
#[derive(Parser)]
#[command(name = "whisper")]
#[command(version)]
#[command(about = "Covert payload transport over two-tone FSK audio and image LSB carriers")]
#[command(long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a payload as a two-tone FSK WAV file
    #[command(name = "encode-audio")]
    EncodeAudio(EncodeAudioCommand),

    /// Recover a payload from a two-tone FSK WAV file
    #[command(name = "decode-audio")]
    DecodeAudio(DecodeAudioCommand),

    /// Hide a payload in the least significant bits of an image
    #[command(name = "encode-image")]
    EncodeImage(EncodeImageCommand),

    /// Recover a payload from the least significant bits of an image
    #[command(name = "decode-image")]
    DecodeImage(DecodeImageCommand),

    /// Show how much payload an image can carry
    Capacity(CapacityCommand),

    /// Print the framed bitstream of a payload
    Frame(FrameCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::EncodeAudio(cmd) => cmd,
            Commands::DecodeAudio(cmd) => cmd,
            Commands::EncodeImage(cmd) => cmd,
            Commands::DecodeImage(cmd) => cmd,
            Commands::Capacity(cmd) => cmd,
            Commands::Frame(cmd) => cmd,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    cli.command.executor().execute()
}
