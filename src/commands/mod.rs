//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.
//! Commands are thin wrappers: they load carriers, call the library pipelines
//! and print the outcome.

mod capacity;
mod decode_audio;
mod decode_image;
mod encode_audio;
mod encode_image;
mod frame;

pub use capacity::CapacityCommand;
pub use decode_audio::DecodeAudioCommand;
pub use decode_image::DecodeImageCommand;
pub use encode_audio::EncodeAudioCommand;
pub use encode_image::EncodeImageCommand;
pub use frame::FrameCommand;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use whisper_codec::{decode_payload, CodecConfig, JsonAdapter, PayloadAdapter, PayloadOutcome};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Resolves the payload bytes for an encode command.
///
/// `payload` is the JSON text itself, or a path when `from_file` is set.
/// Unless `raw` is set, the text must be JSON and is re-serialized compactly,
/// keeping object keys in input order.
pub(crate) fn load_payload(payload: &str, from_file: bool, raw: bool) -> Result<Vec<u8>> {
    let bytes = if from_file {
        std::fs::read(payload).with_context(|| format!("Failed to read payload file {}", payload))?
    } else {
        payload.as_bytes().to_vec()
    };

    if raw {
        return Ok(bytes);
    }

    let adapter = JsonAdapter;
    let text = std::str::from_utf8(&bytes).context("Payload is not UTF-8 text (use --raw)")?;
    let value = adapter
        .parse_text(text)
        .context("Payload is not valid JSON (use --raw to send it as-is)")?;
    Ok(adapter.serialize(&value)?)
}

/// Loads the configuration file, or the defaults.
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<CodecConfig> {
    CodecConfig::load_or_default(path.map(PathBuf::as_path))
        .with_context(|| match path {
            Some(p) => format!("Failed to load config from {}", p.display()),
            None => "Invalid default configuration".to_string(),
        })
}

/// Prints or writes recovered bytes.
///
/// Fails when nothing was recovered or when the bytes are not JSON (unless
/// `raw`). In the second case the raw bytes are shown first.
pub(crate) fn report_payload(bytes: &[u8], raw: bool, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        println!("Recovered payload written to: {}", path.display());
        println!("  Size: {} bytes", bytes.len());
    }

    if bytes.is_empty() {
        bail!("No payload recovered");
    }

    if raw {
        if output.is_none() {
            println!("{}", String::from_utf8_lossy(bytes));
        }
        return Ok(());
    }

    let adapter = JsonAdapter;
    match decode_payload(&adapter, bytes) {
        PayloadOutcome::Parsed(value) => {
            if output.is_none() {
                println!("{}", adapter.pretty(&value));
            }
            Ok(())
        }
        PayloadOutcome::Unparsed { raw, error } => {
            eprintln!("Recovered bytes are not valid JSON:");
            eprintln!("{}", String::from_utf8_lossy(&raw));
            Err(error).context("Failed to decode payload")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_payload_keeps_key_order() {
        let bytes = load_payload(r#"{ "tx": "0xbeef", "block": 7, "amount": 1 }"#, false, false)
            .unwrap();
        assert_eq!(bytes, br#"{"tx":"0xbeef","block":7,"amount":1}"#);
    }

    #[test]
    fn test_load_payload_rejects_non_json_unless_raw() {
        assert!(load_payload("THR-QR::plain", false, false).is_err());
        assert_eq!(load_payload("THR-QR::plain", false, true).unwrap(), b"THR-QR::plain");
    }

    #[test]
    fn test_load_payload_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        std::fs::write(&path, [0x00, 0xFF, 0x41]).unwrap();

        let bytes = load_payload(path.to_str().unwrap(), true, true).unwrap();
        assert_eq!(bytes, [0x00, 0xFF, 0x41]);
        assert!(load_payload(path.to_str().unwrap(), true, false).is_err());
    }

    #[test]
    fn test_report_empty_payload_fails() {
        assert!(report_payload(b"", false, None).is_err());
        assert!(report_payload(b"", true, None).is_err());
    }

    #[test]
    fn test_report_empty_payload_still_writes_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recovered.bin");

        assert!(report_payload(b"", true, Some(path.as_path())).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn test_report_non_json_fails_unless_raw() {
        assert!(report_payload(b"THR-QR::plain", false, None).is_err());
        assert!(report_payload(b"THR-QR::plain", true, None).is_ok());
    }

    #[test]
    fn test_report_non_json_writes_output_before_failing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recovered.bin");

        assert!(report_payload(b"THR-QR::plain", false, Some(path.as_path())).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"THR-QR::plain");
    }

    #[test]
    fn test_report_json_succeeds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recovered.json");

        assert!(report_payload(br#"{"tx":"0xbeef"}"#, false, None).is_ok());
        assert!(report_payload(br#"{"tx":"0xbeef"}"#, false, Some(path.as_path())).is_ok());
        assert_eq!(std::fs::read(&path).unwrap(), br#"{"tx":"0xbeef"}"#);
    }
}
