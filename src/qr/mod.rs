//! QR rendering for payloads moving through the acoustic channel.
//!
//! A payload carried as audio can also be shown as a QR code, either before
//! it is modulated or after it is recovered.

mod generator;

pub use generator::{generate_qr, generate_qr_to_file, QrConfig, QrError, QrFormat, QrOutput};
