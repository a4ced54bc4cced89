//! Visual channel: one bit per color channel, in the least significant bit.
//!
//! Pixels are walked in row-major order and each pixel's red, green and blue
//! channels are visited in that order. Only lossless formats keep the
//! payload intact.

pub mod carrier;
mod lsb;

use thiserror::Error;

pub use carrier::{ImageCarrier, ImageCarrierError};
pub use lsb::{capacity_bits, capacity_bytes, embed, extract, CHANNELS_PER_PIXEL};

/// Errors raised by the visual embedder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VisualError {
    #[error("Payload needs {needed_bits} bits but the image holds only {capacity_bits}")]
    CapacityExceeded {
        needed_bits: usize,
        capacity_bits: usize,
    },
}
