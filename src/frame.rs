//! Bit framing shared by the acoustic and visual channels.
//!
//! A payload is expanded byte by byte, most significant bit first, and closed
//! by an all-zero sentinel byte. Decoding walks the stream in 8-bit chunks and
//! stops at the first all-zero chunk.
//!
//! The sentinel value is reserved. Payload bytes that collide with it are
//! stuffed before expansion:
//!
//! ```text
//! 0x00 -> 0xFF 0x01
//! 0xFF -> 0xFF 0x02
//! ```
//!
//! `0xFF` cannot appear in UTF-8 and `0x00` cannot appear in JSON text, so a
//! text payload frames to exactly `8 * (len + 1)` bits.

use std::fmt;

use tracing::warn;

/// The reserved terminator byte.
pub const SENTINEL: u8 = 0x00;

/// Escape byte introducing a stuffed reserved value.
pub const ESCAPE: u8 = 0xFF;

const ESCAPED_SENTINEL: u8 = 0x01;
const ESCAPED_ESCAPE: u8 = 0x02;

/// Bits per framed byte.
pub const BITS_PER_BYTE: usize = 8;

/// A single binary symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Returns the least significant bit of `value`.
    pub fn from_lsb(value: u8) -> Self {
        if value & 1 == 1 {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    /// Returns 0 or 1.
    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// Parses a `'0'` or `'1'` character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Ordered sequence of bits carrying a framed payload.
pub type Bitstream = Vec<Bit>;

/// Result of unframing a bitstream.
///
/// Unframing never fails. Noise shows up in the counters instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unframed {
    /// Recovered payload bytes.
    pub bytes: Vec<u8>,
    /// Whether the sentinel was found.
    pub terminated: bool,
    /// Chunks that were skipped because they could not be decoded.
    pub malformed_chunks: usize,
}

impl Unframed {
    /// Returns true if the bytes were recovered without any skipped chunk.
    pub fn is_clean(&self) -> bool {
        self.terminated && self.malformed_chunks == 0
    }
}

/// Frames a payload into a sentinel-terminated bitstream.
pub fn frame(payload: &[u8]) -> Bitstream {
    let stuffed = stuff(payload);
    let mut bits = Vec::with_capacity((stuffed.len() + 1) * BITS_PER_BYTE);

    for byte in stuffed.iter().copied().chain(std::iter::once(SENTINEL)) {
        push_byte(&mut bits, byte);
    }

    bits
}

/// Number of bits `frame(payload)` produces.
pub fn framed_len(payload: &[u8]) -> usize {
    let escapes = payload
        .iter()
        .filter(|&&b| b == SENTINEL || b == ESCAPE)
        .count();
    (payload.len() + escapes + 1) * BITS_PER_BYTE
}

/// Recovers a payload from a bitstream.
///
/// Reads 8-bit chunks until the first all-zero chunk. A trailing chunk shorter
/// than 8 bits is skipped as malformed. If no sentinel is found, whatever was
/// decoded is returned with `terminated == false`.
pub fn unframe(bits: &[Bit]) -> Unframed {
    let chunks = bits.chunks(BITS_PER_BYTE).map(|chunk| {
        if chunk.len() == BITS_PER_BYTE {
            Some(pack_byte(chunk.iter().copied()))
        } else {
            None
        }
    });
    unstuff(chunks)
}

/// Recovers a payload from a textual `'0'`/`'1'` bit string.
///
/// A chunk holding any other character is skipped as malformed.
pub fn unframe_text(text: &str) -> Unframed {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let chunks = chars.chunks(BITS_PER_BYTE).map(|chunk| {
        if chunk.len() != BITS_PER_BYTE {
            return None;
        }
        chunk
            .iter()
            .map(|&c| Bit::from_char(c))
            .collect::<Option<Vec<_>>>()
            .map(|bits| pack_byte(bits.into_iter()))
    });
    unstuff(chunks)
}

/// Renders bits as a `'0'`/`'1'` string.
pub fn bits_to_string(bits: &[Bit]) -> String {
    bits.iter()
        .map(|bit| match bit {
            Bit::Zero => '0',
            Bit::One => '1',
        })
        .collect()
}

fn push_byte(bits: &mut Bitstream, byte: u8) {
    for shift in (0..BITS_PER_BYTE).rev() {
        bits.push(Bit::from_lsb(byte >> shift));
    }
}

fn pack_byte(bits: impl Iterator<Item = Bit>) -> u8 {
    bits.fold(0u8, |acc, bit| (acc << 1) | bit.as_u8())
}

fn stuff(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len());
    for &byte in payload {
        match byte {
            SENTINEL => out.extend_from_slice(&[ESCAPE, ESCAPED_SENTINEL]),
            ESCAPE => out.extend_from_slice(&[ESCAPE, ESCAPED_ESCAPE]),
            other => out.push(other),
        }
    }
    out
}

/// Walks decoded chunks (`None` = malformed), stopping at the sentinel.
fn unstuff(chunks: impl Iterator<Item = Option<u8>>) -> Unframed {
    let mut result = Unframed::default();
    let mut pending_escape = false;

    for chunk in chunks {
        let Some(byte) = chunk else {
            result.malformed_chunks += 1;
            continue;
        };

        if byte == SENTINEL {
            result.terminated = true;
            break;
        }

        if pending_escape {
            pending_escape = false;
            match byte {
                ESCAPED_SENTINEL => result.bytes.push(SENTINEL),
                ESCAPED_ESCAPE => result.bytes.push(ESCAPE),
                _ => {
                    // Unknown escape code: drop the escape and re-read this byte.
                    result.malformed_chunks += 1;
                    if byte == ESCAPE {
                        pending_escape = true;
                    } else {
                        result.bytes.push(byte);
                    }
                }
            }
        } else if byte == ESCAPE {
            pending_escape = true;
        } else {
            result.bytes.push(byte);
        }
    }

    if pending_escape {
        result.malformed_chunks += 1;
    }

    if !result.terminated {
        warn!(
            recovered = result.bytes.len(),
            "bitstream ended before the sentinel byte"
        );
    }

    result
}
