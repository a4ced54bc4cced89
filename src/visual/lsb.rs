//! LSB embedding and extraction over RGB pixel buffers.

use image::RgbImage;
use tracing::debug;

use super::VisualError;
use crate::frame::{Bit, Bitstream, BITS_PER_BYTE};

/// Color channels carrying data in each pixel.
pub const CHANNELS_PER_PIXEL: usize = 3;

/// Number of bits the image can carry.
pub fn capacity_bits(pixels: &RgbImage) -> usize {
    pixels.pixels().len() * CHANNELS_PER_PIXEL
}

/// Largest text payload (no reserved bytes) that fits with its sentinel.
pub fn capacity_bytes(pixels: &RgbImage) -> usize {
    (capacity_bits(pixels) / BITS_PER_BYTE).saturating_sub(1)
}

/// Writes `bits` into the channel LSBs and returns the new image.
///
/// The higher seven bits of every channel are preserved, and channels past
/// the last bit are copied unchanged. Fails without writing anything when
/// the image is too small.
pub fn embed(pixels: &RgbImage, bits: &[Bit]) -> Result<RgbImage, VisualError> {
    let capacity = capacity_bits(pixels);
    if bits.len() > capacity {
        return Err(VisualError::CapacityExceeded {
            needed_bits: bits.len(),
            capacity_bits: capacity,
        });
    }

    let mut output = pixels.clone();
    let channels = output.pixels_mut().flat_map(|pixel| pixel.0.iter_mut());
    for (channel, bit) in channels.zip(bits) {
        *channel = (*channel & 0xFE) | bit.as_u8();
    }

    debug!(
        bits = bits.len(),
        capacity_bits = capacity,
        "embedded bitstream"
    );

    Ok(output)
}

/// Reads the LSB of every channel in scan order.
///
/// Always consumes the whole image; the framer finds the sentinel later.
pub fn extract(pixels: &RgbImage) -> Bitstream {
    pixels
        .pixels()
        .flat_map(|pixel| pixel.0.iter())
        .map(|&channel| Bit::from_lsb(channel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{frame, unframe};
    use image::{ImageBuffer, Rgb};

    fn create_test_image(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        })
    }

    #[test]
    fn test_capacity() {
        let image = create_test_image(100, 100);
        assert_eq!(capacity_bits(&image), 30_000);
        assert_eq!(capacity_bytes(&image), 3749);
    }

    #[test]
    fn test_embed_and_extract() {
        let image = create_test_image(100, 100);
        let payload = br#"{"tx":"0xbeefdead","node":"WhisperNode-07"}"#;
        let bits = frame(payload);

        let stego = embed(&image, &bits).unwrap();
        let extracted = extract(&stego);

        assert_eq!(extracted.len(), capacity_bits(&image));
        assert_eq!(&extracted[..bits.len()], &bits[..]);
        assert_eq!(unframe(&extracted).bytes, payload);
    }

    #[test]
    fn test_only_lsb_changes() {
        let image = create_test_image(20, 20);
        let bits = frame(b"lsb only");
        let stego = embed(&image, &bits).unwrap();

        for (before, after) in image.pixels().zip(stego.pixels()) {
            for channel in 0..3 {
                assert_eq!(before.0[channel] & 0xFE, after.0[channel] & 0xFE);
            }
        }
    }

    #[test]
    fn test_channels_past_payload_untouched() {
        let image = create_test_image(10, 10);
        let bits = frame(b"A");
        let stego = embed(&image, &bits).unwrap();

        let before: Vec<u8> = image.pixels().flat_map(|p| p.0).collect();
        let after: Vec<u8> = stego.pixels().flat_map(|p| p.0).collect();
        assert_eq!(&before[bits.len()..], &after[bits.len()..]);
    }

    #[test]
    fn test_source_buffer_not_modified() {
        let image = create_test_image(10, 10);
        let copy = image.clone();
        let _ = embed(&image, &frame(b"xyz")).unwrap();
        assert_eq!(image, copy);
    }

    #[test]
    fn test_exact_capacity_fits() {
        let image = create_test_image(4, 2);
        let bits = vec![Bit::One; 24];
        let stego = embed(&image, &bits).unwrap();
        assert!(stego.pixels().all(|p| p.0.iter().all(|c| c & 1 == 1)));
    }

    #[test]
    fn test_one_bit_over_capacity_fails() {
        let image = create_test_image(4, 2);
        let bits = vec![Bit::Zero; 25];
        let result = embed(&image, &bits);
        assert_eq!(
            result,
            Err(VisualError::CapacityExceeded {
                needed_bits: 25,
                capacity_bits: 24
            })
        );
    }

    #[test]
    fn test_empty_image_extracts_nothing() {
        let image = RgbImage::new(0, 0);
        assert!(extract(&image).is_empty());
        assert_eq!(capacity_bytes(&image), 0);
    }
}
