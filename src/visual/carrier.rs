//! Image carrier files for the visual channel.
//!
//! Any readable raster is converted to RGB8 on load. Output is restricted to
//! lossless formats (PNG, BMP), since recompression destroys the LSBs.

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Formats that keep every pixel value intact.
const LOSSLESS_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Bmp];

/// Errors that can occur while reading or writing image carriers.
#[derive(Error, Debug)]
pub enum ImageCarrierError {
    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("Unsupported output format for {path}: only PNG and BMP keep pixel values intact")]
    UnsupportedFormat { path: String },
}

/// An RGB8 pixel buffer loaded from or destined for a lossless file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCarrier {
    pixels: RgbImage,
}

impl ImageCarrier {
    /// Loads an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImageCarrierError> {
        let image =
            image::open(path).map_err(|e| ImageCarrierError::ImageLoadError(e.to_string()))?;
        Ok(Self::from_image(image))
    }

    /// Loads an image held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageCarrierError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ImageCarrierError::ImageLoadError(e.to_string()))?;
        Ok(Self::from_image(image))
    }

    /// Converts a decoded image to RGB8. Alpha is dropped.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            pixels: image.to_rgb8(),
        }
    }

    /// Wraps an RGB pixel buffer.
    pub fn from_pixels(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Saves the image, choosing the format from the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageCarrierError> {
        let path = path.as_ref();
        let format = lossless_format_for(path)?;
        self.pixels
            .save_with_format(path, format)
            .map_err(|e| ImageCarrierError::ImageSaveError(e.to_string()))
    }

    /// Returns the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ImageCarrierError> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ImageCarrierError::ImageSaveError(e.to_string()))?;
        Ok(bytes)
    }

    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// The pixel buffer.
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Resolves the output format of `path`, rejecting lossy or unknown ones.
pub fn lossless_format_for(path: &Path) -> Result<ImageFormat, ImageCarrierError> {
    match ImageFormat::from_path(path) {
        Ok(format) if LOSSLESS_FORMATS.contains(&format) => Ok(format),
        _ => Err(ImageCarrierError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}
