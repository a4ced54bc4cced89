//! QR rendering of payload text.

use image::{DynamicImage, Luma};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during QR code rendering.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR code generation failed: {0}")]
    QrGenerationError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Output format for QR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrFormat {
    /// PNG image (default)
    #[default]
    Png,
    /// SVG vector image
    Svg,
    /// ASCII art (for terminal display)
    Ascii,
}

impl QrFormat {
    /// Picks a format from a file extension: `.svg`, `.txt` or anything else
    /// as PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => QrFormat::Svg,
            Some("txt") => QrFormat::Ascii,
            _ => QrFormat::Png,
        }
    }
}

/// Configuration for QR code generation.
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Error correction level (default: Low, leaves room for long payloads)
    pub ec_level: EcLevel,
    /// Module size in pixels (default: 10)
    pub module_size: u32,
    /// Draw the quiet zone border
    pub quiet_zone: bool,
    /// Output format
    pub format: QrFormat,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::L,
            module_size: 10,
            quiet_zone: true,
            format: QrFormat::Png,
        }
    }
}

/// Output from QR code generation.
pub enum QrOutput {
    /// PNG/image output
    Image(DynamicImage),
    /// SVG string output
    Svg(String),
    /// ASCII art output
    Ascii(String),
}

impl QrOutput {
    /// Returns true if this is an image output.
    pub fn is_image(&self) -> bool {
        matches!(self, QrOutput::Image(_))
    }

    /// Returns the string content (for SVG or ASCII).
    pub fn as_string(&self) -> Option<&str> {
        match self {
            QrOutput::Svg(s) | QrOutput::Ascii(s) => Some(s),
            QrOutput::Image(_) => None,
        }
    }
}

/// Renders payload bytes as a QR code.
///
/// The bytes are stored as-is, so a JSON payload scans back as its text.
pub fn generate_qr(data: &[u8], config: &QrConfig) -> Result<QrOutput, QrError> {
    let qr = QrCode::with_error_correction_level(data, config.ec_level)
        .map_err(|e| QrError::QrGenerationError(e.to_string()))?;

    let output = match config.format {
        QrFormat::Png => {
            let image = qr
                .render::<Luma<u8>>()
                .min_dimensions(100, 100)
                .quiet_zone(config.quiet_zone)
                .module_dimensions(config.module_size, config.module_size)
                .build();

            QrOutput::Image(DynamicImage::ImageLuma8(image))
        }
        QrFormat::Svg => {
            let svg_string = qr
                .render()
                .min_dimensions(200, 200)
                .quiet_zone(config.quiet_zone)
                .dark_color(svg::Color("#000000"))
                .light_color(svg::Color("#ffffff"))
                .build();

            QrOutput::Svg(svg_string)
        }
        QrFormat::Ascii => {
            let ascii = qr
                .render::<char>()
                .quiet_zone(config.quiet_zone)
                .module_dimensions(2, 1)
                .build();

            QrOutput::Ascii(ascii)
        }
    };

    Ok(output)
}

/// Renders a QR code and writes it to `path`.
pub fn generate_qr_to_file<P: AsRef<Path>>(
    data: &[u8],
    path: P,
    config: &QrConfig,
) -> Result<(), QrError> {
    let path = path.as_ref();

    match generate_qr(data, config)? {
        QrOutput::Image(img) => img
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| QrError::ImageSaveError(e.to_string()))?,
        QrOutput::Svg(svg) => std::fs::write(path, svg)?,
        QrOutput::Ascii(ascii) => std::fs::write(path, ascii)?,
    }

    Ok(())
}
