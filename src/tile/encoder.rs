//! Tile encoder.
//!
//! Turns cut RGBA tiles into PNG or JPEG bytes.
//!
//! # Design Decisions
//!
//! - **PNG keeps alpha**: tiles are encoded exactly as cut, including any
//!   transparency from the source image.
//!
//! - **JPEG drops alpha**: the JPEG encoder has no alpha channel, so tiles
//!   are flattened to RGB before encoding.
//!
//! - **Quality control**: JPEG quality is configurable, allowing callers to
//!   trade off file size vs image quality. PNG ignores it.

use bytes::Bytes;
use clap::ValueEnum;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder, RgbaImage};
use serde::Serialize;

use crate::error::TileError;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

// =============================================================================
// Tile Format
// =============================================================================

/// Output image format for encoded tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileFormat {
    /// Lossless, keeps transparency
    #[default]
    Png,
    /// Lossy, smaller files, no transparency
    Jpeg,
}

impl TileFormat {
    /// File extension used for tiles in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            TileFormat::Png => "png",
            TileFormat::Jpeg => "jpg",
        }
    }
}

// =============================================================================
// Tile Encoder
// =============================================================================

/// Encoder for cut tiles.
///
/// # Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use travertine::tile::{TileEncoder, TileFormat};
///
/// let tile = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
/// let encoder = TileEncoder::new(TileFormat::Jpeg, 85);
///
/// let bytes = encoder.encode(&tile).unwrap();
/// assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEncoder {
    format: TileFormat,
    quality: u8,
}

impl Default for TileEncoder {
    fn default() -> Self {
        Self::new(TileFormat::default(), DEFAULT_JPEG_QUALITY)
    }
}

impl TileEncoder {
    /// Create an encoder. Quality is clamped to 1-100.
    pub fn new(format: TileFormat, quality: u8) -> Self {
        Self {
            format,
            quality: clamp_quality(quality),
        }
    }

    /// The output format.
    pub fn format(&self) -> TileFormat {
        self.format
    }

    /// The JPEG quality used for encoding.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encode a tile.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::EncodeError`] if the underlying codec fails.
    pub fn encode(&self, tile: &RgbaImage) -> Result<Bytes, TileError> {
        let mut output = Vec::new();

        let result = match self.format {
            TileFormat::Png => PngEncoder::new(&mut output).write_image(
                tile.as_raw(),
                tile.width(),
                tile.height(),
                image::ExtendedColorType::Rgba8,
            ),
            TileFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(tile.clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut output, self.quality).encode_image(&rgb)
            }
        };

        result.map_err(|e| TileError::EncodeError {
            message: e.to_string(),
        })?;

        Ok(Bytes::from(output))
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Validate JPEG quality parameter.
///
/// Returns `true` if quality is in the valid range (1-100).
#[inline]
pub fn is_valid_quality(quality: u8) -> bool {
    (MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&quality)
}

/// Clamp quality to valid range.
#[inline]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
}

// =============================================================================
// Tests
// =============================================================================
