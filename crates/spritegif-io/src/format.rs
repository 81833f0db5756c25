//! Image format detection
//!
//! Detects image formats by examining magic numbers in the header, and
//! loads a still image from whichever supported format the bytes hold.

use crate::{IoError, IoResult};
use spritegif_core::Surface;

/// Image formats the io crate understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Gif,
}

impl ImageFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
        }
    }
}

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// GIF87a
    pub const GIF87A: &[u8] = b"GIF87a";

    /// GIF89a
    pub const GIF89A: &[u8] = b"GIF89a";
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A) {
        return Ok(ImageFormat::Gif);
    }
    Err(IoError::UnsupportedFormat(
        "unrecognized image header".to_string(),
    ))
}

/// Load a still image from memory.
///
/// PNG data is decoded directly; for GIF data the first composited frame
/// is returned.
pub fn read_image_bytes(data: &[u8]) -> IoResult<Surface> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_png_bytes(data),
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => crate::gif::decode_gif(data)?
            .into_iter()
            .next()
            .map(|f| f.pixels)
            .ok_or(IoError::NoFrames),
        #[allow(unreachable_patterns)]
        format => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            format
        ))),
    }
}
