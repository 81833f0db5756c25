//! spritegif color - Global palettes for GIF encoding
//!
//! This crate builds and applies the single palette shared by every frame
//! of an encoded animation:
//!
//! - **Sampling and quantization** ([`quantize`]): merge pixel samples across
//!   frames, reduce them to at most 256 colors with median cut
//! - **Palette mapping** ([`palette`]): nearest-color index assignment,
//!   indexed-to-RGBA conversion, display ordering by luminance or hue

pub mod error;
pub mod palette;
pub mod quantize;

// Re-export core types
pub use spritegif_core;

pub use error::{ColorError, ColorResult};
pub use palette::{DisplayColor, IndexedImage, Palette, color_distance};
pub use quantize::{
    MAX_PALETTE_COLORS, MIN_PALETTE_COLORS, MedianCutQuantizer, Quantizer, SampleOptions,
    check_max_colors, collect_samples, has_transparent_pixels,
};
