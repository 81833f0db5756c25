//! spritegif core - Basic data structures for sprite-sheet and GIF processing
//!
//! This crate provides the fundamental data structures used throughout
//! the spritegif workspace:
//!
//! - [`Surface`] / [`SurfaceMut`] - The RGBA pixel container (immutable / mutable)
//! - [`Rect`] - Rectangle regions (GIF patches, sprite cells)
//! - [`Frame`] - One composited or sliced animation frame
//! - [`FrameSet`] - Ordered frames with a discard index and active subset
//! - [`Color`] - RGBA color used for fills and overlays

pub mod error;
pub mod frame;
pub mod frameset;
pub mod rect;
pub mod surface;

pub use error::{Error, Result};
pub use frame::{
    DEFAULT_DECODE_DELAY_MS, Frame, MIN_DECODE_DELAY_MS, MIN_PLAYBACK_DELAY_MS, decode_delay_ms,
    fps_interval_ms,
};
pub use frameset::FrameSet;
pub use rect::Rect;
pub use surface::{BlitMode, Color, Surface, SurfaceMut};

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Fully transparent black
    pub const TRANSPARENT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Relative luminance with Rec. 601 weights, in `[0, 255]`.
    #[inline]
    pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
        0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
    }

    /// HSV color values.
    ///
    /// Ranges: h [0..239] (h=240 wraps to 0), s [0..255], v [0..255].
    ///
    /// Hue correspondence:
    /// - 0: red
    /// - 40: yellow
    /// - 80: green
    /// - 120: cyan
    /// - 160: blue
    /// - 200: magenta
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Hsv {
        pub h: i32,
        pub s: i32,
        pub v: i32,
    }

    /// Convert RGB to HSV color space.
    pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
        let ri = r as i32;
        let gi = g as i32;
        let bi = b as i32;

        let min = ri.min(gi).min(bi);
        let max = ri.max(gi).max(bi);
        let delta = max - min;

        let v = max;
        if delta == 0 {
            return Hsv { h: 0, s: 0, v };
        }

        let s = (255.0 * delta as f32 / max as f32 + 0.5) as i32;
        let h_raw = if ri == max {
            (gi - bi) as f32 / delta as f32
        } else if gi == max {
            2.0 + (bi - ri) as f32 / delta as f32
        } else {
            4.0 + (ri - gi) as f32 / delta as f32
        };

        let mut h = h_raw * 40.0;
        if h < 0.0 {
            h += 240.0;
        }
        if h >= 239.5 {
            h = 0.0;
        }
        let h = (h + 0.5) as i32;

        Hsv { h, s, v }
    }

}
