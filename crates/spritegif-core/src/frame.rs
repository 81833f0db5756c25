//! Animation frames and delay rules

use crate::surface::Surface;

/// Lower bound for decoded and encoded frame delays, in milliseconds
pub const MIN_DECODE_DELAY_MS: u32 = 20;

/// Delay used when a GIF frame carries no (or a zero) delay
pub const DEFAULT_DECODE_DELAY_MS: u32 = 80;

/// Lower bound for synthetic playback intervals, in milliseconds
pub const MIN_PLAYBACK_DELAY_MS: u32 = 30;

/// One animation frame
///
/// `source_index` is the frame's position in the sequence it was decoded
/// or sliced from. It never changes, so it identifies the frame across
/// discard/restore and sheet cell mapping.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Position in the originating sequence
    pub source_index: usize,
    /// Full-size frame pixels
    pub pixels: Surface,
    /// Display duration in milliseconds
    pub delay_ms: u32,
}

impl Frame {
    /// Create a frame, flooring `delay_ms` at [`MIN_DECODE_DELAY_MS`].
    pub fn new(source_index: usize, pixels: Surface, delay_ms: u32) -> Self {
        Self {
            source_index,
            pixels,
            delay_ms: delay_ms.max(MIN_DECODE_DELAY_MS),
        }
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Copy of this frame whose pixels share nothing with the original.
    pub fn deep_clone(&self) -> Self {
        Self {
            source_index: self.source_index,
            pixels: self.pixels.deep_clone(),
            delay_ms: self.delay_ms,
        }
    }
}

/// Convert a GIF delay in centiseconds to milliseconds.
///
/// Missing or zero delays become [`DEFAULT_DECODE_DELAY_MS`]; the result is
/// never below [`MIN_DECODE_DELAY_MS`].
///
/// # Examples
///
/// ```
/// use spritegif_core::decode_delay_ms;
///
/// assert_eq!(decode_delay_ms(Some(5)), 50);
/// assert_eq!(decode_delay_ms(Some(1)), 20);
/// assert_eq!(decode_delay_ms(None), 80);
/// ```
pub fn decode_delay_ms(delay_centiseconds: Option<u16>) -> u32 {
    let ms = match delay_centiseconds {
        Some(cs) if cs > 0 => cs as u32 * 10,
        _ => DEFAULT_DECODE_DELAY_MS,
    };
    ms.max(MIN_DECODE_DELAY_MS)
}

/// Interval in milliseconds for a fixed frame rate, floored at `floor_ms`.
///
/// A non-finite or non-positive `fps` yields `floor_ms`.
pub fn fps_interval_ms(fps: f32, floor_ms: u32) -> u32 {
    if !fps.is_finite() || fps <= 0.0 {
        return floor_ms;
    }
    let ms = (1000.0 / fps).round();
    if ms >= u32::MAX as f32 {
        return u32::MAX;
    }
    (ms as u32).max(floor_ms)
}
