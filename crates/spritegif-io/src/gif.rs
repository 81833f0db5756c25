//! GIF format support
//!
//! Reading parses every frame of an animated GIF into the codec-neutral
//! [`RawGif`] model (RGBA patches plus disposal and delay) and hands it to
//! the compositor. Writing encodes palette-indexed frames that share one
//! global palette.

use crate::compose::{ComposeOptions, Disposal, PatchRect, RawFrame, RawGif, compose_frames};
use crate::{IoError, IoResult};
use gif::{ColorOutput, DecodeOptions, DisposalMethod, Encoder};
use spritegif_color::{IndexedImage, Palette};
use spritegif_core::{Frame, MIN_DECODE_DELAY_MS};
use std::io::{Read, Write};

/// Parse a GIF stream into its logical screen and raw frames.
///
/// Patches are expanded to RGBA; pixels using the frame's transparent
/// index get alpha 0.
pub fn read_gif_stream<R: Read>(reader: R) -> IoResult<RawGif> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::RGBA);

    let mut decoder = options
        .read_info(reader)
        .map_err(|e| IoError::DecodeError(format!("GIF decode error: {}", e)))?;

    let screen_width = decoder.width() as u32;
    let screen_height = decoder.height() as u32;

    let mut frames = Vec::new();
    while let Some(frame) = decoder
        .read_next_frame()
        .map_err(|e| IoError::DecodeError(format!("GIF frame error: {}", e)))?
    {
        let disposal = match frame.dispose {
            DisposalMethod::Keep => Disposal::Keep,
            DisposalMethod::Background => Disposal::RestoreBackground,
            DisposalMethod::Previous => Disposal::RestorePrevious,
            _ => Disposal::Unspecified,
        };
        frames.push(RawFrame {
            patch: frame.buffer.to_vec(),
            rect: PatchRect {
                left: frame.left as u32,
                top: frame.top as u32,
                width: frame.width as u32,
                height: frame.height as u32,
            },
            disposal,
            delay_centiseconds: Some(frame.delay),
        });
    }

    log::debug!(
        "parsed GIF: {screen_width}x{screen_height} screen, {} frames",
        frames.len()
    );

    Ok(RawGif {
        screen_width,
        screen_height,
        frames,
    })
}

/// Decode an animated GIF into full-size composited frames.
pub fn decode_gif(bytes: &[u8]) -> IoResult<Vec<Frame>> {
    decode_gif_with(bytes, &ComposeOptions::default())
}

/// Decode an animated GIF with explicit compositing options.
pub fn decode_gif_with(bytes: &[u8], options: &ComposeOptions) -> IoResult<Vec<Frame>> {
    let raw = read_gif_stream(bytes)?;
    compose_frames(&raw, options)
}

/// Animation loop behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Loop forever
    #[default]
    Infinite,
    /// Play the animation this many extra times
    Finite(u16),
}

impl From<Repeat> for gif::Repeat {
    fn from(r: Repeat) -> Self {
        match r {
            Repeat::Infinite => gif::Repeat::Infinite,
            Repeat::Finite(n) => gif::Repeat::Finite(n),
        }
    }
}

/// Options for [`write_gif_animation`]
#[derive(Debug, Clone, Default)]
pub struct GifWriteOptions {
    pub repeat: Repeat,
    /// Palette index treated as transparent. Falls back to the palette's
    /// reserved transparent entry when `None`.
    pub transparent_index: Option<u8>,
}

/// One palette-indexed frame to encode
#[derive(Debug, Clone)]
pub struct EncodeFrame {
    /// One palette index per pixel, row-major
    pub indices: Vec<u8>,
    pub delay_ms: u32,
}

impl EncodeFrame {
    /// Wrap an indexed image with a display delay
    pub fn from_indexed(image: IndexedImage, delay_ms: u32) -> Self {
        Self {
            indices: image.indices,
            delay_ms,
        }
    }
}

/// Convert a delay to GIF centiseconds, flooring at 20 ms and rounding.
///
/// # Examples
///
/// ```
/// use spritegif_io::delay_centiseconds;
///
/// assert_eq!(delay_centiseconds(83), 8);
/// assert_eq!(delay_centiseconds(85), 9);
/// assert_eq!(delay_centiseconds(5), 2);
/// ```
pub fn delay_centiseconds(delay_ms: u32) -> u16 {
    let ms = delay_ms.max(MIN_DECODE_DELAY_MS);
    (ms.saturating_add(5) / 10).min(u16::MAX as u32) as u16
}

/// Global palette bytes padded with black to a power-of-two entry count.
fn padded_palette(palette: &Palette) -> Vec<u8> {
    let size = palette.len().next_power_of_two().max(2);
    let mut bytes = Vec::with_capacity(size * 3);
    for c in palette.colors() {
        bytes.extend_from_slice(c);
    }
    bytes.resize(size * 3, 0);
    bytes
}

/// Write an animated GIF of `frames` sharing one global `palette`.
///
/// Every frame covers the whole `width x height` screen. When a transparent
/// index is in effect, frames use background disposal so transparent
/// regions do not show the previous frame.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] for an empty frame list, a screen size
/// GIF cannot represent, or any encoder failure, and
/// [`IoError::InvalidData`] if a frame's index count does not match the
/// screen size.
pub fn write_gif_animation<W: Write>(
    frames: &[EncodeFrame],
    palette: &Palette,
    width: u32,
    height: u32,
    options: &GifWriteOptions,
    writer: W,
) -> IoResult<()> {
    if frames.is_empty() {
        return Err(IoError::EncodeError("no frames to encode".to_string()));
    }
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "{width}x{height} is not a valid GIF screen size"
            )));
        }
    };
    let expected = width as usize * height as usize;
    if let Some((i, f)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| f.indices.len() != expected)
    {
        return Err(IoError::InvalidData(format!(
            "frame {i} has {} indices, expected {expected}",
            f.indices.len()
        )));
    }

    let global = padded_palette(palette);
    let mut encoder = Encoder::new(writer, w, h, &global)
        .map_err(|e| IoError::EncodeError(format!("GIF encoder error: {}", e)))?;
    encoder
        .set_repeat(options.repeat.into())
        .map_err(|e| IoError::EncodeError(format!("GIF repeat error: {}", e)))?;

    let transparent = options.transparent_index.or(palette.transparent_index());

    for f in frames {
        let mut frame = gif::Frame::from_indexed_pixels(w, h, f.indices.clone(), transparent);
        frame.palette = None; // Use global palette
        frame.delay = delay_centiseconds(f.delay_ms);
        if transparent.is_some() {
            frame.dispose = DisposalMethod::Background;
        }
        encoder
            .write_frame(&frame)
            .map_err(|e| IoError::EncodeError(format!("GIF frame write error: {}", e)))?;
    }

    log::debug!(
        "encoded {} frames at {width}x{height}, {} palette entries",
        frames.len(),
        palette.len()
    );
    Ok(())
}
