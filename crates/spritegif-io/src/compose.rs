//! Animated GIF frame compositing
//!
//! GIF frames are patches drawn onto a persistent canvas, each followed by
//! a disposal step that decides what the next frame starts from. The
//! [`Compositor`] replays that process and captures the full canvas after
//! every patch, so each output [`Frame`] stands on its own.
//!
//! The compositor works on the parsed [`RawGif`] model and does not depend
//! on any GIF codec.

use crate::{IoError, IoResult};
use spritegif_core::{BlitMode, Frame, Rect, Surface, SurfaceMut, decode_delay_ms};

/// What happens to a frame's patch area after the frame is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposal {
    /// Code 0: no disposal specified; treated like [`Disposal::Keep`]
    #[default]
    Unspecified,
    /// Code 1: leave the canvas as drawn
    Keep,
    /// Code 2: clear the patch rectangle to transparent
    RestoreBackground,
    /// Code 3: put back the canvas as it was before the patch
    RestorePrevious,
}

impl Disposal {
    /// Map a GIF disposal code; unknown codes behave like `Unspecified`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Keep,
            2 => Self::RestoreBackground,
            3 => Self::RestorePrevious,
            _ => Self::Unspecified,
        }
    }
}

/// Position and size of a frame patch on the logical screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl PatchRect {
    fn to_rect(self) -> Rect {
        Rect::new_unchecked(
            self.left as i32,
            self.top as i32,
            self.width as i32,
            self.height as i32,
        )
    }
}

/// One parsed GIF frame
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// RGBA patch pixels, `width * height * 4` bytes
    pub patch: Vec<u8>,
    pub rect: PatchRect,
    pub disposal: Disposal,
    /// Frame delay as stored in the file
    pub delay_centiseconds: Option<u16>,
}

/// A parsed animated GIF
#[derive(Debug, Clone)]
pub struct RawGif {
    pub screen_width: u32,
    pub screen_height: u32,
    pub frames: Vec<RawFrame>,
}

/// How transparent patch pixels are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchTransparency {
    /// Patch pixels replace canvas pixels, transparent ones included
    #[default]
    Overwrite,
    /// Canvas pixels under fully transparent patch pixels are kept
    Skip,
}

/// Options for frame compositing
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    pub transparent_patch: PatchTransparency,
}

/// Stateful canvas that turns GIF patches into full frames
///
/// A compositor belongs to a single decode; create a new one per GIF.
#[derive(Debug)]
pub struct Compositor {
    canvas: SurfaceMut,
    options: ComposeOptions,
}

impl Compositor {
    /// Create a compositor with a transparent `width x height` canvas.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::EmptyCanvas`] if either dimension is zero.
    pub fn new(width: u32, height: u32, options: ComposeOptions) -> IoResult<Self> {
        if width == 0 || height == 0 {
            return Err(IoError::EmptyCanvas { width, height });
        }
        Ok(Self {
            canvas: SurfaceMut::new(width, height)?,
            options,
        })
    }

    /// Current canvas contents
    pub fn canvas(&self) -> Surface {
        self.canvas.snapshot()
    }

    /// Draw `raw` as input frame `index` and return the captured frame.
    ///
    /// Frames with a zero-sized patch or a patch buffer shorter than
    /// `width * height * 4` are skipped: `None` is returned and the canvas
    /// is left untouched.
    pub fn push(&mut self, index: usize, raw: &RawFrame) -> IoResult<Option<Frame>> {
        let PatchRect { width, height, .. } = raw.rect;
        if width == 0 || height == 0 {
            log::warn!("skipping frame {index}: empty {width}x{height} patch");
            return Ok(None);
        }
        let needed = width as usize * height as usize * 4;
        if raw.patch.len() < needed {
            log::warn!(
                "skipping frame {index}: patch has {} bytes, {width}x{height} needs {needed}",
                raw.patch.len()
            );
            return Ok(None);
        }

        let snapshot = match raw.disposal {
            Disposal::RestorePrevious => Some(self.canvas.snapshot()),
            _ => None,
        };

        let patch = Surface::from_rgba_bytes(width, height, &raw.patch[..needed])?;
        let mode = match self.options.transparent_patch {
            PatchTransparency::Overwrite => BlitMode::Overwrite,
            PatchTransparency::Skip => BlitMode::SkipTransparent,
        };
        let rect = raw.rect.to_rect();
        self.canvas.blit(&patch, rect.x, rect.y, mode);

        let frame = Frame::new(
            index,
            self.canvas.snapshot(),
            decode_delay_ms(raw.delay_centiseconds),
        );
        log::trace!(
            "frame {index}: {width}x{height} patch at ({}, {}), {:?}, {} ms",
            rect.x,
            rect.y,
            raw.disposal,
            frame.delay_ms
        );

        match raw.disposal {
            Disposal::RestoreBackground => self.canvas.clear_rect(&rect),
            Disposal::RestorePrevious => {
                if let Some(previous) = snapshot {
                    self.canvas = previous.into_mut();
                }
            }
            Disposal::Unspecified | Disposal::Keep => {}
        }

        Ok(Some(frame))
    }
}

/// Composite every frame of `gif` into full-size frames.
///
/// # Errors
///
/// Returns [`IoError::EmptyCanvas`] for a zero-sized screen and
/// [`IoError::NoFrames`] if no frame survives.
pub fn compose_frames(gif: &RawGif, options: &ComposeOptions) -> IoResult<Vec<Frame>> {
    let mut compositor = Compositor::new(gif.screen_width, gif.screen_height, options.clone())?;
    let mut frames = Vec::with_capacity(gif.frames.len());
    for (i, raw) in gif.frames.iter().enumerate() {
        if let Some(frame) = compositor.push(i, raw)? {
            frames.push(frame);
        }
    }
    if frames.is_empty() {
        return Err(IoError::NoFrames);
    }
    log::debug!(
        "composited {} of {} frames on {}x{} canvas",
        frames.len(),
        gif.frames.len(),
        gif.screen_width,
        gif.screen_height
    );
    Ok(frames)
}
