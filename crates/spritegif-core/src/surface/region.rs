//! Region operations
//!
//! Rectangular fills, clears, copies and crops. Every operation clips
//! against the surface bounds, so callers may pass rectangles that hang
//! partially (or entirely) outside the surface.

use super::{Surface, SurfaceMut};
use crate::color;
use crate::error::{Error, Result};
use crate::rect::Rect;

/// How source pixels are written during a blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlitMode {
    /// Replace destination pixels, including with transparent source pixels
    #[default]
    Overwrite,
    /// Leave destination pixels untouched where the source alpha is 0
    SkipTransparent,
}

impl SurfaceMut {
    /// Set every pixel to `pixel`.
    pub fn fill(&mut self, pixel: u32) {
        self.data_mut().fill(pixel);
    }

    /// Set every pixel inside `rect` to `pixel`.
    pub fn fill_rect(&mut self, rect: &Rect, pixel: u32) {
        let Some(r) = rect.clip_to(self.width(), self.height()) else {
            return;
        };
        for y in r.y..r.bottom() {
            let row = self.row_data_mut(y as u32);
            row[r.x as usize..r.right() as usize].fill(pixel);
        }
    }

    /// Clear the pixels inside `rect` to transparent.
    pub fn clear_rect(&mut self, rect: &Rect) {
        self.fill_rect(rect, color::TRANSPARENT);
    }

    /// Copy all of `src` with its top-left corner at `(dx, dy)`.
    pub fn blit(&mut self, src: &Surface, dx: i32, dy: i32, mode: BlitMode) {
        let full = Rect::from_size(src.width(), src.height());
        self.blit_region(src, &full, dx, dy, mode);
    }

    /// Copy `src_rect` of `src` with its top-left corner at `(dx, dy)`.
    ///
    /// Pixels are copied 1:1 (nearest-neighbor, no smoothing).
    pub fn blit_region(&mut self, src: &Surface, src_rect: &Rect, dx: i32, dy: i32, mode: BlitMode) {
        let Some(clipped) = src_rect.clip_to(src.width(), src.height()) else {
            return;
        };
        let dx = dx + (clipped.x - src_rect.x);
        let dy = dy + (clipped.y - src_rect.y);
        let target = Rect::new_unchecked(dx, dy, clipped.w, clipped.h);
        let Some(dst) = target.clip_to(self.width(), self.height()) else {
            return;
        };

        let sx0 = (clipped.x + (dst.x - dx)) as usize;
        let w = dst.w as usize;
        for y in dst.y..dst.bottom() {
            let sy = (clipped.y + (y - dy)) as u32;
            let src_row = &src.row_data(sy)[sx0..sx0 + w];
            let dst_row = &mut self.row_data_mut(y as u32)[dst.x as usize..dst.x as usize + w];
            match mode {
                BlitMode::Overwrite => dst_row.copy_from_slice(src_row),
                BlitMode::SkipTransparent => {
                    for (d, &s) in dst_row.iter_mut().zip(src_row) {
                        if color::alpha(s) != 0 {
                            *d = s;
                        }
                    }
                }
            }
        }
    }
}

impl Surface {
    /// Extract the sub-image `(x, y, w, h)` as a new surface.
    ///
    /// The rectangle is clipped to the surface first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if nothing of the rectangle lies
    /// inside the surface.
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Surface> {
        let requested = Rect::new_unchecked(x as i32, y as i32, w as i32, h as i32);
        let r = requested
            .clip_to(self.width(), self.height())
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "clip rectangle ({x}, {y}, {w}x{h}) outside {}x{} surface",
                    self.width(),
                    self.height()
                ))
            })?;
        let mut out = SurfaceMut::new(r.w as u32, r.h as u32)?;
        out.blit_region(self, &r, 0, 0, BlitMode::Overwrite);
        Ok(out.into())
    }
}
