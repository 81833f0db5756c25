//! Sprite sheet slicing
//!
//! The inverse of packing: cut a static sheet into a row-major sequence of
//! frames. Padding is removed from every side of each cell, so slicing is
//! lossless only with zero padding.

use crate::grid::GridLayout;
use crate::SheetResult;
use spritegif_core::{Frame, Surface};

/// Options for [`slice_sheet`]
#[derive(Debug, Clone)]
pub struct SliceOptions {
    /// Number of columns (at least 1)
    pub columns: u32,
    /// Number of rows (at least 1)
    pub rows: u32,
    /// Requested inset on each side of a cell; clamped to keep 1 pixel
    pub padding: u32,
    /// Delay assigned to every frame, floored at 20 ms
    pub delay_ms: u32,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 1,
            padding: 0,
            delay_ms: 100,
        }
    }
}

/// Frames cut from a sheet
#[derive(Debug, Clone)]
pub struct SlicedFrames {
    pub frames: Vec<Frame>,
    pub layout: GridLayout,
    pub frame_width: u32,
    pub frame_height: u32,
}

/// Slice `source` into `columns x rows` frames.
///
/// Frame `row * columns + col` is the cell at `(col, row)`, inset by the
/// effective padding.
///
/// # Errors
///
/// Returns [`crate::SheetError::InvalidGrid`] when the grid gives a zero
/// cell dimension.
pub fn slice_sheet(source: &Surface, options: &SliceOptions) -> SheetResult<SlicedFrames> {
    let layout = GridLayout::for_slice(
        source.width(),
        source.height(),
        options.columns,
        options.rows,
        options.padding,
    )?;
    let (fw, fh) = (layout.frame_width(), layout.frame_height());

    let mut frames = Vec::with_capacity(layout.cell_count());
    for row in 0..layout.rows {
        for col in 0..layout.columns {
            let r = layout.frame_rect(col, row);
            let pixels = source.clip_rectangle(r.x as u32, r.y as u32, fw, fh)?;
            frames.push(Frame::new(layout.index_of(col, row), pixels, options.delay_ms));
        }
    }

    log::debug!(
        "sliced {}x{} source into {} frames of {fw}x{fh} (padding {})",
        source.width(),
        source.height(),
        frames.len(),
        layout.effective_padding
    );

    Ok(SlicedFrames {
        frames,
        layout,
        frame_width: fw,
        frame_height: fh,
    })
}
