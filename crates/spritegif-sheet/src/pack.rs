//! Sprite sheet packing
//!
//! Arranges frames into a grid sheet, row-major, and records where each
//! frame landed so pointer positions can be mapped back to frames.

use crate::grid::GridLayout;
use crate::{SheetError, SheetResult};
use spritegif_core::{BlitMode, Color, Frame, Rect, Surface, SurfaceMut};

/// What fills the sheet behind and between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Transparent,
    Solid(Color),
}

impl Background {
    fn pixel(&self) -> u32 {
        match self {
            Background::Transparent => spritegif_core::color::TRANSPARENT,
            Background::Solid(c) => c.to_pixel32(),
        }
    }
}

/// Options for [`pack_frames`]
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Number of columns (at least 1)
    pub columns: u32,
    /// Pixels between adjacent cells
    pub padding: u32,
    pub background: Background,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            columns: 4,
            padding: 0,
            background: Background::Transparent,
        }
    }
}

/// Where one frame was placed on a packed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub source_index: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellPosition {
    /// Check whether `(x, y)` lies inside this cell
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect().contains_point(x, y)
    }

    /// The cell as a rectangle
    pub fn rect(&self) -> Rect {
        Rect::new_unchecked(
            self.x as i32,
            self.y as i32,
            self.width as i32,
            self.height as i32,
        )
    }
}

/// A packed sprite sheet and its cell index
#[derive(Debug, Clone)]
pub struct PackedSheet {
    pub sheet: Surface,
    /// One entry per packed frame, in packing order
    pub cells: Vec<CellPosition>,
    pub layout: GridLayout,
}

impl PackedSheet {
    /// Cell containing `(x, y)`, if any
    pub fn hit_test(&self, x: i32, y: i32) -> Option<&CellPosition> {
        hit_test(&self.cells, x, y)
    }

    /// Cell holding the frame with `source_index`
    pub fn cell_for(&self, source_index: usize) -> Option<&CellPosition> {
        self.cells.iter().find(|c| c.source_index == source_index)
    }
}

/// Find the cell containing `(x, y)`.
///
/// Padding gaps, empty trailing cells and points outside the sheet give
/// `None`.
pub fn hit_test(cells: &[CellPosition], x: i32, y: i32) -> Option<&CellPosition> {
    cells.iter().find(|c| c.contains(x, y))
}

/// Pack `frames` into a grid sprite sheet.
///
/// All frames must share one size. The background is filled first, then
/// each frame is copied 1:1 into its cell.
///
/// # Errors
///
/// Returns [`SheetError::InvalidGrid`] if `columns` is zero, `frames` is
/// empty, or the frames differ in size.
pub fn pack_frames(frames: &[Frame], options: &PackOptions) -> SheetResult<PackedSheet> {
    let first = frames
        .first()
        .ok_or_else(|| SheetError::InvalidGrid("no frames to pack".to_string()))?;
    let (fw, fh) = first.dimensions();
    if let Some(odd) = frames.iter().find(|f| f.dimensions() != (fw, fh)) {
        return Err(SheetError::InvalidGrid(format!(
            "frame {} is {}x{}, expected {fw}x{fh}",
            odd.source_index,
            odd.width(),
            odd.height()
        )));
    }

    let layout = GridLayout::for_pack(frames.len(), options.columns, fw, fh, options.padding)?;
    let mut sheet = SurfaceMut::new(layout.total_width(), layout.total_height())?;
    if options.background != Background::Transparent {
        sheet.fill(options.background.pixel());
    }

    let mut cells = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let (col, row) = layout.position_of(i);
        let r = layout.cell_rect(col, row);
        sheet.blit(&frame.pixels, r.x, r.y, BlitMode::Overwrite);
        cells.push(CellPosition {
            source_index: frame.source_index,
            x: r.x as u32,
            y: r.y as u32,
            width: fw,
            height: fh,
        });
    }

    log::debug!(
        "packed {} frames into {}x{} sheet ({}x{} grid, padding {})",
        frames.len(),
        layout.total_width(),
        layout.total_height(),
        layout.columns,
        layout.rows,
        layout.padding
    );

    Ok(PackedSheet {
        sheet: sheet.into(),
        cells,
        layout,
    })
}
