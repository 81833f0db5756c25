//! Grid layout math shared by packing, slicing and the overlays
//!
//! Two layouts use the same type:
//! - a **slice** grid divides a source image into adjacent cells and insets
//!   each frame by the effective padding
//! - a **pack** grid places frame-sized cells with a `gap` between them

use crate::{SheetError, SheetResult};
use spritegif_core::Rect;

/// Geometry of a sprite-sheet grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Padding as requested
    pub padding: u32,
    /// Inset applied inside each cell after clamping
    pub effective_padding: u32,
    /// Space between adjacent cells
    pub gap: u32,
}

/// Clamp a requested per-side padding so the frame inside a
/// `cell_width x cell_height` cell keeps at least one pixel.
///
/// # Examples
///
/// ```
/// use spritegif_sheet::effective_padding;
///
/// assert_eq!(effective_padding(100, 10, 10), 4);
/// assert_eq!(effective_padding(3, 10, 10), 3);
/// assert_eq!(effective_padding(5, 3, 40), 0);
/// ```
pub fn effective_padding(requested: u32, cell_width: u32, cell_height: u32) -> u32 {
    let limit = (cell_width as i64 / 2 - 1).min(cell_height as i64 / 2 - 1).max(0);
    (requested as i64).clamp(0, limit) as u32
}

/// Span of `cells` cells of `size` pixels separated by `gap`, including the
/// trailing gap used as the pitch. `None` if it leaves the `i32` range.
fn pack_extent(cells: u32, size: u32, gap: u32) -> Option<u32> {
    let pitch = size.checked_add(gap)?;
    let span = pitch.checked_mul(cells)?;
    (span <= i32::MAX as u32).then_some(span - gap)
}

impl GridLayout {
    /// Layout for slicing an `image_width x image_height` source into
    /// `columns x rows` cells.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::InvalidGrid`] if columns or rows is zero, or if
    /// either cell dimension comes out as zero.
    pub fn for_slice(
        image_width: u32,
        image_height: u32,
        columns: u32,
        rows: u32,
        padding: u32,
    ) -> SheetResult<Self> {
        if columns == 0 || rows == 0 {
            return Err(SheetError::InvalidGrid(format!(
                "columns and rows must be at least 1, got {columns}x{rows}"
            )));
        }
        let cell_width = image_width / columns;
        let cell_height = image_height / rows;
        if cell_width == 0 || cell_height == 0 {
            return Err(SheetError::InvalidGrid(format!(
                "{columns}x{rows} grid on a {image_width}x{image_height} image gives \
                 {cell_width}x{cell_height} cells"
            )));
        }
        let ep = effective_padding(padding, cell_width, cell_height);
        if ep != padding {
            log::warn!("padding {padding} clamped to {ep} for {cell_width}x{cell_height} cells");
        }
        Ok(Self {
            columns,
            rows,
            cell_width,
            cell_height,
            padding,
            effective_padding: ep,
            gap: 0,
        })
    }

    /// Layout for packing `count` frames of `frame_width x frame_height`
    /// into `columns` columns with `padding` pixels between cells.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::InvalidGrid`] if columns or count is zero, or
    /// if the sheet would be wider or taller than `i32::MAX` pixels.
    pub fn for_pack(
        count: usize,
        columns: u32,
        frame_width: u32,
        frame_height: u32,
        padding: u32,
    ) -> SheetResult<Self> {
        if columns == 0 {
            return Err(SheetError::InvalidGrid("columns must be at least 1".to_string()));
        }
        if count == 0 {
            return Err(SheetError::InvalidGrid("no frames to pack".to_string()));
        }
        let count = u32::try_from(count)
            .map_err(|_| SheetError::InvalidGrid(format!("{count} frames is too many to pack")))?;
        let rows = count.div_ceil(columns);
        let width = pack_extent(columns, frame_width, padding);
        let height = pack_extent(rows, frame_height, padding);
        let (Some(_), Some(_)) = (width, height) else {
            return Err(SheetError::InvalidGrid(format!(
                "{columns}x{rows} grid of {frame_width}x{frame_height} cells with padding \
                 {padding} is too large"
            )));
        };
        Ok(Self {
            columns,
            rows,
            cell_width: frame_width,
            cell_height: frame_height,
            padding,
            effective_padding: 0,
            gap: padding,
        })
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Width of the frame inside each cell
    pub fn frame_width(&self) -> u32 {
        self.cell_width
            .saturating_sub(2 * self.effective_padding)
            .max(1)
    }

    /// Height of the frame inside each cell
    pub fn frame_height(&self) -> u32 {
        self.cell_height
            .saturating_sub(2 * self.effective_padding)
            .max(1)
    }

    /// Width of the whole grid
    pub fn total_width(&self) -> u32 {
        self.columns * self.cell_width + self.gap * (self.columns - 1)
    }

    /// Height of the whole grid
    pub fn total_height(&self) -> u32 {
        self.rows * self.cell_height + self.gap * (self.rows - 1)
    }

    /// Row-major index of the cell at `(column, row)`
    pub fn index_of(&self, column: u32, row: u32) -> usize {
        (row * self.columns + column) as usize
    }

    /// `(column, row)` of the cell with row-major `index`
    pub fn position_of(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (index % self.columns, index / self.columns)
    }

    /// Rectangle of the cell at `(column, row)`
    pub fn cell_rect(&self, column: u32, row: u32) -> Rect {
        Rect::new_unchecked(
            (column * (self.cell_width + self.gap)) as i32,
            (row * (self.cell_height + self.gap)) as i32,
            self.cell_width as i32,
            self.cell_height as i32,
        )
    }

    /// Rectangle of the frame inside the cell at `(column, row)`
    pub fn frame_rect(&self, column: u32, row: u32) -> Rect {
        let cell = self.cell_rect(column, row);
        Rect::new_unchecked(
            cell.x + self.effective_padding as i32,
            cell.y + self.effective_padding as i32,
            self.frame_width() as i32,
            self.frame_height() as i32,
        )
    }

    /// Row-major index of the cell containing `(x, y)`.
    ///
    /// Points in a gap or outside the grid give `None`.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        let pitch_x = self.cell_width + self.gap;
        let pitch_y = self.cell_height + self.gap;
        let (column, row) = (x / pitch_x, y / pitch_y);
        if column >= self.columns || row >= self.rows {
            return None;
        }
        if x % pitch_x >= self.cell_width || y % pitch_y >= self.cell_height {
            return None;
        }
        Some(self.index_of(column, row))
    }
}
