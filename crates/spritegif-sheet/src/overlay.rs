//! Preview overlays
//!
//! Stateless renderings derived from a [`GridLayout`] or a [`PackedSheet`].
//! Both return a new surface and leave their input untouched.

use crate::grid::GridLayout;
use crate::pack::PackedSheet;
use spritegif_core::{Color, Surface};
use std::collections::BTreeSet;

/// Colors and line widths for the overlays
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    /// Column and row divider lines
    pub divider: Color,
    pub divider_width: u32,
    /// Tint blended over discarded cells
    pub discarded_tint: Color,
    /// Dashed outline of the region kept after padding
    pub padding_outline: Color,
    pub dash_length: u32,
    pub dash_gap: u32,
    /// Outline of each cell on a packed sheet
    pub cell_outline: Color,
    pub cell_outline_width: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            divider: Color::with_alpha(255, 0, 128, 255),
            divider_width: 1,
            discarded_tint: Color::with_alpha(0, 0, 0, 160),
            padding_outline: Color::with_alpha(0, 200, 255, 255),
            dash_length: 4,
            dash_gap: 3,
            cell_outline: Color::with_alpha(0, 160, 255, 255),
            cell_outline_width: 1,
        }
    }
}

/// Draw the slicing grid over `source`.
///
/// Discarded cells are tinted first, then divider lines are drawn between
/// columns and rows, then a dashed outline marks each frame region when
/// the layout has a non-zero effective padding.
pub fn render_slice_overlay(
    source: &Surface,
    layout: &GridLayout,
    discarded: &BTreeSet<usize>,
    style: &OverlayStyle,
) -> Surface {
    let mut out = source.to_mut();
    let grid_w = layout.total_width() as i32;
    let grid_h = layout.total_height() as i32;

    for &index in discarded {
        if index >= layout.cell_count() {
            continue;
        }
        let (col, row) = layout.position_of(index);
        out.blend_rect(&layout.cell_rect(col, row), style.discarded_tint);
    }

    let half = (style.divider_width / 2) as i32;
    for col in 1..layout.columns {
        let x = layout.cell_rect(col, 0).x;
        out.render_vline(x - half, 0, grid_h, style.divider_width, style.divider);
    }
    for row in 1..layout.rows {
        let y = layout.cell_rect(0, row).y;
        out.render_hline(0, grid_w, y - half, style.divider_width, style.divider);
    }

    if layout.effective_padding > 0 {
        for row in 0..layout.rows {
            for col in 0..layout.columns {
                out.render_dashed_box_color(
                    &layout.frame_rect(col, row),
                    1,
                    style.dash_length,
                    style.dash_gap,
                    style.padding_outline,
                );
            }
        }
    }

    out.into()
}

/// Draw an outline around every occupied cell of a packed sheet.
pub fn render_sheet_overlay(packed: &PackedSheet, style: &OverlayStyle) -> Surface {
    let mut out = packed.sheet.to_mut();
    for cell in &packed.cells {
        out.render_box_color(&cell.rect(), style.cell_outline_width, style.cell_outline);
    }
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::{PackOptions, pack_frames};
    use spritegif_core::{Frame, color};

    fn white(w: u32, h: u32) -> Surface {
        Surface::new_filled(w, h, Color::WHITE.to_pixel32()).unwrap()
    }

    #[test]
    fn test_slice_overlay_dividers_and_tint() {
        let src = white(20, 10);
        let layout = GridLayout::for_slice(20, 10, 2, 1, 0).unwrap();
        let style = OverlayStyle::default();
        let discarded: BTreeSet<usize> = [1].into_iter().collect();
        let out = render_slice_overlay(&src, &layout, &discarded, &style);

        assert_eq!(out.get_pixel(10, 5), Some(style.divider.to_pixel32()));
        assert_eq!(out.get_pixel(2, 5), Some(Color::WHITE.to_pixel32()));
        let (r, _, _, a) = color::extract_rgba(out.get_pixel(15, 5).unwrap());
        assert!(r < 255);
        assert_eq!(a, 255);
        // Source unchanged
        assert_eq!(src.get_pixel(10, 5), Some(Color::WHITE.to_pixel32()));
    }

    #[test]
    fn test_slice_overlay_padding_outline() {
        let src = white(10, 10);
        let layout = GridLayout::for_slice(10, 10, 1, 1, 2).unwrap();
        let style = OverlayStyle::default();
        let out = render_slice_overlay(&src, &layout, &BTreeSet::new(), &style);
        assert_eq!(out.get_pixel(2, 2), Some(style.padding_outline.to_pixel32()));
        assert_eq!(out.get_pixel(1, 1), Some(Color::WHITE.to_pixel32()));
        assert_eq!(out.get_pixel(4, 4), Some(Color::WHITE.to_pixel32()));

        let unpadded = GridLayout::for_slice(10, 10, 1, 1, 0).unwrap();
        let plain = render_slice_overlay(&src, &unpadded, &BTreeSet::new(), &style);
        assert!(plain.equals(&src));
    }

    #[test]
    fn test_sheet_overlay_outlines() {
        let frames: Vec<Frame> = (0..2).map(|i| Frame::new(i, white(4, 4), 100)).collect();
        let packed = pack_frames(
            &frames,
            &PackOptions {
                columns: 2,
                padding: 2,
                ..Default::default()
            },
        )
        .unwrap();
        let style = OverlayStyle::default();
        let out = render_sheet_overlay(&packed, &style);
        let outline = style.cell_outline.to_pixel32();
        assert_eq!(out.get_pixel(0, 0), Some(outline));
        assert_eq!(out.get_pixel(9, 3), Some(outline));
        assert_eq!(out.get_pixel(1, 1), Some(Color::WHITE.to_pixel32()));
        assert_eq!(out.get_pixel(4, 0), Some(0));
    }
}
