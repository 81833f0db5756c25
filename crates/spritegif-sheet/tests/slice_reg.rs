//! Sprite sheet slicing regression test
//!
//! Tests the slicing scenario, padding clamping at the cell boundary,
//! remainder pixels and invalid grids.

use std::collections::BTreeSet;

use spritegif_core::color;
use spritegif_sheet::{
    GridLayout, OverlayStyle, SheetError, SliceOptions, effective_padding, render_slice_overlay,
    slice_sheet,
};
use spritegif_test::{RegParams, gradient_surface, grid_sheet, indexed_color};

#[test]
fn slice_reg() {
    let mut rp = RegParams::new("slice");

    // --- Test 1: 100x50 sheet on a 5x2 grid -> 20x25 cells ---
    let sheet = grid_sheet(5, 2, 20, 25).expect("sheet");
    let sliced = slice_sheet(
        &sheet,
        &SliceOptions {
            columns: 5,
            rows: 2,
            padding: 0,
            delay_ms: 100,
        },
    )
    .expect("slice");
    rp.compare_values(10.0, sliced.frames.len() as f64, 0.0);
    rp.compare_values(20.0, sliced.frame_width as f64, 0.0);
    rp.compare_values(25.0, sliced.frame_height as f64, 0.0);
    for (i, frame) in sliced.frames.iter().enumerate() {
        rp.compare_values(i as f64, frame.source_index as f64, 0.0);
        rp.compare_values(100.0, frame.delay_ms as f64, 0.0);
        rp.compare_values(
            indexed_color(i) as f64,
            frame.pixels.get_pixel(10, 12).unwrap_or(0) as f64,
            0.0,
        );
    }

    // --- Test 2: padding clamps so a 1x1 frame remains ---
    rp.compare_values(4.0, effective_padding(100, 10, 10) as f64, 0.0);
    rp.compare_values(0.0, effective_padding(5, 1, 10) as f64, 0.0);
    rp.compare_values(3.0, effective_padding(3, 10, 10) as f64, 0.0);
    let sheet = grid_sheet(1, 1, 10, 10).expect("sheet");
    let sliced = slice_sheet(
        &sheet,
        &SliceOptions {
            columns: 1,
            rows: 1,
            padding: 100,
            delay_ms: 100,
        },
    )
    .expect("slice");
    rp.compare_values(4.0, sliced.layout.effective_padding as f64, 0.0);
    rp.compare_values(2.0, sliced.frame_width as f64, 0.0);
    rp.compare_values(2.0, sliced.frame_height as f64, 0.0);

    // --- Test 3: padding insets each frame ---
    let gradient = gradient_surface(40, 20).expect("gradient");
    let sliced = slice_sheet(
        &gradient,
        &SliceOptions {
            columns: 2,
            rows: 1,
            padding: 3,
            delay_ms: 100,
        },
    )
    .expect("slice");
    rp.compare_values(14.0, sliced.frame_width as f64, 0.0);
    rp.compare_values(14.0, sliced.frame_height as f64, 0.0);
    rp.compare_values(
        color::compose_rgb(23, 3, 23 ^ 3) as f64,
        sliced.frames[1].pixels.get_pixel(0, 0).unwrap_or(0) as f64,
        0.0,
    );

    // --- Test 4: remainder pixels are ignored ---
    let odd = gradient_surface(23, 11).expect("odd");
    let sliced = slice_sheet(
        &odd,
        &SliceOptions {
            columns: 4,
            rows: 2,
            padding: 0,
            delay_ms: 100,
        },
    )
    .expect("slice");
    rp.compare_values(5.0, sliced.frame_width as f64, 0.0);
    rp.compare_values(5.0, sliced.frame_height as f64, 0.0);
    rp.compare_values(8.0, sliced.frames.len() as f64, 0.0);

    // --- Test 5: invalid grids ---
    let small = gradient_surface(4, 4).expect("small");
    for (columns, rows) in [(0, 1), (1, 0), (5, 1), (1, 5)] {
        let result = slice_sheet(
            &small,
            &SliceOptions {
                columns,
                rows,
                padding: 0,
                delay_ms: 100,
            },
        );
        rp.compare_true(
            matches!(result, Err(SheetError::InvalidGrid(_))),
            "invalid grid rejected",
        );
    }

    // --- Test 6: grid preview ---
    let layout = GridLayout::for_slice(40, 20, 2, 1, 3).expect("layout");
    let discarded: BTreeSet<usize> = [0].into_iter().collect();
    let preview = render_slice_overlay(&gradient, &layout, &discarded, &OverlayStyle::default());
    rp.compare_true(preview.sizes_equal(&gradient), "preview size");
    rp.compare_true(!preview.equals(&gradient), "preview drawn");
    if rp.display() {
        let _ = rp.write_surface(&preview, "grid");
    }

    assert!(rp.cleanup(), "slice regression test failed");
}
