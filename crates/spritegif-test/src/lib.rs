//! spritegif-test - Regression test framework for spritegif
//!
//! Provides [`RegParams`], which records numbered comparisons and reports
//! every failure at the end of a test, plus builders for the synthetic
//! surfaces and frame sequences the regression tests run on.
//!
//! # Usage
//!
//! ```ignore
//! use spritegif_test::RegParams;
//!
//! let mut rp = RegParams::new("pack");
//! rp.compare_values(22.0, sheet.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use spritegif_core::{Frame, Surface, SurfaceMut, color};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // spritegif-test is at crates/spritegif-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// A distinct opaque color for cell or frame `i`.
pub fn indexed_color(i: usize) -> u32 {
    let i = i as u32;
    color::compose_rgb(
        (i * 53 % 256) as u8,
        (i * 97 % 256) as u8,
        (50 + i * 151 % 206) as u8,
    )
}

/// A surface filled with one RGBA color.
pub fn solid_surface(width: u32, height: u32, r: u8, g: u8, b: u8, a: u8) -> TestResult<Surface> {
    Ok(Surface::new_filled(
        width,
        height,
        color::compose_rgba(r, g, b, a),
    )?)
}

/// A surface where every pixel is unique within 256x256.
pub fn gradient_surface(width: u32, height: u32) -> TestResult<Surface> {
    let mut m = SurfaceMut::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            m.set_pixel_unchecked(x, y, color::compose_rgb(x as u8, y as u8, (x ^ y) as u8));
        }
    }
    Ok(m.into())
}

/// `count` frames of `width x height`, each filled with
/// [`indexed_color`] of its index and with one marker pixel at the
/// top-left corner.
pub fn numbered_frames(count: usize, width: u32, height: u32, delay_ms: u32) -> TestResult<Vec<Frame>> {
    (0..count)
        .map(|i| {
            let mut m = Surface::new_filled(width, height, indexed_color(i))?.into_mut();
            m.set_pixel_unchecked(0, 0, color::compose_rgb(255, 255, i as u8));
            Ok(Frame::new(i, m.into(), delay_ms))
        })
        .collect()
}

/// A `columns x rows` sprite sheet of `cell_w x cell_h` cells, each cell
/// filled with [`indexed_color`] of its row-major index.
pub fn grid_sheet(columns: u32, rows: u32, cell_w: u32, cell_h: u32) -> TestResult<Surface> {
    let mut m = SurfaceMut::new(columns * cell_w, rows * cell_h)?;
    for row in 0..rows {
        for col in 0..columns {
            let c = indexed_color((row * columns + col) as usize);
            for y in row * cell_h..(row + 1) * cell_h {
                for x in col * cell_w..(col + 1) * cell_w {
                    m.set_pixel_unchecked(x, y, c);
                }
            }
        }
    }
    Ok(m.into())
}
