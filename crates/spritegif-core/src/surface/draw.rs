//! Drawing primitives
//!
//! Simple shapes used by the sheet overlays:
//! - Solid rectangles and box outlines
//! - Dashed box outlines
//! - Translucent tints blended over existing pixels

use super::SurfaceMut;
use crate::color;
use crate::rect::Rect;

/// RGBA color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new opaque color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color with alpha
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent
    pub const TRANSPARENT: Color = Color::with_alpha(0, 0, 0, 0);
    /// Black color
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// White color
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// Red color
    pub const RED: Color = Color::new(255, 0, 0);
    /// Green color
    pub const GREEN: Color = Color::new(0, 255, 0);
    /// Blue color
    pub const BLUE: Color = Color::new(0, 0, 255);

    /// Same color with a different alpha
    pub const fn alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Compose as a 32-bit RGBA pixel
    pub fn to_pixel32(&self) -> u32 {
        color::compose_rgba(self.r, self.g, self.b, self.a)
    }

    /// Split a 32-bit RGBA pixel into a color
    pub fn from_pixel32(pixel: u32) -> Self {
        let (r, g, b, a) = color::extract_rgba(pixel);
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Generate the points of a dashed outline running just inside `rect`.
///
/// The perimeter is walked clockwise from the top-left corner; `dash`
/// pixels are drawn, then `gap` pixels skipped. Each point is widened
/// inward to `width` pixels.
pub fn generate_dashed_box_points(rect: &Rect, width: u32, dash: u32, gap: u32) -> Vec<(i32, i32)> {
    if rect.is_empty() {
        return Vec::new();
    }
    let width = width.max(1) as i32;
    let period = (dash.max(1) + gap) as i32;
    let dash = dash.max(1) as i32;
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right() - 1, rect.bottom() - 1);

    // (x, y, inward dx, inward dy)
    let mut perimeter: Vec<(i32, i32, i32, i32)> = Vec::new();
    for x in x0..=x1 {
        perimeter.push((x, y0, 0, 1));
    }
    for y in y0 + 1..=y1 {
        perimeter.push((x1, y, -1, 0));
    }
    if y1 > y0 {
        for x in (x0..x1).rev() {
            perimeter.push((x, y1, 0, -1));
        }
    }
    if x1 > x0 {
        for y in (y0 + 1..y1).rev() {
            perimeter.push((x0, y, 1, 0));
        }
    }

    let mut points = Vec::with_capacity(perimeter.len() * width as usize);
    for (i, &(x, y, dx, dy)) in perimeter.iter().enumerate() {
        if (i as i32) % period >= dash {
            continue;
        }
        for k in 0..width {
            let (px, py) = (x + dx * k, y + dy * k);
            if rect.contains_point(px, py) {
                points.push((px, py));
            }
        }
    }
    points
}

/// Source-over blend of `src` onto the pixel `dst`.
pub fn blend_pixel(dst: u32, src: Color) -> u32 {
    if src.a == 255 {
        return src.to_pixel32();
    }
    if src.a == 0 {
        return dst;
    }
    let (dr, dg, db, da) = color::extract_rgba(dst);
    let sa = src.a as f32 / 255.0;
    let da = da as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    color::compose_rgba(
        mix(src.r, dr),
        mix(src.g, dg),
        mix(src.b, db),
        (out_a * 255.0).round() as u8,
    )
}

impl SurfaceMut {
    /// Render a list of points with a specific color, skipping any that
    /// fall outside the surface.
    pub fn render_points_color(&mut self, points: &[(i32, i32)], color: Color) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        let pixel = color.to_pixel32();
        for &(x, y) in points {
            if x < 0 || x >= w || y < 0 || y >= h {
                continue;
            }
            self.set_pixel_unchecked(x as u32, y as u32, pixel);
        }
    }

    /// Render a solid horizontal band `thickness` pixels tall from `x0` to
    /// `x1` (exclusive).
    pub fn render_hline(&mut self, x0: i32, x1: i32, y: i32, thickness: u32, color: Color) {
        let r = Rect::new_unchecked(x0, y, x1 - x0, thickness as i32);
        self.fill_rect(&r, color.to_pixel32());
    }

    /// Render a solid vertical band `thickness` pixels wide from `y0` to
    /// `y1` (exclusive).
    pub fn render_vline(&mut self, x: i32, y0: i32, y1: i32, thickness: u32, color: Color) {
        let r = Rect::new_unchecked(x, y0, thickness as i32, y1 - y0);
        self.fill_rect(&r, color.to_pixel32());
    }

    /// Render a box outline of `width` pixels drawn inside `rect`.
    pub fn render_box_color(&mut self, rect: &Rect, width: u32, color: Color) {
        if rect.is_empty() {
            return;
        }
        let t = (width.max(1) as i32).min(rect.w).min(rect.h);
        let pixel = color.to_pixel32();
        self.fill_rect(&Rect::new_unchecked(rect.x, rect.y, rect.w, t), pixel);
        self.fill_rect(
            &Rect::new_unchecked(rect.x, rect.bottom() - t, rect.w, t),
            pixel,
        );
        self.fill_rect(&Rect::new_unchecked(rect.x, rect.y, t, rect.h), pixel);
        self.fill_rect(
            &Rect::new_unchecked(rect.right() - t, rect.y, t, rect.h),
            pixel,
        );
    }

    /// Render a dashed box outline of `width` pixels drawn inside `rect`.
    pub fn render_dashed_box_color(
        &mut self,
        rect: &Rect,
        width: u32,
        dash: u32,
        gap: u32,
        color: Color,
    ) {
        let points = generate_dashed_box_points(rect, width, dash, gap);
        self.render_points_color(&points, color);
    }

    /// Blend `color` over every pixel inside `rect`.
    pub fn blend_rect(&mut self, rect: &Rect, color: Color) {
        let Some(r) = rect.clip_to(self.width(), self.height()) else {
            return;
        };
        for y in r.y..r.bottom() {
            let row = self.row_data_mut(y as u32);
            for p in &mut row[r.x as usize..r.right() as usize] {
                *p = blend_pixel(*p, color);
            }
        }
    }
}
