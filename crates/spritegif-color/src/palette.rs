//! Palette mapping
//!
//! A [`Palette`] is the ordered color table shared by all frames of one
//! encode pass. Index assignment always uses the palette's own order; the
//! sorted views returned by [`Palette::sorted_by_luminance`] and
//! [`Palette::sorted_by_hue`] are for display only.

use crate::quantize::MAX_PALETTE_COLORS;
use crate::{ColorError, ColorResult};
use spritegif_core::{Surface, SurfaceMut, color};
use std::collections::HashMap;

/// Ordered list of up to 256 RGB colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
    transparent: Option<u8>,
}

/// Frame pixels as palette indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub width: u32,
    pub height: u32,
    /// One palette index per pixel, row-major
    pub indices: Vec<u8>,
}

/// A palette entry prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayColor {
    /// Position in the palette
    pub index: usize,
    pub rgb: [u8; 3],
    /// `#rrggbb`
    pub hex: String,
}

impl DisplayColor {
    fn new(index: usize, rgb: [u8; 3]) -> Self {
        Self {
            index,
            rgb,
            hex: format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]),
        }
    }
}

/// Euclidean distance between two RGB colors.
pub fn color_distance(a: [u8; 3], b: [u8; 3]) -> f32 {
    (squared_distance(a, b) as f32).sqrt()
}

#[inline]
fn squared_distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}

impl Palette {
    /// Create a palette from `colors`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidParameters`] if `colors` is empty or
    /// longer than 256.
    pub fn new(colors: Vec<[u8; 3]>) -> ColorResult<Self> {
        if colors.is_empty() || colors.len() > MAX_PALETTE_COLORS as usize {
            return Err(ColorError::InvalidParameters(format!(
                "palette must hold 1 to {MAX_PALETTE_COLORS} colors, got {}",
                colors.len()
            )));
        }
        Ok(Self {
            colors,
            transparent: None,
        })
    }

    /// Number of entries, including a transparent slot
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette has no entries
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All entries in palette order
    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<[u8; 3]> {
        self.colors.get(index).copied()
    }

    /// Index reserved for transparent pixels, if any
    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent
    }

    /// Append a reserved transparent entry and return its index.
    ///
    /// Calling this on a palette that already has one returns the existing
    /// index.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidParameters`] if the palette is full.
    pub fn reserve_transparent(&mut self) -> ColorResult<u8> {
        if let Some(idx) = self.transparent {
            return Ok(idx);
        }
        if self.colors.len() >= MAX_PALETTE_COLORS as usize {
            return Err(ColorError::InvalidParameters(
                "palette is full, no room for a transparent entry".to_string(),
            ));
        }
        let idx = self.colors.len() as u8;
        self.colors.push([0, 0, 0]);
        self.transparent = Some(idx);
        Ok(idx)
    }

    /// Index of the entry closest to `rgb`.
    ///
    /// Uses squared Euclidean RGB distance; ties go to the lowest index.
    /// The transparent entry is never returned.
    pub fn nearest_index(&self, rgb: [u8; 3]) -> u8 {
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (i, &c) in self.colors.iter().enumerate() {
            if self.transparent == Some(i as u8) {
                continue;
            }
            let d = squared_distance(rgb, c);
            if d < best_dist {
                best = i;
                best_dist = d;
                if d == 0 {
                    break;
                }
            }
        }
        best as u8
    }

    /// Map every pixel of `surface` to a palette index.
    ///
    /// Pixels with alpha below `alpha_threshold` map to the transparent
    /// entry when the palette has one, otherwise to their nearest color.
    pub fn apply(&self, surface: &Surface, alpha_threshold: u8) -> IndexedImage {
        let mut cache: HashMap<u32, u8> = HashMap::new();
        let indices = surface
            .data()
            .iter()
            .map(|&p| {
                let (r, g, b, a) = color::extract_rgba(p);
                if a < alpha_threshold {
                    if let Some(t) = self.transparent {
                        return t;
                    }
                }
                let key = p | 0xff;
                *cache
                    .entry(key)
                    .or_insert_with(|| self.nearest_index([r, g, b]))
            })
            .collect();
        IndexedImage {
            width: surface.width(),
            height: surface.height(),
            indices,
        }
    }

    /// Convert an indexed image back to RGBA.
    ///
    /// Entries are opaque; out-of-range indices become black and the
    /// transparent entry becomes a transparent pixel.
    ///
    /// # Errors
    ///
    /// Returns an error if the image dimensions are zero or do not match
    /// the index buffer.
    pub fn indexed_to_surface(&self, image: &IndexedImage) -> ColorResult<Surface> {
        let expected = image.width as usize * image.height as usize;
        if image.indices.len() != expected {
            return Err(spritegif_core::Error::BufferLength {
                expected,
                actual: image.indices.len(),
            }
            .into());
        }
        let mut out = SurfaceMut::new(image.width, image.height)?;
        for (dst, &idx) in out.data_mut().iter_mut().zip(&image.indices) {
            *dst = if self.transparent == Some(idx) {
                color::TRANSPARENT
            } else {
                let [r, g, b] = self.get(idx as usize).unwrap_or([0, 0, 0]);
                color::compose_rgb(r, g, b)
            };
        }
        Ok(out.into())
    }

    /// Reduce `surface` to this palette and return the result as RGBA.
    pub fn quantize_surface(&self, surface: &Surface, alpha_threshold: u8) -> ColorResult<Surface> {
        self.indexed_to_surface(&self.apply(surface, alpha_threshold))
    }

    /// Entries as display colors, in palette order.
    pub fn display_colors(&self) -> Vec<DisplayColor> {
        self.colors
            .iter()
            .enumerate()
            .filter(|(i, _)| self.transparent != Some(*i as u8))
            .map(|(i, &c)| DisplayColor::new(i, c))
            .collect()
    }

    /// Display colors ordered from darkest to brightest.
    pub fn sorted_by_luminance(&self) -> Vec<DisplayColor> {
        let mut out = self.display_colors();
        out.sort_by(|a, b| {
            let la = color::luminance(a.rgb[0], a.rgb[1], a.rgb[2]);
            let lb = color::luminance(b.rgb[0], b.rgb[1], b.rgb[2]);
            la.total_cmp(&lb)
        });
        out
    }

    /// Display colors ordered by hue, starting at red. Grays sort as hue 0.
    pub fn sorted_by_hue(&self) -> Vec<DisplayColor> {
        let mut out = self.display_colors();
        out.sort_by_key(|c| color::rgb_to_hsv(c.rgb[0], c.rgb[1], c.rgb[2]).h);
        out
    }
}
