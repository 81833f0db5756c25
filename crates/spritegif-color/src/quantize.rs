//! Global palette quantization
//!
//! Reduces pixel samples gathered from every frame of an animation to one
//! palette of at most 256 colors:
//! - [`collect_samples`] merges a subsample of all frames
//! - [`Quantizer`] is the interface any palette generator implements
//! - [`MedianCutQuantizer`] is the built-in median cut implementation

use crate::palette::Palette;
use crate::{ColorError, ColorResult};
use spritegif_core::{Surface, color};

/// Smallest palette a quantizer may be asked for
pub const MIN_PALETTE_COLORS: u32 = 2;

/// Largest palette a GIF can carry
pub const MAX_PALETTE_COLORS: u32 = 256;

// =============================================================================
// Sampling
// =============================================================================

/// Options for merging pixel samples across frames
#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// Take every `sample_step`-th pixel of each frame (0 is treated as 1)
    pub sample_step: usize,
    /// Pixels with alpha below this are not sampled
    pub alpha_threshold: u8,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            sample_step: 2,
            alpha_threshold: 10,
        }
    }
}

/// Merge RGBA samples from all `surfaces` into one list.
///
/// Sampling restarts at the first pixel of each surface.
pub fn collect_samples<'a, I>(surfaces: I, options: &SampleOptions) -> Vec<[u8; 4]>
where
    I: IntoIterator<Item = &'a Surface>,
{
    let step = options.sample_step.max(1);
    let mut samples = Vec::new();
    for surface in surfaces {
        samples.extend(
            surface
                .data()
                .iter()
                .step_by(step)
                .map(|&p| color::extract_rgba(p))
                .filter(|&(_, _, _, a)| a >= options.alpha_threshold)
                .map(|(r, g, b, a)| [r, g, b, a]),
        );
    }
    log::debug!("collected {} palette samples (step {step})", samples.len());
    samples
}

/// Check whether any pixel of `surfaces` has alpha below `alpha_threshold`.
pub fn has_transparent_pixels<'a, I>(surfaces: I, alpha_threshold: u8) -> bool
where
    I: IntoIterator<Item = &'a Surface>,
{
    surfaces.into_iter().any(|s| {
        s.data()
            .iter()
            .any(|&p| color::alpha(p) < alpha_threshold)
    })
}

// =============================================================================
// Quantizer interface
// =============================================================================

/// Builds a palette from pixel samples.
///
/// Implementations must be deterministic: the same samples and
/// `max_colors` give the same palette, and the palette never holds more
/// than `max_colors` entries.
pub trait Quantizer: Send + Sync {
    /// Build a palette of at most `max_colors` colors from RGBA `samples`.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidParameters`] if `max_colors` is outside
    /// `[2, 256]`, [`ColorError::EmptyImage`] if `samples` is empty.
    fn quantize(&self, samples: &[[u8; 4]], max_colors: u32) -> ColorResult<Palette>;
}

/// Validate a requested palette size.
pub fn check_max_colors(max_colors: u32) -> ColorResult<()> {
    if !(MIN_PALETTE_COLORS..=MAX_PALETTE_COLORS).contains(&max_colors) {
        return Err(ColorError::InvalidParameters(format!(
            "max_colors must be between {MIN_PALETTE_COLORS} and {MAX_PALETTE_COLORS}, got {max_colors}"
        )));
    }
    Ok(())
}

// =============================================================================
// Median Cut Quantization
// =============================================================================

/// Median cut quantizer
#[derive(Debug, Clone)]
pub struct MedianCutQuantizer {
    /// Minimum number of samples in a box before it can be split
    pub min_box_pixels: u32,
}

impl Default for MedianCutQuantizer {
    fn default() -> Self {
        Self { min_box_pixels: 1 }
    }
}

impl MedianCutQuantizer {
    /// Create a median cut quantizer with default options
    pub fn new() -> Self {
        Self::default()
    }
}

impl Quantizer for MedianCutQuantizer {
    fn quantize(&self, samples: &[[u8; 4]], max_colors: u32) -> ColorResult<Palette> {
        check_max_colors(max_colors)?;
        if samples.is_empty() {
            return Err(ColorError::EmptyImage);
        }

        let pixels: Vec<[u8; 3]> = samples.iter().map(|s| [s[0], s[1], s[2]]).collect();

        let mut open = vec![ColorBox::from_pixels(&pixels, (0..pixels.len()).collect())];
        let mut closed: Vec<ColorBox> = Vec::new();

        // Split the highest-priority box until the palette is full
        while open.len() + closed.len() < max_colors as usize {
            let Some(pos) = open
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.priority().cmp(&b.1.priority()).then(b.0.cmp(&a.0)))
                .map(|(i, _)| i)
            else {
                break;
            };
            let box_ = open.remove(pos);
            if box_.indices.len() <= self.min_box_pixels as usize || box_.is_single_color() {
                closed.push(box_);
                continue;
            }
            match box_.split(&pixels) {
                Ok((box1, box2)) => {
                    open.push(box1);
                    open.push(box2);
                }
                Err(original) => closed.push(original),
            }
        }

        let mut colors: Vec<[u8; 3]> = Vec::with_capacity(closed.len() + open.len());
        for box_ in closed.iter().chain(open.iter()) {
            let c = box_.average_color(&pixels);
            if !colors.contains(&c) {
                colors.push(c);
            }
        }
        log::debug!(
            "median cut: {} samples -> {} colors (max {max_colors})",
            samples.len(),
            colors.len()
        );
        Palette::new(colors)
    }
}

/// A box in RGB color space containing sample indices
#[derive(Clone)]
struct ColorBox {
    indices: Vec<usize>,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBox {
    fn from_pixels(pixels: &[[u8; 3]], indices: Vec<usize>) -> Self {
        let mut min = [255u8; 3];
        let mut max = [0u8; 3];
        for &idx in &indices {
            for c in 0..3 {
                min[c] = min[c].min(pixels[idx][c]);
                max[c] = max[c].max(pixels[idx][c]);
            }
        }
        Self { indices, min, max }
    }

    fn range(&self, channel: usize) -> u8 {
        self.max[channel].saturating_sub(self.min[channel])
    }

    fn volume(&self) -> u64 {
        (0..3).map(|c| self.range(c) as u64 + 1).product()
    }

    /// Larger, more populated boxes are split first
    fn priority(&self) -> u64 {
        self.indices.len() as u64 * self.volume()
    }

    fn is_single_color(&self) -> bool {
        (0..3).all(|c| self.range(c) == 0)
    }

    fn split(mut self, pixels: &[[u8; 3]]) -> Result<(ColorBox, ColorBox), ColorBox> {
        if self.indices.len() < 2 {
            return Err(self);
        }

        // Channel with the largest range, red first on ties
        let (r, g, b) = (self.range(0), self.range(1), self.range(2));
        let channel = if r >= g && r >= b {
            0
        } else if g >= b {
            1
        } else {
            2
        };

        self.indices.sort_by_key(|&idx| pixels[idx][channel]);

        let mid = self.indices.len() / 2;
        let upper = self.indices.split_off(mid);
        Ok((
            ColorBox::from_pixels(pixels, self.indices),
            ColorBox::from_pixels(pixels, upper),
        ))
    }

    fn average_color(&self, pixels: &[[u8; 3]]) -> [u8; 3] {
        if self.indices.is_empty() {
            return [0, 0, 0];
        }
        let mut sum = [0u64; 3];
        for &idx in &self.indices {
            for c in 0..3 {
                sum[c] += pixels[idx][c] as u64;
            }
        }
        let count = self.indices.len() as u64;
        // Rounded mean
        sum.map(|s| ((s + count / 2) / count) as u8)
    }
}
