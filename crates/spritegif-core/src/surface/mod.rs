//! Surface - The RGBA pixel container
//!
//! `Surface` is the image type every compositing, packing and slicing
//! operation works on. It always holds 32-bit RGBA pixels.
//!
//! # Pixel layout
//!
//! - One 32-bit word per pixel, rows stored top to bottom with no padding
//! - Color order is RGBA (red in MSB, alpha in LSB), see [`crate::color`]
//! - A freshly created surface is fully transparent
//!
//! # Ownership model
//!
//! `Surface` uses `Arc` for cheap cloning (shared ownership), so frames can
//! be handed around without copying pixel data. To modify pixels, convert to
//! `SurfaceMut` via [`Surface::try_into_mut`] or [`Surface::to_mut`], then
//! convert back with `Into<Surface>`.

mod access;
pub mod draw;
mod region;

pub use draw::Color;
pub use region::BlitMode;

use crate::color;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal surface data
#[derive(Debug, Clone, PartialEq, Eq)]
struct SurfaceData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data, `width * height` words
    data: Vec<u32>,
}

/// Surface - RGBA pixel container
///
/// # Examples
///
/// ```
/// use spritegif_core::Surface;
///
/// let surface = Surface::new(64, 32).unwrap();
/// assert_eq!(surface.width(), 64);
/// assert_eq!(surface.height(), 32);
/// assert_eq!(surface.get_pixel(0, 0), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Surface {
    inner: Arc<SurfaceData>,
}

impl Surface {
    /// Create a new transparent surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, color::TRANSPARENT)
    }

    /// Create a new surface with every pixel set to `pixel`.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Surface {
            inner: Arc::new(SurfaceData {
                width,
                height,
                data: vec![pixel; len],
            }),
        })
    }

    /// Create a surface from tightly packed RGBA bytes (4 bytes per pixel).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `bytes` is not `width * height * 4`
    /// long.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(4)
            .map(|p| color::compose_rgba(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Surface {
            inner: Arc::new(SurfaceData {
                width,
                height,
                data,
            }),
        })
    }

    /// Get the surface width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the surface height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.width) as usize;
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Get the number of strong references to this surface.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a new transparent surface with the same dimensions.
    pub fn create_template(&self) -> Self {
        Surface {
            inner: Arc::new(SurfaceData {
                width: self.inner.width,
                height: self.inner.height,
                data: vec![color::TRANSPARENT; self.inner.data.len()],
            }),
        }
    }

    /// Check if two surfaces have the same width and height.
    pub fn sizes_equal(&self, other: &Surface) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Check whether two surfaces are pixel-identical.
    pub fn equals(&self, other: &Surface) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }

    /// Check whether every pixel has alpha 0.
    pub fn is_fully_transparent(&self) -> bool {
        self.inner.data.iter().all(|&p| color::alpha(p) == 0)
    }

    /// Export as tightly packed RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.data.len() * 4);
        for &p in &self.inner.data {
            let (r, g, b, a) = color::extract_rgba(p);
            out.extend_from_slice(&[r, g, b, a]);
        }
        out
    }

    /// Create a deep copy of this surface.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Surface {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to get mutable access to the pixel data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<SurfaceMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(SurfaceMut { inner: data }),
            Err(arc) => Err(Surface { inner: arc }),
        }
    }

    /// Create a mutable copy of this surface.
    pub fn to_mut(&self) -> SurfaceMut {
        SurfaceMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Get mutable access, copying only if the data is shared.
    pub fn into_mut(self) -> SurfaceMut {
        match self.try_into_mut() {
            Ok(m) => m,
            Err(shared) => shared.to_mut(),
        }
    }
}

/// Mutable surface
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`Surface`] using `Into<Surface>`.
#[derive(Debug)]
pub struct SurfaceMut {
    inner: SurfaceData,
}

impl SurfaceMut {
    /// Create a new transparent mutable surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Surface::new(width, height)?.into_mut())
    }

    /// Get the surface width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the surface height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable raw access to the pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get the pixels of row `y`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.width) as usize;
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Get mutable pixels of row `y`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.width) as usize;
        let end = start + self.inner.width as usize;
        &mut self.inner.data[start..end]
    }

    /// Snapshot the current pixels as an immutable surface.
    pub fn snapshot(&self) -> Surface {
        Surface {
            inner: Arc::new(self.inner.clone()),
        }
    }
}

impl From<SurfaceMut> for Surface {
    fn from(surface: SurfaceMut) -> Self {
        Surface {
            inner: Arc::new(surface.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            Surface::new(0, 4),
            Err(Error::InvalidDimension {
                width: 0,
                height: 4
            })
        ));
    }

    #[test]
    fn test_rgba_bytes_roundtrip() {
        let bytes: Vec<u8> = (0..2 * 2 * 4).map(|v| v as u8).collect();
        let s = Surface::from_rgba_bytes(2, 2, &bytes).unwrap();
        assert_eq!(s.get_rgba(1, 0), Some((4, 5, 6, 7)));
        assert_eq!(s.to_rgba_bytes(), bytes);
    }

    #[test]
    fn test_from_rgba_bytes_length_checked() {
        let err = Surface::from_rgba_bytes(2, 2, &[0; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferLength {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_try_into_mut_shared() {
        let s = Surface::new(2, 2).unwrap();
        let shared = s.clone();
        let s = s.try_into_mut().unwrap_err();
        drop(shared);
        assert!(s.try_into_mut().is_ok());
    }

    #[test]
    fn test_equals_and_deep_clone() {
        let mut m = SurfaceMut::new(3, 3).unwrap();
        m.set_pixel(1, 1, color::compose_rgb(9, 9, 9)).unwrap();
        let a: Surface = m.into();
        let b = a.deep_clone();
        assert_eq!(b.ref_count(), 1);
        assert!(a.equals(&b));
        assert!(!a.equals(&a.create_template()));
    }
}
