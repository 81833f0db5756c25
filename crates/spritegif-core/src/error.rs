//! Error types for spritegif-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// spritegif-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid surface dimensions
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel coordinate outside the surface
    #[error("pixel ({x}, {y}) outside {width}x{height} surface")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Surface dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Raw buffer length does not match the declared dimensions
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Null or empty input
    #[error("null or empty input: {0}")]
    NullInput(&'static str),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
