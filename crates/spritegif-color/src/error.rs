//! Error types for spritegif-color

use thiserror::Error;

/// Errors that can occur during palette operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] spritegif_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// No samples to build a palette from
    #[error("empty image: no pixels to process")]
    EmptyImage,

    /// No quantizer has been installed
    #[error("no palette quantizer available")]
    QuantizerUnavailable,
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
