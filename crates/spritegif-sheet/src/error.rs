//! Error types for spritegif-sheet

use thiserror::Error;

/// Errors that can occur while packing or slicing sprite sheets
#[derive(Debug, Error)]
pub enum SheetError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] spritegif_core::Error),

    /// Grid parameters that do not produce a usable layout
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

/// Result type for sheet operations
pub type SheetResult<T> = Result<T, SheetError>;
