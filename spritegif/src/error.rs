//! Error types for the spritegif sessions
//!
//! Each layer crate keeps its own error enum. This type sorts them by the
//! stage that failed so callers can report a decode failure differently
//! from an encode failure even though both come from `spritegif-io`.

use spritegif_color::ColorError;
use spritegif_io::IoError;
use spritegif_sheet::SheetError;
use thiserror::Error;

use crate::session::RequestId;

/// Errors returned at the session boundary
#[derive(Debug, Error)]
pub enum Error {
    /// The GIF or image bytes could not be turned into frames
    #[error("decode failed: {0}")]
    Decode(#[source] IoError),

    /// The grid parameters or frame sizes do not give a usable layout
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] SheetError),

    /// No palette could be built
    #[error("palette error: {0}")]
    Palette(#[from] ColorError),

    /// The GIF encoder failed or its worker died
    #[error("encode failed: {0}")]
    Encode(#[source] IoError),

    /// Another request is still in flight
    #[error("a request is already in flight")]
    Busy,

    /// The request was superseded before it completed
    #[error("request {0} is stale")]
    Stale(RequestId),
}

impl From<spritegif_core::Error> for Error {
    fn from(e: spritegif_core::Error) -> Self {
        Error::InvalidGrid(SheetError::Core(e))
    }
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, Error>;
