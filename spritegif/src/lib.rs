//! spritegif - Sprite sheets from animated GIFs and back
//!
//! # Overview
//!
//! - Decode an animated GIF with full disposal compositing, discard
//!   unwanted frames and pack the rest into a grid sprite sheet
//!   ([`GifSheetSession`])
//! - Slice a static sprite sheet on a columns x rows grid and encode the
//!   cells as an animated GIF with one global palette
//!   ([`SheetGifSession`])
//!
//! The layer crates are re-exported as modules: [`color`] for palettes,
//! [`io`] for codecs and [`sheet`] for grid layout, packing and slicing.
//!
//! # Example
//!
//! ```
//! use spritegif::{Frame, GifSheetSession, Surface};
//!
//! let frames = (0..4)
//!     .map(|i| Frame::new(i, Surface::new_filled(10, 10, 0xFF0000FF).unwrap(), 100))
//!     .collect();
//! let mut session = GifSheetSession::new();
//! session.load_frames(frames).unwrap();
//! session.set_columns(2).unwrap();
//! assert_eq!(session.sheet().unwrap().sheet.dimensions(), (20, 20));
//! assert_eq!(session.hit_test(15, 15), Some(3));
//! ```

pub mod encode;
pub mod error;
pub mod session;

// Re-export core types (primary data structures used everywhere)
pub use spritegif_core::{
    BlitMode, Color, Frame, FrameSet, Rect, Surface, SurfaceMut, decode_delay_ms,
    fps_interval_ms,
};

// Re-export layer crates as modules to avoid name conflicts
pub use spritegif_color as color;
pub use spritegif_io as io;
pub use spritegif_sheet as sheet;

pub use encode::{
    EncodeJob, EncodeOptions, EncodeProgress, build_palette, encode_frames,
    encode_frames_with_progress,
};
pub use error::{Error, Result};
pub use session::{EncodeTicket, GifSheetSession, RequestGuard, RequestId, SheetGifSession};
