//! spritegif sheet - Sprite-sheet geometry
//!
//! This crate converts between frame sequences and grid sprite sheets:
//!
//! - **Grid math** ([`grid`]): cell sizes, padding clamp, hit-testing
//! - **Packing** ([`pack`]): frames to a sheet plus a cell index
//! - **Slicing** ([`slice`]): a sheet back to frames
//! - **Overlays** ([`overlay`]): grid and cell previews
//! - **Playback** ([`playback`]): deterministic animation preview timer

pub mod error;
pub mod grid;
pub mod overlay;
pub mod pack;
pub mod playback;
pub mod slice;

// Re-export core types
pub use spritegif_core;

pub use error::{SheetError, SheetResult};
pub use grid::{GridLayout, effective_padding};
pub use overlay::{OverlayStyle, render_sheet_overlay, render_slice_overlay};
pub use pack::{Background, CellPosition, PackOptions, PackedSheet, hit_test, pack_frames};
pub use playback::{PlaybackTiming, PreviewScheduler};
pub use slice::{SliceOptions, SlicedFrames, slice_sheet};
