//! spritegif io - Decoding, encoding and image loading
//!
//! - **Compositing** ([`compose`]): turns parsed GIF patches into full frames
//!   honoring disposal methods
//! - **GIF** ([`gif`], feature `gif-format`): animated GIF parsing and
//!   global-palette encoding
//! - **PNG** ([`png`], feature `png-format`): sheet loading and writing
//! - **Format detection** ([`format`])

pub mod compose;
pub mod error;
pub mod format;

#[cfg(feature = "gif-format")]
pub mod gif;
#[cfg(feature = "png-format")]
pub mod png;

// Re-export core types
pub use spritegif_core;

pub use compose::{
    ComposeOptions, Compositor, Disposal, PatchRect, PatchTransparency, RawFrame, RawGif,
    compose_frames,
};
pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes, read_image_bytes};

#[cfg(feature = "gif-format")]
pub use gif::{
    EncodeFrame, GifWriteOptions, Repeat, decode_gif, decode_gif_with, delay_centiseconds,
    read_gif_stream, write_gif_animation,
};
#[cfg(feature = "png-format")]
pub use png::{read_png, read_png_bytes, write_png};
