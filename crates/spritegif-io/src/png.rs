//! PNG image format support
//!
//! Sprite sheets are loaded from PNG and packed sheets are written back as
//! 8-bit RGBA. Every input color type is normalized to RGBA on read.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use spritegif_core::{Surface, SurfaceMut, color};
use std::io::{BufRead, Cursor, Seek, Write};

/// Read a PNG image as an RGBA surface
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Surface> {
    let mut decoder = Decoder::new(reader);
    // Palette and low bit depths expand to 8 bits, 16-bit samples are stripped
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let samples = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output: {:?} {:?}",
                other, output_info.bit_depth
            )));
        }
    };
    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG bit depth after expansion: {:?}",
            output_info.bit_depth
        )));
    }

    let data = &buf[..output_info.buffer_size()];
    let mut surface = SurfaceMut::new(width, height)?;
    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for (x, dst) in surface.row_data_mut(y).iter_mut().enumerate() {
            let px = &row[x * samples..(x + 1) * samples];
            *dst = match samples {
                1 => color::compose_rgb(px[0], px[0], px[0]),
                2 => color::compose_rgba(px[0], px[0], px[0], px[1]),
                3 => color::compose_rgb(px[0], px[1], px[2]),
                _ => color::compose_rgba(px[0], px[1], px[2], px[3]),
            };
        }
    }

    log::debug!("read {width}x{height} PNG ({:?})", output_info.color_type);
    Ok(surface.into())
}

/// Read a PNG image from memory
pub fn read_png_bytes(bytes: &[u8]) -> IoResult<Surface> {
    read_png(Cursor::new(bytes))
}

/// Write a surface as an 8-bit RGBA PNG
pub fn write_png<W: Write>(surface: &Surface, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, surface.width(), surface.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&surface.to_rgba_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
