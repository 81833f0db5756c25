//! Frame sequence to animated GIF
//!
//! Glue between the palette quantizer and the GIF writer: sample all
//! frames, build one global palette, map every frame onto it and encode.
//! [`EncodeJob`] runs the same pipeline on a worker thread over an owned
//! copy of the frames.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use spritegif_color::{
    ColorError, MIN_PALETTE_COLORS, Palette, Quantizer, SampleOptions, check_max_colors,
    collect_samples, has_transparent_pixels,
};
use spritegif_core::{Frame, MIN_DECODE_DELAY_MS, fps_interval_ms};
use spritegif_io::{EncodeFrame, GifWriteOptions, IoError, Repeat, write_gif_animation};
use spritegif_sheet::SheetError;

use crate::{Error, Result};

/// Options for encoding a frame sequence
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Fixed playback rate. `None` keeps each frame's own delay.
    pub fps: Option<f32>,
    /// Upper bound on palette entries, transparent slot included
    pub max_colors: u32,
    pub sample: SampleOptions,
    pub repeat: Repeat,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            fps: None,
            max_colors: 256,
            sample: SampleOptions::default(),
            repeat: Repeat::Infinite,
        }
    }
}

impl EncodeOptions {
    /// Delay written for `frame`, floored at [`MIN_DECODE_DELAY_MS`]
    pub fn frame_delay(&self, frame: &Frame) -> u32 {
        match self.fps {
            Some(fps) => fps_interval_ms(fps, MIN_DECODE_DELAY_MS),
            None => frame.delay_ms.max(MIN_DECODE_DELAY_MS),
        }
    }
}

/// Progress reported while encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeProgress {
    /// The global palette is ready
    Palette { colors: usize },
    /// `done` of `total` frames mapped onto the palette
    Frame { done: usize, total: usize },
    /// The GIF stream is complete
    Finished { bytes: usize },
}

/// Build the global palette for `frames`.
///
/// When any sampled frame has pixels below the alpha threshold, the last
/// palette slot is reserved as the transparent index and the quantizer
/// gets one color less.
///
/// # Errors
///
/// [`ColorError::InvalidParameters`] if `max_colors` is out of range or
/// leaves no room for colors next to the transparent slot.
pub fn build_palette(
    frames: &[Frame],
    options: &EncodeOptions,
    quantizer: &dyn Quantizer,
) -> Result<Palette> {
    check_max_colors(options.max_colors)?;
    let surfaces = move || frames.iter().map(|f| &f.pixels);
    let transparent = has_transparent_pixels(surfaces(), options.sample.alpha_threshold);
    let samples = collect_samples(surfaces(), &options.sample);

    if !transparent {
        return Ok(quantizer.quantize(&samples, options.max_colors)?);
    }

    let budget = options.max_colors - 1;
    if budget < MIN_PALETTE_COLORS {
        return Err(ColorError::InvalidParameters(format!(
            "max_colors {} leaves no room for the transparent slot",
            options.max_colors
        ))
        .into());
    }
    let mut palette = if samples.is_empty() {
        // Every pixel is transparent
        Palette::new(vec![[0, 0, 0]])?
    } else {
        quantizer.quantize(&samples, budget)?
    };
    palette.reserve_transparent()?;
    Ok(palette)
}

/// Encode `frames` as an animated GIF.
///
/// # Errors
///
/// [`Error::Encode`] for an empty sequence or a writer failure,
/// [`Error::InvalidGrid`] when the frames differ in size and
/// [`Error::Palette`] when no palette can be built.
pub fn encode_frames(
    frames: &[Frame],
    options: &EncodeOptions,
    quantizer: &dyn Quantizer,
) -> Result<Vec<u8>> {
    encode_frames_with_progress(frames, options, quantizer, |_| {})
}

/// [`encode_frames`] with a progress callback
pub fn encode_frames_with_progress<F>(
    frames: &[Frame],
    options: &EncodeOptions,
    quantizer: &dyn Quantizer,
    mut progress: F,
) -> Result<Vec<u8>>
where
    F: FnMut(EncodeProgress),
{
    let first = frames.first().ok_or(Error::Encode(IoError::NoFrames))?;
    let (width, height) = first.dimensions();
    if let Some(odd) = frames.iter().find(|f| f.dimensions() != (width, height)) {
        return Err(SheetError::InvalidGrid(format!(
            "frame {} is {}x{}, expected {width}x{height}",
            odd.source_index,
            odd.width(),
            odd.height()
        ))
        .into());
    }

    let palette = build_palette(frames, options, quantizer)?;
    progress(EncodeProgress::Palette {
        colors: palette.len(),
    });

    let total = frames.len();
    let mut encoded = Vec::with_capacity(total);
    for (i, frame) in frames.iter().enumerate() {
        let indexed = palette.apply(&frame.pixels, options.sample.alpha_threshold);
        encoded.push(EncodeFrame::from_indexed(indexed, options.frame_delay(frame)));
        progress(EncodeProgress::Frame { done: i + 1, total });
    }

    let write_options = GifWriteOptions {
        repeat: options.repeat,
        transparent_index: palette.transparent_index(),
    };
    let mut bytes = Vec::new();
    write_gif_animation(&encoded, &palette, width, height, &write_options, &mut bytes)
        .map_err(Error::Encode)?;

    log::debug!(
        "encoded {total} frames ({width}x{height}, {} colors) into {} bytes",
        palette.len(),
        bytes.len()
    );
    progress(EncodeProgress::Finished { bytes: bytes.len() });
    Ok(bytes)
}

/// An encode running on its own thread.
///
/// The job owns its frames, so the caller can keep editing its own frame
/// set while the encode runs.
pub struct EncodeJob {
    worker: JoinHandle<Result<Vec<u8>>>,
}

impl EncodeJob {
    /// Start encoding `frames` on a worker thread.
    pub fn spawn<F>(
        frames: Vec<Frame>,
        options: EncodeOptions,
        quantizer: Arc<dyn Quantizer>,
        progress: F,
    ) -> Result<Self>
    where
        F: FnMut(EncodeProgress) + Send + 'static,
    {
        let worker = thread::Builder::new()
            .name("spritegif-encode".to_string())
            .spawn(move || {
                encode_frames_with_progress(&frames, &options, quantizer.as_ref(), progress)
            })
            .map_err(|e| Error::Encode(IoError::Io(e)))?;
        Ok(Self { worker })
    }

    /// Whether the worker has finished
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and take its output
    pub fn join(self) -> Result<Vec<u8>> {
        match self.worker.join() {
            Ok(result) => result,
            Err(_) => Err(Error::Encode(IoError::EncodeError(
                "encode worker panicked".to_string(),
            ))),
        }
    }
}

impl std::fmt::Debug for EncodeJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodeJob")
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritegif_color::MedianCutQuantizer;
    use spritegif_core::{Surface, color};

    fn frames(pixels: &[u32], w: u32, h: u32, delay: u32) -> Vec<Frame> {
        pixels
            .iter()
            .enumerate()
            .map(|(i, &p)| Frame::new(i, Surface::new_filled(w, h, p).unwrap(), delay))
            .collect()
    }

    #[test]
    fn test_frame_delay() {
        let f = &frames(&[color::compose_rgb(1, 2, 3)], 2, 2, 100)[0];
        let mut opts = EncodeOptions::default();
        assert_eq!(opts.frame_delay(f), 100);
        opts.fps = Some(10.0);
        assert_eq!(opts.frame_delay(f), 100);
        opts.fps = Some(100.0);
        assert_eq!(opts.frame_delay(f), 20);
        opts.fps = Some(30.0);
        assert_eq!(opts.frame_delay(f), 33);
    }

    #[test]
    fn test_build_palette_opaque() {
        let fs = frames(
            &[color::compose_rgb(255, 0, 0), color::compose_rgb(0, 0, 255)],
            4,
            4,
            100,
        );
        let p = build_palette(&fs, &EncodeOptions::default(), &MedianCutQuantizer::new()).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.transparent_index(), None);
    }

    #[test]
    fn test_build_palette_reserves_transparent_slot() {
        let fs = frames(&[color::compose_rgb(255, 0, 0), color::TRANSPARENT], 4, 4, 100);
        let opts = EncodeOptions {
            max_colors: 16,
            ..Default::default()
        };
        let p = build_palette(&fs, &opts, &MedianCutQuantizer::new()).unwrap();
        assert!(p.len() <= 16);
        assert_eq!(p.transparent_index(), Some((p.len() - 1) as u8));
    }

    #[test]
    fn test_build_palette_all_transparent() {
        let fs = frames(&[color::TRANSPARENT], 3, 3, 100);
        let p = build_palette(&fs, &EncodeOptions::default(), &MedianCutQuantizer::new()).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.transparent_index(), Some(1));
    }

    #[test]
    fn test_build_palette_rejects_tiny_budget() {
        let fs = frames(&[color::TRANSPARENT], 3, 3, 100);
        let opts = EncodeOptions {
            max_colors: 2,
            ..Default::default()
        };
        let err = build_palette(&fs, &opts, &MedianCutQuantizer::new()).unwrap_err();
        assert!(matches!(err, Error::Palette(ColorError::InvalidParameters(_))));

        let opts = EncodeOptions {
            max_colors: 300,
            ..Default::default()
        };
        assert!(build_palette(&fs, &opts, &MedianCutQuantizer::new()).is_err());
    }

    #[test]
    fn test_encode_empty_and_mismatched() {
        let q = MedianCutQuantizer::new();
        let err = encode_frames(&[], &EncodeOptions::default(), &q).unwrap_err();
        assert!(matches!(err, Error::Encode(IoError::NoFrames)));

        let mut fs = frames(&[color::compose_rgb(9, 9, 9)], 4, 4, 100);
        fs.push(Frame::new(1, Surface::new(5, 4).unwrap(), 100));
        let err = encode_frames(&fs, &EncodeOptions::default(), &q).unwrap_err();
        assert!(matches!(err, Error::InvalidGrid(_)));
    }

    #[test]
    fn test_encode_progress() {
        let fs = frames(
            &[color::compose_rgb(255, 0, 0), color::compose_rgb(0, 255, 0)],
            4,
            4,
            100,
        );
        let mut events = Vec::new();
        let bytes = encode_frames_with_progress(
            &fs,
            &EncodeOptions::default(),
            &MedianCutQuantizer::new(),
            |p| events.push(p),
        )
        .unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
        assert_eq!(events.first(), Some(&EncodeProgress::Palette { colors: 2 }));
        assert!(events.contains(&EncodeProgress::Frame { done: 2, total: 2 }));
        assert_eq!(
            events.last(),
            Some(&EncodeProgress::Finished { bytes: bytes.len() })
        );
    }

    #[test]
    fn test_encode_job() {
        let fs = frames(
            &[color::compose_rgb(255, 0, 0), color::compose_rgb(0, 0, 255)],
            6,
            6,
            50,
        );
        let expected = encode_frames(&fs, &EncodeOptions::default(), &MedianCutQuantizer::new())
            .unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        let job = EncodeJob::spawn(
            fs,
            EncodeOptions::default(),
            Arc::new(MedianCutQuantizer::new()),
            move |p| {
                let _ = tx.send(p);
            },
        )
        .unwrap();
        let bytes = job.join().unwrap();
        assert_eq!(bytes, expected);
        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events.len(), 4);
    }
}
