//! Caller-facing sessions
//!
//! [`GifSheetSession`] holds the decode path: animated GIF to frames to a
//! packed sprite sheet, with frames discarded and restored by index or by
//! clicking the sheet. [`SheetGifSession`] holds the slice path: a static
//! sheet cut into frames and encoded back to a GIF, optionally on a worker
//! thread guarded by a [`RequestGuard`].
//!
//! Every mutation recomputes the derived outputs from scratch. A failed
//! load or regrid leaves the previous state in place.

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use spritegif_color::{ColorError, MedianCutQuantizer, Quantizer};
use spritegif_core::{Frame, FrameSet, Surface};
use spritegif_io::{ComposeOptions, IoError, decode_gif_with, read_image_bytes, write_png};
use spritegif_sheet::{
    Background, GridLayout, OverlayStyle, PackOptions, PackedSheet, PlaybackTiming,
    PreviewScheduler, SheetError, SliceOptions, pack_frames, render_sheet_overlay, render_slice_overlay, slice_sheet,
};

use crate::encode::{EncodeJob, EncodeOptions, EncodeProgress, encode_frames};
use crate::{Error, Result};

// =============================================================================
// Request guard
// =============================================================================

/// Identifier of one guarded request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allows one request in flight and detects stale completions.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    last: u64,
    current: Option<RequestId>,
}

impl RequestGuard {
    /// Create an idle guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request.
    ///
    /// # Errors
    ///
    /// [`Error::Busy`] while another request is in flight.
    pub fn begin(&mut self) -> Result<RequestId> {
        if self.current.is_some() {
            return Err(Error::Busy);
        }
        self.last += 1;
        let id = RequestId(self.last);
        self.current = Some(id);
        Ok(id)
    }

    /// Complete request `id`.
    ///
    /// # Errors
    ///
    /// [`Error::Stale`] if `id` is not the request in flight. The guard
    /// is left unchanged in that case.
    pub fn finish(&mut self, id: RequestId) -> Result<()> {
        if self.current != Some(id) {
            return Err(Error::Stale(id));
        }
        self.current = None;
        Ok(())
    }

    /// Drop the request in flight, so its completion reports stale
    pub fn invalidate(&mut self) {
        if let Some(id) = self.current.take() {
            log::debug!("request {id} invalidated");
        }
    }

    /// Check whether a request is in flight
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// The request in flight, if any
    pub fn current(&self) -> Option<RequestId> {
        self.current
    }
}

// =============================================================================
// GIF -> sprite sheet
// =============================================================================

/// Decode path: animated GIF to packed sprite sheet
pub struct GifSheetSession {
    frames: FrameSet,
    compose: ComposeOptions,
    pack: PackOptions,
    packed: Option<PackedSheet>,
    style: OverlayStyle,
    quantizer: Arc<dyn Quantizer>,
    scheduler: PreviewScheduler,
}

impl Default for GifSheetSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GifSheetSession {
    /// Create an empty session with default packing options
    pub fn new() -> Self {
        Self::with_options(PackOptions::default(), ComposeOptions::default())
    }

    /// Create an empty session
    pub fn with_options(pack: PackOptions, compose: ComposeOptions) -> Self {
        Self {
            frames: FrameSet::new(),
            compose,
            pack,
            packed: None,
            style: OverlayStyle::default(),
            quantizer: Arc::new(MedianCutQuantizer::new()),
            scheduler: PreviewScheduler::default(),
        }
    }

    /// Decode `bytes` as an animated GIF and pack its frames.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] if the GIF is malformed or yields no frames. The
    /// previous frames and sheet are kept.
    pub fn load_gif(&mut self, bytes: &[u8]) -> Result<()> {
        let frames = decode_gif_with(bytes, &self.compose).map_err(Error::Decode)?;
        self.load_frames(frames)
    }

    /// Replace the frames and pack them.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] for an empty list and [`Error::InvalidGrid`] when
    /// the frames differ in size. The previous state is kept on error.
    pub fn load_frames(&mut self, frames: Vec<Frame>) -> Result<()> {
        if frames.is_empty() {
            return Err(Error::Decode(IoError::NoFrames));
        }
        let set = FrameSet::from_frames(frames);
        let packed = pack_frames(set.active(), &self.pack)?;
        log::debug!("loaded {} frames", set.len());
        self.frames = set;
        self.packed = Some(packed);
        self.scheduler.reset();
        Ok(())
    }

    /// Set the number of sheet columns and repack.
    pub fn set_columns(&mut self, columns: u32) -> Result<()> {
        let pack = PackOptions {
            columns,
            ..self.pack.clone()
        };
        self.apply_pack_options(pack)
    }

    /// Set the padding around each cell and repack.
    pub fn set_padding(&mut self, padding: u32) -> Result<()> {
        let pack = PackOptions {
            padding,
            ..self.pack.clone()
        };
        self.apply_pack_options(pack)
    }

    /// Set the sheet background and repack.
    pub fn set_background(&mut self, background: Background) -> Result<()> {
        let pack = PackOptions {
            background,
            ..self.pack.clone()
        };
        self.apply_pack_options(pack)
    }

    /// Current packing options
    pub fn pack_options(&self) -> &PackOptions {
        &self.pack
    }

    /// Set the colors used by [`Self::sheet_preview`]
    pub fn set_overlay_style(&mut self, style: OverlayStyle) {
        self.style = style;
    }

    /// Set the quantizer used by [`Self::encode_gif`]
    pub fn set_quantizer(&mut self, quantizer: Arc<dyn Quantizer>) {
        self.quantizer = quantizer;
    }

    /// Flip the discard state of a frame and repack.
    ///
    /// Returns `false` if no frame has `source_index`. If the repack fails
    /// the discard state is left as it was.
    pub fn toggle_discard(&mut self, source_index: usize) -> Result<bool> {
        let mut frames = self.frames.clone();
        if !frames.toggle_discard(source_index) {
            return Ok(false);
        }
        self.repack(frames)?;
        Ok(true)
    }

    /// Discard the frame under sheet point `(x, y)`.
    ///
    /// Returns the source index of the frame hit, or `None` for a miss.
    pub fn toggle_at(&mut self, x: i32, y: i32) -> Result<Option<usize>> {
        let Some(index) = self.hit_test(x, y) else {
            return Ok(None);
        };
        self.toggle_discard(index)?;
        Ok(Some(index))
    }

    /// Restore every discarded frame and repack.
    pub fn restore_all(&mut self) -> Result<()> {
        let mut frames = self.frames.clone();
        frames.restore_all();
        self.repack(frames)
    }

    /// Every loaded frame with the discard state
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// The packed sheet, absent until frames load or when all are discarded
    pub fn sheet(&self) -> Option<&PackedSheet> {
        self.packed.as_ref()
    }

    /// Source index of the frame under sheet point `(x, y)`
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.packed
            .as_ref()
            .and_then(|p| p.hit_test(x, y))
            .map(|c| c.source_index)
    }

    /// The packed sheet with cell outlines drawn over it
    pub fn sheet_preview(&self) -> Option<Surface> {
        self.packed
            .as_ref()
            .map(|p| render_sheet_overlay(p, &self.style))
    }

    /// Encode the active frames as an animated GIF.
    pub fn encode_gif(&self, options: &EncodeOptions) -> Result<Vec<u8>> {
        encode_frames(self.frames.active(), options, self.quantizer.as_ref())
    }

    /// Write the packed sheet as PNG.
    ///
    /// # Errors
    ///
    /// [`Error::Encode`] when no sheet is packed or the PNG writer fails.
    pub fn write_sheet_png<W: Write>(&self, writer: W) -> Result<()> {
        let packed = self
            .packed
            .as_ref()
            .ok_or(Error::Encode(IoError::NoFrames))?;
        write_png(&packed.sheet, writer).map_err(Error::Encode)
    }

    /// Preview playback state
    pub fn scheduler(&mut self) -> &mut PreviewScheduler {
        &mut self.scheduler
    }

    /// Advance the preview over the active frames.
    ///
    /// Returns the frame to show, see [`PreviewScheduler::poll`].
    pub fn poll_preview(&mut self, now: Duration) -> Option<&Frame> {
        let index = self.scheduler.poll(now, self.frames.active())?;
        self.frames.active().get(index)
    }

    fn apply_pack_options(&mut self, pack: PackOptions) -> Result<()> {
        if pack.columns == 0 {
            return Err(SheetError::InvalidGrid("columns must be at least 1".to_string()).into());
        }
        let packed = pack_active(&self.frames, &pack)?;
        self.pack = pack;
        self.packed = packed;
        Ok(())
    }

    fn repack(&mut self, frames: FrameSet) -> Result<()> {
        let packed = pack_active(&frames, &self.pack)?;
        self.frames = frames;
        self.packed = packed;
        Ok(())
    }
}

fn pack_active(frames: &FrameSet, pack: &PackOptions) -> Result<Option<PackedSheet>> {
    if frames.active().is_empty() {
        return Ok(None);
    }
    Ok(Some(pack_frames(frames.active(), pack)?))
}

impl fmt::Debug for GifSheetSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GifSheetSession")
            .field("frames", &self.frames.len())
            .field("discarded", self.frames.discarded())
            .field("pack", &self.pack)
            .finish()
    }
}

// =============================================================================
// Sprite sheet -> GIF
// =============================================================================

/// A background encode started by [`SheetGifSession::spawn_encode`]
#[derive(Debug)]
pub struct EncodeTicket {
    id: RequestId,
    job: EncodeJob,
}

impl EncodeTicket {
    /// Request this encode belongs to
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Whether the worker has finished
    pub fn is_finished(&self) -> bool {
        self.job.is_finished()
    }
}

/// Slice path: static sprite sheet to animated GIF
pub struct SheetGifSession {
    source: Option<Surface>,
    slice: SliceOptions,
    layout: Option<GridLayout>,
    frames: FrameSet,
    style: OverlayStyle,
    quantizer: Option<Arc<dyn Quantizer>>,
    guard: RequestGuard,
    scheduler: PreviewScheduler,
}

impl Default for SheetGifSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetGifSession {
    /// Create an empty session with the default grid and quantizer
    pub fn new() -> Self {
        Self::with_options(SliceOptions::default())
    }

    /// Create an empty session
    pub fn with_options(slice: SliceOptions) -> Self {
        Self {
            scheduler: PreviewScheduler::new(slice_timing(&slice)),
            source: None,
            slice,
            layout: None,
            frames: FrameSet::new(),
            style: OverlayStyle::default(),
            quantizer: Some(Arc::new(MedianCutQuantizer::new())),
            guard: RequestGuard::new(),
        }
    }

    /// Load a sprite sheet and slice it on the current grid.
    ///
    /// A background encode still running becomes stale.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGrid`] if the grid does not fit the image. The
    /// previous sheet and frames are kept.
    pub fn load_image(&mut self, image: Surface) -> Result<()> {
        self.reslice(image, self.slice.clone())?;
        self.guard.invalidate();
        self.scheduler.reset();
        Ok(())
    }

    /// Decode PNG or GIF bytes and load the result as the sheet.
    ///
    /// For GIF input the first frame is used.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let image = read_image_bytes(bytes).map_err(Error::Decode)?;
        self.load_image(image)
    }

    /// Change the grid and reslice.
    ///
    /// Reslicing clears the discard set. Without a loaded image the grid
    /// is only validated and stored.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGrid`] for zero columns or rows, or a grid that
    /// gives zero-size cells. The previous grid is kept.
    pub fn set_grid(&mut self, columns: u32, rows: u32, padding: u32) -> Result<()> {
        if columns == 0 || rows == 0 {
            return Err(SheetError::InvalidGrid(format!(
                "grid must be at least 1x1, got {columns}x{rows}"
            ))
            .into());
        }
        let slice = SliceOptions {
            columns,
            rows,
            padding,
            ..self.slice.clone()
        };
        match self.source.clone() {
            Some(source) => {
                self.reslice(source, slice)?;
                self.scheduler.reset();
            }
            None => self.slice = slice,
        }
        Ok(())
    }

    /// Current grid options
    pub fn slice_options(&self) -> &SliceOptions {
        &self.slice
    }

    /// Layout of the current slice
    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    /// The loaded sheet
    pub fn source(&self) -> Option<&Surface> {
        self.source.as_ref()
    }

    /// Flip the discard state of a frame.
    pub fn toggle_discard(&mut self, source_index: usize) -> bool {
        self.frames.toggle_discard(source_index)
    }

    /// Flip the discard state of the cell under source point `(x, y)`.
    pub fn toggle_at(&mut self, x: i32, y: i32) -> Option<usize> {
        let index = self.layout.as_ref()?.cell_at(x, y)?;
        self.frames.toggle_discard(index).then_some(index)
    }

    /// Mark every frame active.
    pub fn restore_all(&mut self) {
        self.frames.restore_all();
    }

    /// Sliced frames with the discard state
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// The sheet with grid lines, padding outlines and discarded cells marked
    pub fn grid_preview(&self) -> Option<Surface> {
        let source = self.source.as_ref()?;
        let layout = self.layout.as_ref()?;
        Some(render_slice_overlay(
            source,
            layout,
            self.frames.discarded(),
            &self.style,
        ))
    }

    /// Set the colors used by [`Self::grid_preview`]
    pub fn set_overlay_style(&mut self, style: OverlayStyle) {
        self.style = style;
    }

    /// Install or remove the palette quantizer.
    pub fn set_quantizer(&mut self, quantizer: Option<Arc<dyn Quantizer>>) {
        self.quantizer = quantizer;
    }

    /// Encode the active frames as an animated GIF.
    ///
    /// # Errors
    ///
    /// [`Error::Palette`] when no quantizer is installed, otherwise as
    /// [`encode_frames`].
    pub fn encode_gif(&self, options: &EncodeOptions) -> Result<Vec<u8>> {
        let quantizer = self.quantizer()?;
        encode_frames(self.frames.active(), options, quantizer.as_ref())
    }

    /// Start encoding the active frames on a worker thread.
    ///
    /// The worker gets its own copy of the frames. Finish with
    /// [`Self::complete_encode`].
    ///
    /// # Errors
    ///
    /// [`Error::Busy`] while another encode is in flight and
    /// [`Error::Palette`] when no quantizer is installed.
    pub fn spawn_encode<F>(&mut self, options: EncodeOptions, progress: F) -> Result<EncodeTicket>
    where
        F: FnMut(EncodeProgress) + Send + 'static,
    {
        let quantizer = self.quantizer()?;
        let id = self.guard.begin()?;
        let frames: Vec<Frame> = self.frames.active().iter().map(Frame::deep_clone).collect();
        log::debug!("encode {id} started with {} frames", frames.len());
        match EncodeJob::spawn(frames, options, quantizer, progress) {
            Ok(job) => Ok(EncodeTicket { id, job }),
            Err(e) => {
                self.guard.invalidate();
                Err(e)
            }
        }
    }

    /// Wait for a background encode and take its GIF bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Stale`] if the session was reloaded after the encode
    /// started, otherwise the encode's own error.
    pub fn complete_encode(&mut self, ticket: EncodeTicket) -> Result<Vec<u8>> {
        let EncodeTicket { id, job } = ticket;
        let result = job.join();
        self.guard.finish(id)?;
        result
    }

    /// Check whether a background encode is in flight
    pub fn is_encoding(&self) -> bool {
        self.guard.is_busy()
    }

    /// Preview playback state
    pub fn scheduler(&mut self) -> &mut PreviewScheduler {
        &mut self.scheduler
    }

    /// Advance the preview over the active frames.
    pub fn poll_preview(&mut self, now: Duration) -> Option<&Frame> {
        let index = self.scheduler.poll(now, self.frames.active())?;
        self.frames.active().get(index)
    }

    fn quantizer(&self) -> Result<Arc<dyn Quantizer>> {
        self.quantizer
            .clone()
            .ok_or(Error::Palette(ColorError::QuantizerUnavailable))
    }

    fn reslice(&mut self, source: Surface, slice: SliceOptions) -> Result<()> {
        let sliced = slice_sheet(&source, &slice)?;
        self.frames = FrameSet::from_frames(sliced.frames);
        self.layout = Some(sliced.layout);
        self.source = Some(source);
        self.slice = slice;
        Ok(())
    }
}

/// Sliced frames preview at a fixed rate from the slice delay, floored at
/// [`MIN_PLAYBACK_DELAY_MS`](spritegif_core::MIN_PLAYBACK_DELAY_MS).
fn slice_timing(slice: &SliceOptions) -> PlaybackTiming {
    PlaybackTiming::Fps(1000.0 / slice.delay_ms as f32)
}

impl fmt::Debug for SheetGifSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetGifSession")
            .field("source", &self.source.as_ref().map(Surface::dimensions))
            .field("slice", &self.slice)
            .field("frames", &self.frames.len())
            .field("encoding", &self.guard.current())
            .finish()
    }
}
