//! FrameSet - Ordered frames with a discard index
//!
//! A `FrameSet` owns every frame of one decoded GIF or sliced sheet, plus
//! the set of source indices the user has discarded. The active subset is
//! recomputed on each mutation, so [`FrameSet::active`] always reflects the
//! latest discard state and keeps the original order.

use crate::error::{Error, Result};
use crate::frame::Frame;
use std::collections::BTreeSet;

/// Ordered frames with a discard index
#[derive(Debug, Clone, Default)]
pub struct FrameSet {
    all: Vec<Frame>,
    discarded: BTreeSet<usize>,
    active: Vec<Frame>,
}

impl FrameSet {
    /// Create an empty frame set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame set holding `frames`, none discarded
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        let mut set = Self::new();
        set.load(frames);
        set
    }

    /// Replace all frames and clear the discard set.
    pub fn load(&mut self, frames: Vec<Frame>) {
        self.all = frames;
        self.discarded.clear();
        self.recompute();
    }

    /// Flip the discard state of the frame with `source_index`.
    ///
    /// Returns `false` and changes nothing if no frame has that index.
    pub fn toggle_discard(&mut self, source_index: usize) -> bool {
        if !self.contains(source_index) {
            return false;
        }
        if !self.discarded.remove(&source_index) {
            self.discarded.insert(source_index);
        }
        self.recompute();
        true
    }

    /// Mark the frame with `source_index` active again.
    ///
    /// Returns `true` if the frame was discarded.
    pub fn restore(&mut self, source_index: usize) -> bool {
        let removed = self.discarded.remove(&source_index);
        if removed {
            self.recompute();
        }
        removed
    }

    /// Mark every frame active.
    pub fn restore_all(&mut self) {
        if !self.discarded.is_empty() {
            self.discarded.clear();
            self.recompute();
        }
    }

    /// Frames not discarded, in original order
    pub fn active(&self) -> &[Frame] {
        &self.active
    }

    /// Every frame, in original order
    pub fn all(&self) -> &[Frame] {
        &self.all
    }

    /// Check whether the frame with `source_index` is discarded
    pub fn is_discarded(&self, source_index: usize) -> bool {
        self.discarded.contains(&source_index)
    }

    /// Discarded source indices, ascending
    pub fn discarded(&self) -> &BTreeSet<usize> {
        &self.discarded
    }

    /// Total number of frames
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Check if there are no frames
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Number of frames not discarded
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Look up a frame by `source_index`
    pub fn get(&self, source_index: usize) -> Option<&Frame> {
        self.all.iter().find(|f| f.source_index == source_index)
    }

    /// Remove every frame.
    pub fn clear(&mut self) {
        self.all.clear();
        self.discarded.clear();
        self.active.clear();
    }

    /// Check that all frames share one size and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] for an empty set and
    /// [`Error::DimensionMismatch`] at the first frame of a different size.
    pub fn verify_dimensions(&self) -> Result<(u32, u32)> {
        let first = self.all.first().ok_or(Error::NullInput("empty frame set"))?;
        let expected = first.dimensions();
        for frame in &self.all[1..] {
            if frame.dimensions() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    actual: frame.dimensions(),
                });
            }
        }
        Ok(expected)
    }

    fn contains(&self, source_index: usize) -> bool {
        self.all.iter().any(|f| f.source_index == source_index)
    }

    fn recompute(&mut self) {
        self.active = self
            .all
            .iter()
            .filter(|f| !self.discarded.contains(&f.source_index))
            .cloned()
            .collect();
        log::debug!(
            "frame set recomputed: {} active of {} ({} discarded)",
            self.active.len(),
            self.all.len(),
            self.discarded.len()
        );
    }
}
