//! Animation preview scheduling
//!
//! [`PreviewScheduler`] is a pull-based timer: the caller passes the current
//! monotonic time and frame list to [`PreviewScheduler::poll`], and the
//! scheduler answers whether the preview should move to another frame. It
//! holds at most one pending deadline, so stopping or resetting it leaves
//! nothing behind.

use spritegif_core::{Frame, MIN_DECODE_DELAY_MS, MIN_PLAYBACK_DELAY_MS, fps_interval_ms};
use std::time::Duration;

/// Where the preview takes its frame durations from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackTiming {
    /// Each frame's own `delay_ms`, floored at 20 ms
    #[default]
    PerFrame,
    /// A fixed interval from a frame rate, floored at 30 ms
    Fps(f32),
}

/// Cyclic frame preview with one pending deadline
#[derive(Debug, Clone, Default)]
pub struct PreviewScheduler {
    timing: PlaybackTiming,
    running: bool,
    index: usize,
    deadline: Option<Duration>,
}

impl PreviewScheduler {
    /// Create a stopped scheduler
    pub fn new(timing: PlaybackTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    /// Current timing source
    pub fn timing(&self) -> PlaybackTiming {
        self.timing
    }

    /// Change the timing source. Takes effect from the next scheduled frame.
    pub fn set_timing(&mut self, timing: PlaybackTiming) {
        self.timing = timing;
    }

    /// Start (or resume) playback; the next [`poll`](Self::poll) schedules
    /// the first deadline.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.deadline = None;
        }
    }

    /// Pause playback and drop the pending deadline.
    pub fn stop(&mut self) {
        self.running = false;
        self.deadline = None;
    }

    /// Stop and rewind to the first frame.
    pub fn reset(&mut self) {
        self.stop();
        self.index = 0;
    }

    /// Check whether playback is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index into the frame list of the frame being shown
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Time at which the preview next advances, if scheduled
    pub fn pending_deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// How long `frame` stays on screen under the current timing
    pub fn frame_delay(&self, frame: &Frame) -> Duration {
        let ms = match self.timing {
            PlaybackTiming::PerFrame => frame.delay_ms.max(MIN_DECODE_DELAY_MS),
            PlaybackTiming::Fps(fps) => fps_interval_ms(fps, MIN_PLAYBACK_DELAY_MS),
        };
        Duration::from_millis(ms as u64)
    }

    /// Advance the preview given the current time `now`.
    ///
    /// Returns the index to display when it changes, or when the first
    /// deadline is scheduled after [`start`](Self::start). An empty frame
    /// list stops playback.
    pub fn poll(&mut self, now: Duration, frames: &[Frame]) -> Option<usize> {
        if !self.running {
            return None;
        }
        if frames.is_empty() {
            log::debug!("preview stopped: no frames");
            self.reset();
            return None;
        }
        if self.index >= frames.len() {
            self.index = 0;
        }

        match self.deadline {
            None => {
                self.deadline = Some(now + self.frame_delay(&frames[self.index]));
                Some(self.index)
            }
            Some(deadline) if now >= deadline => {
                self.index = (self.index + 1) % frames.len();
                self.deadline = Some(now + self.frame_delay(&frames[self.index]));
                log::trace!("preview frame {}", self.index);
                Some(self.index)
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritegif_core::Surface;

    fn frames(delays: &[u32]) -> Vec<Frame> {
        delays
            .iter()
            .enumerate()
            .map(|(i, &d)| Frame {
                source_index: i,
                pixels: Surface::new(1, 1).unwrap(),
                delay_ms: d,
            })
            .collect()
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_per_frame_delays() {
        let list = frames(&[100, 10, 50]);
        let mut s = PreviewScheduler::new(PlaybackTiming::PerFrame);
        assert_eq!(s.poll(ms(0), &list), None);
        s.start();
        assert_eq!(s.poll(ms(0), &list), Some(0));
        assert_eq!(s.pending_deadline(), Some(ms(100)));
        assert_eq!(s.poll(ms(99), &list), None);
        assert_eq!(s.poll(ms(100), &list), Some(1));
        // 10 ms delay floors at 20
        assert_eq!(s.pending_deadline(), Some(ms(120)));
        assert_eq!(s.poll(ms(120), &list), Some(2));
        assert_eq!(s.poll(ms(170), &list), Some(0));
    }

    #[test]
    fn test_fps_floor() {
        let list = frames(&[100, 100]);
        let mut s = PreviewScheduler::new(PlaybackTiming::Fps(60.0));
        s.start();
        s.poll(ms(0), &list);
        assert_eq!(s.pending_deadline(), Some(ms(30)));
        s.set_timing(PlaybackTiming::Fps(10.0));
        assert_eq!(s.poll(ms(30), &list), Some(1));
        assert_eq!(s.pending_deadline(), Some(ms(130)));
    }

    #[test]
    fn test_stop_and_empty_cancel() {
        let list = frames(&[100, 100]);
        let mut s = PreviewScheduler::default();
        s.start();
        s.poll(ms(0), &list);
        s.stop();
        assert!(!s.is_running());
        assert_eq!(s.pending_deadline(), None);
        assert_eq!(s.poll(ms(500), &list), None);

        s.start();
        s.poll(ms(600), &list);
        assert_eq!(s.poll(ms(700), &[]), None);
        assert!(!s.is_running());
        assert_eq!(s.pending_deadline(), None);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_shrinking_list_wraps() {
        let mut s = PreviewScheduler::default();
        s.start();
        let list = frames(&[20, 20, 20]);
        s.poll(ms(0), &list);
        s.poll(ms(20), &list);
        s.poll(ms(40), &list);
        assert_eq!(s.current_index(), 2);
        let short = frames(&[20]);
        assert_eq!(s.poll(ms(60), &short), Some(0));
    }
}
