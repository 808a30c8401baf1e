//! Frame timing and scheduling
//!
//! `FrameClock` turns callback timestamps into clamped elapsed times.
//! `FrameLoop` owns the single pending frame request so a loop can never be
//! scheduled twice, whatever order start and stop are called in.

use crate::consts::MAX_FRAME_MS;

/// Elapsed time between frame callbacks
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp; the next `advance` returns `None`
    pub fn restart(&mut self) {
        self.last = None;
    }

    /// Elapsed ms since the previous call, clamped to `[0, MAX_FRAME_MS]`
    pub fn advance(&mut self, timestamp_ms: f64) -> Option<f32> {
        let previous = self.last.replace(timestamp_ms)?;
        Some(((timestamp_ms - previous) as f32).clamp(0.0, MAX_FRAME_MS))
    }
}

/// Something that can request and cancel one frame callback
pub trait FrameScheduler {
    type Handle: Copy;

    /// Request the next frame; `None` if the host refused
    fn request(&mut self) -> Option<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Schedule a frame unless one is already pending; returns true if it did
    pub fn start(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = self.scheduler.request();
        if self.pending.is_none() {
            log::warn!("Frame request refused");
        }
        self.pending.is_some()
    }

    /// Cancel the pending frame, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Call first thing in the frame callback: the request has been consumed
    pub fn on_fired(&mut self) {
        self.pending = None;
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
