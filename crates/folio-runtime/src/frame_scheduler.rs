#![forbid(unsafe_code)]

//! Animation-frame scheduling.
//!
//! Mirrors the browser's `requestAnimationFrame` / `cancelAnimationFrame`
//! pair as explicit bookkeeping: a request returns a [`FrameHandle`], a
//! cancel withdraws it, and when the host's frame fires it drains every
//! handle still pending with [`FrameScheduler::take_due`].
//!
//! # Invariants
//!
//! 1. Handles are unique and strictly increasing for the scheduler's lifetime.
//! 2. A cancelled handle is never returned by `take_due`.
//! 3. Requests made while a frame's callbacks run (after `take_due`) are
//!    deferred to the next frame.
//! 4. `take_due` returns handles in request order.

use tracing::trace;

/// Opaque id of one requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Anything that can schedule a callback for the next rendered frame.
pub trait FrameHost {
    /// Request a callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previous request. Unknown or already-fired handles are
    /// ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Host-side record of outstanding frame requests.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    frames_run: u64,
    cancelled: u64,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request.
    pub fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    /// Withdraw `handle`. Returns `true` if it was still pending.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        let removed = self.pending.len() != before;
        if removed {
            self.cancelled += 1;
            trace!(handle = handle.get(), "frame request cancelled");
        }
        removed
    }

    #[must_use]
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of frames that have been drained so far.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Number of requests withdrawn before they fired.
    #[must_use]
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }

    /// Fire the frame: drain and return every pending handle.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        self.frames_run += 1;
        std::mem::take(&mut self.pending)
    }

    /// Drop every pending request without running it.
    pub fn clear(&mut self) {
        self.cancelled += self.pending.len() as u64;
        self.pending.clear();
    }
}

impl FrameHost for FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.request()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_increasing() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request();
        let b = scheduler.request();
        assert!(b > a);
    }

    #[test]
    fn cancelled_handle_never_fires() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request();
        let b = scheduler.request();
        assert!(scheduler.cancel(a));
        assert_eq!(scheduler.take_due(), vec![b]);
        assert_eq!(scheduler.cancelled_count(), 1);
    }

    #[test]
    fn cancel_unknown_handle_is_noop() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request();
        let _ = scheduler.take_due();
        assert!(!scheduler.cancel(a));
        assert_eq!(scheduler.cancelled_count(), 0);
    }

    #[test]
    fn requests_after_take_due_wait_for_next_frame() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request();
        let due = scheduler.take_due();
        assert_eq!(due.len(), 1);
        let next = scheduler.request();
        assert!(scheduler.is_pending(next));
        assert_eq!(scheduler.take_due(), vec![next]);
        assert_eq!(scheduler.frames_run(), 2);
    }

    #[test]
    fn clear_drops_everything() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request();
        scheduler.request();
        scheduler.clear();
        assert_eq!(scheduler.pending_count(), 0);
        assert!(scheduler.take_due().is_empty());
        assert_eq!(scheduler.cancelled_count(), 2);
    }
}
