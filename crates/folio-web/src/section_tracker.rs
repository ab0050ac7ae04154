#![forbid(unsafe_code)]

//! Scroll-driven active-section tracking for the navigation rail.
//!
//! [`SectionTracker`] maps the viewport's vertical scroll offset to one of
//! an ordered list of [`Region`]s and publishes the result as an
//! [`Observable<RegionId>`].
//!
//! # Lifecycle
//!
//! ```text
//! Unmounted ──mount──▶ AwaitingLayout ──layout ready──▶ Ready ──unmount──▶ TornDown
//!      │                                                  ▲
//!      └────────────mount (layout already ready)──────────┘
//! ```
//!
//! Region bounds are measured exactly once when the tracker becomes ready
//! and then cached; scroll handling never touches layout. An explicit
//! [`SectionTracker::refresh_bounds`] re-measures (after a resize, say).
//!
//! # Frame coalescing
//!
//! Every scroll notification cancels the pending frame request (if any)
//! and requests a new one. Only the frame whose handle is still current
//! runs the scan, and it reads the host's scroll offset at that moment, so
//! N scrolls inside one frame cost one scan against the latest position.
//!
//! # Invariants
//!
//! 1. At most one frame request is outstanding per tracker.
//! 2. Scroll and frame events are no-ops unless the tracker is `Ready`.
//! 3. After `unmount`, no listener and no frame request remains registered.
//! 4. A scan that matches no region leaves the active region unchanged.

use folio_core::{debug, trace};
use folio_runtime::{FrameHandle, ListenerId, ListenerKind, Observable};

#[cfg(feature = "site-config")]
use serde::{Deserialize, Serialize};

use crate::host::{DocumentHost, ScrollBehavior};
use crate::region::{Region, RegionBounds, RegionId, locate};

/// Default distance below the viewport top at which a region activates.
/// Roughly the height of the fixed header.
pub const DEFAULT_LOOKAHEAD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "site-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "site-config", serde(default))]
pub struct TrackerConfig {
    /// Added to the scroll offset before scanning region bounds.
    pub lookahead: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerPhase {
    Unmounted,
    AwaitingLayout { listener: ListenerId },
    Ready,
    TornDown,
}

/// Counters for observability and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Frame callbacks that actually scanned the bounds.
    pub scans: u64,
    /// Frame requests cancelled because a newer scroll superseded them.
    pub coalesced: u64,
    /// Active-region changes published.
    pub changes: u64,
    /// Bounds measurements (initial plus explicit refreshes).
    pub measurements: u64,
}

/// Tracks which page region is under the (lookahead-shifted) viewport top.
#[derive(Debug)]
pub struct SectionTracker {
    regions: Vec<Region>,
    config: TrackerConfig,
    bounds: Vec<RegionBounds>,
    phase: TrackerPhase,
    scroll_listener: Option<ListenerId>,
    pending_frame: Option<FrameHandle>,
    active: Observable<RegionId>,
    stats: TrackerStats,
}

impl SectionTracker {
    /// Create a tracker over `regions`. The first region starts active.
    #[must_use]
    pub fn new(regions: Vec<Region>, config: TrackerConfig) -> Self {
        let initial = regions
            .first()
            .map(|r| r.id.clone())
            .unwrap_or_else(|| RegionId::from_static(""));
        Self::with_initial(regions, initial, config)
    }

    /// Create a tracker with an explicit initial active region.
    #[must_use]
    pub fn with_initial(regions: Vec<Region>, initial: RegionId, config: TrackerConfig) -> Self {
        Self {
            regions,
            config,
            bounds: Vec::new(),
            phase: TrackerPhase::Unmounted,
            scroll_listener: None,
            pending_frame: None,
            active: Observable::new(initial),
            stats: TrackerStats::default(),
        }
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Cached bounds in declared region order. Empty until ready.
    #[must_use]
    pub fn bounds(&self) -> &[RegionBounds] {
        &self.bounds
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == TrackerPhase::Ready
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.phase == TrackerPhase::TornDown
    }

    #[must_use]
    pub fn active(&self) -> RegionId {
        self.active.get()
    }

    /// Shared handle to the active region for rendering code.
    #[must_use]
    pub fn active_signal(&self) -> &Observable<RegionId> {
        &self.active
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    #[must_use]
    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    /// Register listeners and measure bounds, deferring measurement until
    /// the document's layout is ready. Only the first call has any effect.
    pub fn mount<H: DocumentHost + ?Sized>(&mut self, host: &mut H) {
        if self.phase != TrackerPhase::Unmounted {
            return;
        }
        self.scroll_listener = Some(host.add_listener(ListenerKind::Scroll));

        if host.ready_state().is_layout_ready() {
            self.measure(&*host);
            self.phase = TrackerPhase::Ready;
            debug!(regions = self.regions.len(), "section tracker ready");
        } else {
            let listener = host.add_listener(ListenerKind::LayoutReady);
            self.phase = TrackerPhase::AwaitingLayout { listener };
            debug!("section tracker deferred until layout is ready");
        }
    }

    /// The document's layout became ready: measure once and stop listening.
    pub fn on_layout_ready<H: DocumentHost + ?Sized>(&mut self, host: &mut H) {
        let TrackerPhase::AwaitingLayout { listener } = self.phase else {
            return;
        };
        self.measure(&*host);
        host.remove_listener(listener);
        self.phase = TrackerPhase::Ready;
        debug!(regions = self.regions.len(), "section tracker ready");
    }

    /// Re-measure the bounds cache. Only valid once ready.
    pub fn refresh_bounds<H: DocumentHost + ?Sized>(&mut self, host: &H) {
        if self.phase == TrackerPhase::Ready {
            self.measure(host);
        }
    }

    fn measure<H: DocumentHost + ?Sized>(&mut self, host: &H) {
        self.bounds = self
            .regions
            .iter()
            .map(|region| match host.element_layout(region.id.as_str()) {
                Some(layout) => {
                    RegionBounds::new(region.id.clone(), layout.offset_top, layout.offset_height)
                }
                None => {
                    trace!(region = %region.id, "region element missing; using empty bounds");
                    RegionBounds::empty(region.id.clone())
                }
            })
            .collect();
        self.stats.measurements += 1;
    }

    /// A scroll happened: replace any pending frame check with a new one.
    pub fn on_scroll<H: DocumentHost + ?Sized>(&mut self, host: &mut H) {
        if self.phase != TrackerPhase::Ready {
            return;
        }
        if let Some(stale) = self.pending_frame.take() {
            host.cancel_frame(stale);
            self.stats.coalesced += 1;
            trace!(handle = stale.get(), "superseded pending section scan");
        }
        self.pending_frame = Some(host.request_frame());
    }

    /// A frame fired. If `handle` is this tracker's current request, scan
    /// the bounds against the host's latest scroll offset.
    ///
    /// Returns `true` if the active region changed.
    pub fn on_frame<H: DocumentHost + ?Sized>(&mut self, handle: FrameHandle, host: &H) -> bool {
        if self.pending_frame != Some(handle) {
            return false;
        }
        self.pending_frame = None;
        if self.phase != TrackerPhase::Ready {
            return false;
        }
        self.scan(host.scroll_y())
    }

    /// Scan for the region under `scroll_y + lookahead` and publish it.
    ///
    /// Returns `true` if the active region changed.
    pub fn scan(&mut self, scroll_y: f64) -> bool {
        self.stats.scans += 1;
        let position = scroll_y + self.config.lookahead;
        let Some(hit) = locate(&self.bounds, position) else {
            return false;
        };
        let previous = self.active.get();
        if previous == hit.id {
            return false;
        }
        let next = hit.id.clone();
        debug!(from = %previous, to = %next, position, "active section changed");
        self.stats.changes += 1;
        self.active.set(next)
    }

    /// Smooth-scroll the viewport to the cached top of region `id`.
    ///
    /// Returns `false` (and does nothing) for an id with no cached bounds.
    pub fn navigate_to<H: DocumentHost + ?Sized>(&self, id: &str, host: &mut H) -> bool {
        match self.bounds.iter().find(|b| b.id == id) {
            Some(bounds) => {
                host.scroll_to(bounds.top, ScrollBehavior::Smooth);
                true
            }
            None => {
                debug!(region = id, "navigation to unknown section ignored");
                false
            }
        }
    }

    /// Remove listeners and cancel any pending frame check.
    pub fn unmount<H: DocumentHost + ?Sized>(&mut self, host: &mut H) {
        if let TrackerPhase::AwaitingLayout { listener } = self.phase {
            host.remove_listener(listener);
        }
        if let Some(listener) = self.scroll_listener.take() {
            host.remove_listener(listener);
        }
        if let Some(handle) = self.pending_frame.take() {
            host.cancel_frame(handle);
        }
        self.phase = TrackerPhase::TornDown;
        debug!("section tracker torn down");
    }
}
