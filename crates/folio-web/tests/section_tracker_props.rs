//! Property tests for scroll-driven section tracking.
//!
//! ## Invariants
//!
//! 1. After a frame, the active region is the first region whose
//!    `[top, bottom)` contains `scroll + lookahead`, or unchanged if none does.
//! 2. Delivering the same offset several times inside one frame is
//!    indistinguishable from delivering it once.
//! 3. After `unmount`, no frame request and no listener remains registered,
//!    whatever happened before.

use folio_core::event::{ReadyState, ScrollEvent};
use folio_web::host::{ElementLayout, HostCommand, HostDocument};
use folio_web::region::{Region, RegionId};
use folio_web::section_tracker::{SectionTracker, TrackerConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const IDS: [&str; 5] = ["r0", "r1", "r2", "r3", "r4"];

fn regions(count: usize) -> Vec<Region> {
    IDS[..count].iter().map(|&id| Region::new(id, id)).collect()
}

/// Lay out `heights.len()` regions top to bottom starting at `origin`.
fn document(origin: f64, heights: &[f64], ready: ReadyState) -> HostDocument {
    let mut doc = HostDocument::new(ready);
    let mut top = origin;
    for (id, height) in IDS.iter().zip(heights) {
        doc.set_element_layout(*id, ElementLayout::new(top, *height));
        top += height;
    }
    doc
}

fn scroll_to(doc: &mut HostDocument, tracker: &mut SectionTracker, offset_y: f64) {
    doc.set_scroll(ScrollEvent {
        offset_y,
        scroll_height: 10_000.0,
        viewport_height: 800.0,
    });
    tracker.on_scroll(doc);
}

fn run_frame(doc: &mut HostDocument, tracker: &mut SectionTracker) {
    for handle in doc.take_due_frames() {
        tracker.on_frame(handle, &*doc);
    }
}

/// First region containing `position`, straight from the layout.
fn expected(origin: f64, heights: &[f64], position: f64) -> Option<RegionId> {
    let mut top = origin;
    for (&id, height) in IDS.iter().zip(heights) {
        if top <= position && position < top + height {
            return Some(RegionId::from_static(id));
        }
        top += height;
    }
    None
}

fn arb_layout() -> impl Strategy<Value = (f64, Vec<f64>)> {
    (0.0f64..400.0, prop::collection::vec(0.0f64..1500.0, 1..=5))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn active_region_is_first_containing_match(
        (origin, heights) in arb_layout(),
        offsets in prop::collection::vec(-500.0f64..6000.0, 1..20),
    ) {
        let mut doc = document(origin, &heights, ReadyState::Complete);
        let mut tracker = SectionTracker::new(regions(heights.len()), TrackerConfig::default());
        tracker.mount(&mut doc);

        for offset in offsets {
            let before = tracker.active();
            scroll_to(&mut doc, &mut tracker, offset);
            run_frame(&mut doc, &mut tracker);
            let want = expected(origin, &heights, offset + 100.0).unwrap_or(before);
            prop_assert_eq!(tracker.active(), want);
        }
    }

    #[test]
    fn repeated_offset_in_one_frame_equals_single(
        (origin, heights) in arb_layout(),
        offset in -500.0f64..6000.0,
        repeats in 2usize..8,
    ) {
        let mut once_doc = document(origin, &heights, ReadyState::Complete);
        let mut once = SectionTracker::new(regions(heights.len()), TrackerConfig::default());
        once.mount(&mut once_doc);
        scroll_to(&mut once_doc, &mut once, offset);
        run_frame(&mut once_doc, &mut once);

        let mut many_doc = document(origin, &heights, ReadyState::Complete);
        let mut many = SectionTracker::new(regions(heights.len()), TrackerConfig::default());
        many.mount(&mut many_doc);
        for _ in 0..repeats {
            scroll_to(&mut many_doc, &mut many, offset);
        }
        run_frame(&mut many_doc, &mut many);

        prop_assert_eq!(once.active(), many.active());
        prop_assert_eq!(once.stats().scans, 1);
        prop_assert_eq!(many.stats().scans, 1);
        prop_assert_eq!(many.stats().coalesced, repeats as u64 - 1);
    }

    #[test]
    fn unmount_releases_everything(
        deferred in any::<bool>(),
        layout_fired in any::<bool>(),
        scrolls in 0usize..5,
        frame_before_unmount in any::<bool>(),
    ) {
        let ready = if deferred { ReadyState::Loading } else { ReadyState::Complete };
        let mut doc = document(0.0, &[500.0, 500.0], ready);
        let mut tracker = SectionTracker::new(regions(2), TrackerConfig::default());
        tracker.mount(&mut doc);
        if deferred && layout_fired {
            doc.set_ready_state(ReadyState::Interactive);
            tracker.on_layout_ready(&mut doc);
        }
        for i in 0..scrolls {
            scroll_to(&mut doc, &mut tracker, i as f64 * 300.0);
        }
        if frame_before_unmount {
            run_frame(&mut doc, &mut tracker);
        }

        tracker.unmount(&mut doc);

        prop_assert_eq!(doc.frames().pending_count(), 0);
        prop_assert!(doc.listeners().is_empty());
        prop_assert!(tracker.pending_frame().is_none());
    }
}

#[test]
fn boundary_offset_activates_lower_region() {
    let mut doc = document(0.0, &[100.0, 200.0], ReadyState::Complete);
    let mut tracker = SectionTracker::new(regions(2), TrackerConfig::default());
    tracker.mount(&mut doc);

    scroll_to(&mut doc, &mut tracker, 50.0);
    run_frame(&mut doc, &mut tracker);
    assert_eq!(tracker.active(), "r1");

    scroll_to(&mut doc, &mut tracker, -100.0);
    run_frame(&mut doc, &mut tracker);
    assert_eq!(tracker.active(), "r0");
}

#[test]
fn deferred_mount_ignores_scroll_until_layout_ready() {
    let mut doc = document(0.0, &[100.0, 200.0], ReadyState::Loading);
    let mut tracker = SectionTracker::new(regions(2), TrackerConfig::default());
    tracker.mount(&mut doc);
    assert!(!tracker.is_ready());

    scroll_to(&mut doc, &mut tracker, 150.0);
    assert!(doc.take_due_frames().is_empty());

    tracker.on_layout_ready(&mut doc);
    scroll_to(&mut doc, &mut tracker, 150.0);
    run_frame(&mut doc, &mut tracker);
    assert_eq!(tracker.active(), "r1");

    let commands = doc.drain_commands();
    let added = commands
        .iter()
        .filter(|c| matches!(c, HostCommand::AddListener { .. }))
        .count();
    let removed = commands
        .iter()
        .filter(|c| matches!(c, HostCommand::RemoveListener { .. }))
        .count();
    assert_eq!((added, removed), (2, 1));
}

#[test]
fn unknown_navigation_issues_no_scroll() {
    let mut doc = document(0.0, &[100.0, 200.0], ReadyState::Complete);
    let mut tracker = SectionTracker::new(regions(2), TrackerConfig::default());
    tracker.mount(&mut doc);
    doc.drain_commands();

    assert!(!tracker.navigate_to("missing", &mut doc));
    assert!(doc.drain_commands().is_empty());
}
