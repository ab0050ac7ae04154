#![forbid(unsafe_code)]

//! Entrance reveals and hover lift.
//!
//! A [`RevealGroup`] animates a list (the project grid, the writing list)
//! into view the first time its container intersects the viewport. The
//! container fades in, then each child fades in and slides up by
//! `item_offset_y`, starting `delay_children + index × stagger` after the
//! trigger. Once triggered a group never resets.
//!
//! [`HoverLift`] is the small upward nudge a post card gets on hover.

use std::time::Duration;

use folio_core::animation::spring::presets;
use folio_core::animation::{Animation, Spring, SpringConfig};
use folio_core::debug;
use folio_core::geometry::ClientRect;

#[cfg(feature = "site-config")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "site-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "site-config", serde(default))]
pub struct RevealConfig {
    /// Delay between successive children starting.
    pub stagger_ms: u64,
    /// Delay before the first child starts.
    pub delay_children_ms: u64,
    /// The viewport is shrunk by this much on every side before the
    /// intersection test, so a group triggers once it is properly on screen.
    pub viewport_margin: f64,
    /// Vertical offset a child slides up from.
    pub item_offset_y: f64,
    pub spring: SpringConfig,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 150,
            delay_children_ms: 100,
            viewport_margin: 50.0,
            item_offset_y: 30.0,
            spring: presets::reveal(),
        }
    }
}

/// Presentation of one child at the current instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub translate_y: f64,
}

#[derive(Debug, Clone)]
struct RevealItem {
    delay: Duration,
    started: bool,
    opacity: Spring,
    offset: Spring,
}

impl RevealItem {
    fn start(&mut self) {
        self.started = true;
        self.opacity.set_target(1.0);
        self.offset.set_target(0.0);
    }

    fn tick(&mut self, dt: Duration) {
        self.opacity.tick(dt);
        self.offset.tick(dt);
    }
}

/// Staggered, trigger-once entrance animation for a list of children.
#[derive(Debug, Clone)]
pub struct RevealGroup {
    config: RevealConfig,
    triggered: bool,
    elapsed: Duration,
    container: Spring,
    items: Vec<RevealItem>,
}

/// Start offset of child `index`.
#[must_use]
pub fn stagger_delay(config: &RevealConfig, index: usize) -> Duration {
    let stagger = config.stagger_ms.saturating_mul(index as u64);
    Duration::from_millis(config.delay_children_ms.saturating_add(stagger))
}

impl RevealGroup {
    #[must_use]
    pub fn new(count: usize, config: RevealConfig) -> Self {
        let items = (0..count)
            .map(|index| RevealItem {
                delay: stagger_delay(&config, index),
                started: false,
                opacity: Spring::at(0.0, config.spring),
                offset: Spring::at(config.item_offset_y, config.spring),
            })
            .collect();
        Self {
            config,
            triggered: false,
            elapsed: Duration::ZERO,
            container: Spring::at(0.0, config.spring),
            items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Test the container against the viewport. Returns `true` only on the
    /// observation that triggers the group.
    pub fn observe(&mut self, viewport: ClientRect, container: ClientRect) -> bool {
        if self.triggered {
            return false;
        }
        if !viewport.inset(self.config.viewport_margin).intersects(&container) {
            return false;
        }
        self.trigger();
        true
    }

    /// Start the entrance unconditionally.
    pub fn trigger(&mut self) {
        if self.triggered {
            return;
        }
        debug!(items = self.items.len(), "reveal group triggered");
        self.triggered = true;
        self.container.set_target(1.0);
    }

    pub fn tick(&mut self, dt: Duration) {
        if !self.triggered {
            return;
        }
        let before = self.elapsed;
        self.elapsed = self.elapsed.saturating_add(dt);
        self.container.tick(dt);
        for item in &mut self.items {
            if item.started {
                item.tick(dt);
            } else if self.elapsed >= item.delay {
                item.start();
                // Only the part of this frame after the start offset counts.
                item.tick(self.elapsed - item.delay.max(before));
            }
        }
    }

    /// Time since the group triggered.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn container_opacity(&self) -> f64 {
        f64::from(self.container.value())
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<RevealStyle> {
        self.items.get(index).map(|item| RevealStyle {
            opacity: f64::from(item.opacity.value()),
            translate_y: item.offset.position(),
        })
    }

    #[must_use]
    pub fn is_item_started(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.started)
    }

    /// Everything visible and at rest.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.triggered
            && self.container.is_complete()
            && self
                .items
                .iter()
                .all(|i| i.started && i.opacity.is_complete() && i.offset.is_complete())
    }
}

/// Upward hover offset for a card.
#[derive(Debug, Clone)]
pub struct HoverLift {
    lift: f64,
    offset: Spring,
    hovered: bool,
}

impl HoverLift {
    pub const DEFAULT_LIFT: f64 = -5.0;

    #[must_use]
    pub fn new(lift: f64, spring: SpringConfig) -> Self {
        Self {
            lift,
            offset: Spring::at(0.0, spring),
            hovered: false,
        }
    }

    pub fn hover(&mut self, hovered: bool) {
        self.hovered = hovered;
        self.offset
            .set_target(if hovered { self.lift } else { 0.0 });
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn tick(&mut self, dt: Duration) {
        self.offset.tick(dt);
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.offset.is_complete()
    }

    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.offset.position()
    }
}

impl Default for HoverLift {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIFT, presets::hover_lift())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn viewport() -> ClientRect {
        ClientRect::new(0.0, 0.0, 1280.0, 800.0)
    }

    #[test]
    fn stagger_delays_follow_index() {
        let config = RevealConfig::default();
        assert_eq!(stagger_delay(&config, 0), Duration::from_millis(100));
        assert_eq!(stagger_delay(&config, 3), Duration::from_millis(550));
    }

    #[test]
    fn offscreen_container_does_not_trigger() {
        let mut group = RevealGroup::new(3, RevealConfig::default());
        assert!(!group.observe(viewport(), ClientRect::new(0.0, 900.0, 1280.0, 400.0)));
        assert!(!group.is_triggered());
    }

    #[test]
    fn margin_delays_trigger() {
        let mut group = RevealGroup::new(3, RevealConfig::default());
        // Peeks 20px into the viewport: inside the 50px margin.
        assert!(!group.observe(viewport(), ClientRect::new(0.0, 780.0, 1280.0, 400.0)));
        assert!(group.observe(viewport(), ClientRect::new(0.0, 700.0, 1280.0, 400.0)));
    }

    #[test]
    fn triggers_once() {
        let mut group = RevealGroup::new(2, RevealConfig::default());
        let visible = ClientRect::new(0.0, 100.0, 1280.0, 400.0);
        assert!(group.observe(viewport(), visible));
        assert!(!group.observe(viewport(), visible));
    }

    #[test]
    fn children_start_in_stagger_order() {
        let mut group = RevealGroup::new(3, RevealConfig::default());
        group.trigger();
        group.tick(Duration::from_millis(99));
        assert!(!group.is_item_started(0));
        group.tick(Duration::from_millis(1));
        assert!(group.is_item_started(0));
        assert!(!group.is_item_started(1));
        group.tick(Duration::from_millis(150));
        assert!(group.is_item_started(1));
        assert!(!group.is_item_started(2));
    }

    #[test]
    fn untriggered_group_does_not_animate() {
        let mut group = RevealGroup::new(1, RevealConfig::default());
        group.tick(Duration::from_secs(2));
        assert_eq!(group.elapsed(), Duration::ZERO);
        assert_eq!(
            group.item(0),
            Some(RevealStyle {
                opacity: 0.0,
                translate_y: 30.0
            })
        );
    }

    #[test]
    fn group_settles_fully_visible() {
        let mut group = RevealGroup::new(4, RevealConfig::default());
        group.trigger();
        for _ in 0..240 {
            group.tick(MS_16);
        }
        assert!(group.is_complete());
        assert_eq!(group.container_opacity(), 1.0);
        for i in 0..4 {
            assert_eq!(
                group.item(i),
                Some(RevealStyle {
                    opacity: 1.0,
                    translate_y: 0.0
                })
            );
        }
        assert!(group.item(4).is_none());
    }

    #[test]
    fn hover_lift_rises_and_returns() {
        let mut lift = HoverLift::default();
        assert!(lift.is_settled());
        lift.hover(true);
        assert!(!lift.is_settled());
        for _ in 0..120 {
            lift.tick(MS_16);
        }
        assert!(lift.is_settled());
        assert!((lift.offset_y() + 5.0).abs() < 0.01);
        lift.hover(false);
        for _ in 0..120 {
            lift.tick(MS_16);
        }
        assert!(lift.offset_y().abs() < 0.01);
    }
}
