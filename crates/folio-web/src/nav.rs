#![forbid(unsafe_code)]

//! Navigation rail view model.
//!
//! One indicator per region; the active region's indicator grows to
//! `active_height`, the rest shrink to `inactive_height`. Heights are
//! spring-animated so switching sections morphs rather than jumps.

use std::time::Duration;

use folio_core::animation::spring::presets;
use folio_core::animation::{Animation, Spring, SpringConfig};

#[cfg(feature = "site-config")]
use serde::{Deserialize, Serialize};

use crate::host::DocumentHost;
use crate::region::{Region, RegionId};
use crate::section_tracker::SectionTracker;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "site-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "site-config", serde(default))]
pub struct NavConfig {
    pub active_height: f64,
    pub inactive_height: f64,
    pub spring: SpringConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            active_height: 24.0,
            inactive_height: 8.0,
            spring: presets::indicator(),
        }
    }
}

/// Render-ready state of one rail entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub id: RegionId,
    pub label: String,
    pub active: bool,
    pub indicator_height: f64,
}

#[derive(Debug, Clone)]
struct Indicator {
    region: Region,
    height: Spring,
}

/// Indicator state for every region, driven by the active region.
#[derive(Debug, Clone)]
pub struct NavRail {
    config: NavConfig,
    indicators: Vec<Indicator>,
    active: RegionId,
}

impl NavRail {
    #[must_use]
    pub fn new(regions: &[Region], active: RegionId, config: NavConfig) -> Self {
        let indicators = regions
            .iter()
            .map(|region| {
                let height = if region.id == active {
                    config.active_height
                } else {
                    config.inactive_height
                };
                Indicator {
                    region: region.clone(),
                    height: Spring::at(height, config.spring),
                }
            })
            .collect();
        Self {
            config,
            indicators,
            active,
        }
    }

    #[must_use]
    pub fn active(&self) -> &RegionId {
        &self.active
    }

    /// Retarget indicator heights for a newly active region.
    pub fn sync(&mut self, active: &RegionId) {
        if &self.active == active {
            return;
        }
        self.active = active.clone();
        for indicator in &mut self.indicators {
            let target = if indicator.region.id == *active {
                self.config.active_height
            } else {
                self.config.inactive_height
            };
            indicator.height.set_target(target);
        }
    }

    /// A rail entry was clicked: ask the tracker to scroll there.
    pub fn click<H: DocumentHost + ?Sized>(
        &self,
        id: &str,
        tracker: &SectionTracker,
        host: &mut H,
    ) -> bool {
        tracker.navigate_to(id, host)
    }

    pub fn tick(&mut self, dt: Duration) {
        for indicator in &mut self.indicators {
            indicator.height.tick(dt);
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.indicators.iter().all(|i| i.height.is_complete())
    }

    #[must_use]
    pub fn items(&self) -> Vec<NavItem> {
        self.indicators
            .iter()
            .map(|indicator| NavItem {
                id: indicator.region.id.clone(),
                label: indicator.region.label.to_string(),
                active: indicator.region.id == self.active,
                indicator_height: indicator.height.position(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rail() -> NavRail {
        let regions = [Region::new("hero", "Intro"), Region::new("projects", "Projects")];
        NavRail::new(&regions, "hero".into(), NavConfig::default())
    }

    #[test]
    fn initial_heights_match_active_state() {
        let items = rail().items();
        assert_eq!(items[0].indicator_height, 24.0);
        assert_eq!(items[1].indicator_height, 8.0);
        assert!(items[0].active);
        assert_eq!(items[1].label, "Projects");
    }

    #[test]
    fn sync_animates_toward_new_active() {
        let mut rail = rail();
        rail.sync(&"projects".into());
        let items = rail.items();
        assert!(items[1].active);
        assert_eq!(items[1].indicator_height, 8.0);

        rail.tick(Duration::from_millis(16));
        let mid = rail.items();
        assert!(mid[1].indicator_height > 8.0);
        assert!(mid[0].indicator_height < 24.0);

        for _ in 0..120 {
            rail.tick(Duration::from_millis(16));
        }
        assert!(rail.is_settled());
        let settled = rail.items();
        assert_eq!(settled[0].indicator_height, 8.0);
        assert_eq!(settled[1].indicator_height, 24.0);
    }

    #[test]
    fn click_scrolls_to_region_top() {
        use crate::host::{ElementLayout, HostCommand, HostDocument, ScrollBehavior};
        use crate::section_tracker::TrackerConfig;
        use folio_core::event::ReadyState;

        let regions = vec![Region::new("hero", "Intro"), Region::new("projects", "Projects")];
        let mut doc = HostDocument::new(ReadyState::Complete);
        doc.set_element_layout("hero", ElementLayout::new(0.0, 900.0));
        doc.set_element_layout("projects", ElementLayout::new(900.0, 1200.0));
        let mut tracker = SectionTracker::new(regions, TrackerConfig::default());
        tracker.mount(&mut doc);
        doc.drain_commands();

        let rail = rail();
        assert!(rail.click("projects", &tracker, &mut doc));
        assert_eq!(
            doc.drain_commands(),
            vec![HostCommand::ScrollTo {
                top: 900.0,
                behavior: ScrollBehavior::Smooth
            }]
        );
        assert!(!rail.click("nowhere", &tracker, &mut doc));
        assert!(doc.drain_commands().is_empty());
    }

    #[test]
    fn syncing_same_region_is_noop() {
        let mut rail = rail();
        rail.sync(&"hero".into());
        assert!(rail.is_settled());
    }
}
