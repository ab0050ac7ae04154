#![forbid(unsafe_code)]

//! Platform-independent site runner.
//!
//! [`SiteCore`] owns one [`HostDocument`] and every interactive component
//! on the page, routes host events to them and advances their animations
//! once per frame. The wasm bindings and the native tests drive the same
//! type; nothing here touches JS.
//!
//! Pointer targets are card indices: `0..PROJECTS.len()` are project cards
//! (tilt), the following `POSTS.len()` indices are post cards (hover lift).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::event::{HostEvent, PointerEvent, PointerPhase, ReadyState, ScrollEvent};
use folio_core::geometry::{ClientRect, Point};
use folio_core::{debug, info, trace};
use folio_runtime::Subscription;
use folio_web::content::{HERO_CTA_TARGET, POSTS, PROJECTS, SECTIONS};
use folio_web::host::{DocumentHost, ElementLayout, HostCommand, HostDocument};
use folio_web::input_parser::parse_encoded_input;
use folio_web::region::RegionId;
use folio_web::scene::BreathingPlane;
use folio_web::{
    DeterministicClock, HoverLift, NavItem, NavRail, ParallaxCamera, ReadingProgress, RevealGroup,
    SectionTracker, SiteConfig, TiltInteractor, WebError,
};

/// DOM id of the project grid container.
pub const PROJECT_GRID_ID: &str = "project-grid";
/// DOM id of the writing list container.
pub const WRITING_LIST_ID: &str = "writing-list";

/// Outcome of one [`SiteCore::frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub frame_idx: u64,
    /// Clock delta applied to every animation this frame.
    pub dt: Duration,
    pub active: RegionId,
    /// Whether the active section changed during this frame.
    pub active_changed: bool,
    /// Whether anything is still moving; the host may stop requesting
    /// frames when this is `false` and no input arrives.
    pub animating: bool,
}

/// Every interactive component of the page behind one host document.
pub struct SiteCore {
    config: SiteConfig,
    doc: HostDocument,
    clock: DeterministicClock,
    tracker: SectionTracker,
    nav: NavRail,
    cards: Vec<TiltInteractor>,
    lifts: Vec<HoverLift>,
    progress: ReadingProgress,
    project_reveal: RevealGroup,
    writing_reveal: RevealGroup,
    camera: ParallaxCamera,
    plane: BreathingPlane,
    scene_pointer: Point,
    viewport: ClientRect,
    section_changes: Rc<RefCell<Vec<RegionId>>>,
    _section_watch: Subscription,
    frame_idx: u64,
    mounted: bool,
}

impl SiteCore {
    /// Build the page's components from `config`. The document starts in
    /// the `Loading` state; nothing is registered until [`mount`](Self::mount).
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let tracker = SectionTracker::new(SECTIONS.to_vec(), config.tracker);
        let nav = NavRail::new(&SECTIONS, tracker.active(), config.nav);
        let cards = PROJECTS
            .iter()
            .map(|project| TiltInteractor::new(project.element_id(), config.tilt))
            .collect();
        let lifts = POSTS.iter().map(|_| HoverLift::default()).collect();

        let section_changes = Rc::new(RefCell::new(Vec::new()));
        let section_watch = watch_sections(&tracker, &section_changes);

        Self {
            doc: HostDocument::new(ReadyState::Loading),
            clock: DeterministicClock::new(),
            tracker,
            nav,
            cards,
            lifts,
            progress: ReadingProgress::new(config.progress),
            project_reveal: RevealGroup::new(PROJECTS.len(), config.reveal),
            writing_reveal: RevealGroup::new(POSTS.len(), config.reveal),
            camera: ParallaxCamera::new(&config.scene),
            plane: BreathingPlane::from_config(&config.scene),
            scene_pointer: Point::default(),
            viewport: ClientRect::default(),
            section_changes,
            _section_watch: section_watch,
            frame_idx: 0,
            mounted: false,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn document(&self) -> &HostDocument {
        &self.doc
    }

    #[must_use]
    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.doc.set_ready_state(state);
    }

    pub fn set_element_layout(&mut self, id: &str, offset_top: f64, offset_height: f64) {
        self.doc
            .set_element_layout(id, ElementLayout::new(offset_top, offset_height));
    }

    /// Record a bounding box and re-test reveal containers against it.
    pub fn set_element_rect(&mut self, id: &str, rect: ClientRect) {
        self.doc.set_bounding_rect(id, rect);
        if id == PROJECT_GRID_ID || id == WRITING_LIST_ID {
            self.observe_reveals();
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = ClientRect::new(0.0, 0.0, width.max(0.0), height.max(0.0));
        self.observe_reveals();
    }

    /// Register listeners and (once layout is ready) measure sections.
    /// After [`unmount`](Self::unmount) this starts a fresh tracker that
    /// keeps the last active section.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        if self.tracker.is_torn_down() {
            self.tracker = SectionTracker::with_initial(
                SECTIONS.to_vec(),
                self.tracker.active(),
                self.config.tracker,
            );
            self._section_watch = watch_sections(&self.tracker, &self.section_changes);
            debug!("section tracker rebuilt for remount");
        }
        self.tracker.mount(&mut self.doc);
        self.mounted = true;
        info!(
            sections = SECTIONS.len(),
            cards = self.cards.len(),
            posts = self.lifts.len(),
            "site mounted"
        );
        self.observe_reveals();
    }

    /// Remove every listener, cancel pending frames and release hovers.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.tracker.unmount(&mut self.doc);
        for card in &mut self.cards {
            card.pointer_leave();
        }
        for lift in &mut self.lifts {
            lift.hover(false);
        }
        self.mounted = false;
        info!(frames = self.frame_idx, "site unmounted");
    }

    /// Route one host event. Frame events run [`frame`](Self::frame) and
    /// return its summary.
    pub fn dispatch(&mut self, event: HostEvent) -> Result<Option<FrameSummary>, WebError> {
        match event {
            HostEvent::ReadyState(state) => self.set_ready_state(state),
            HostEvent::LayoutReady => self.layout_ready(),
            HostEvent::Scroll(scroll) => self.scroll(scroll),
            HostEvent::Pointer(pointer) => self.pointer(pointer)?,
            HostEvent::ScenePointer(ndc) => self.scene_pointer = ndc,
            HostEvent::Resize { width, height } => self.resize(width, height),
            HostEvent::Frame { now } => return Ok(Some(self.frame(now))),
        }
        Ok(None)
    }

    /// Parse and dispatch one JSON-encoded host notification. Returns
    /// `false` for malformed, unsupported or rejected input.
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match parse_encoded_input(json) {
            Ok(Some(event)) => match self.dispatch(event) {
                Ok(_) => true,
                Err(err) => {
                    debug!(%err, "host input rejected");
                    false
                }
            },
            Ok(None) => false,
            Err(err) => {
                debug!(%err, "host input not parsed");
                false
            }
        }
    }

    /// `DOMContentLoaded` fired.
    pub fn layout_ready(&mut self) {
        self.tracker.on_layout_ready(&mut self.doc);
    }

    pub fn scroll(&mut self, scroll: ScrollEvent) {
        self.doc.set_scroll(scroll);
        self.progress.on_scroll(scroll);
        if self.mounted {
            self.tracker.on_scroll(&mut self.doc);
        }
        if scroll.viewport_height > 0.0 {
            self.viewport.height = scroll.viewport_height;
        }
        self.observe_reveals();
    }

    /// Viewport resized: section offsets may have moved.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.tracker.refresh_bounds(&self.doc);
        self.set_viewport(width, height);
    }

    fn pointer(&mut self, event: PointerEvent) -> Result<(), WebError> {
        match event.phase {
            PointerPhase::Enter => self.pointer_enter(event.target),
            PointerPhase::Move => self.pointer_move(event.target, event.position).map(|_| ()),
            PointerPhase::Leave => self.pointer_leave(event.target),
        }
    }

    pub fn pointer_enter(&mut self, card: usize) -> Result<(), WebError> {
        if let Some(tilt) = self.cards.get_mut(card) {
            tilt.pointer_enter(&self.doc);
            return Ok(());
        }
        self.lift_mut(card)?.hover(true);
        Ok(())
    }

    /// Returns whether the move changed a tilt target.
    pub fn pointer_move(&mut self, card: usize, position: Point) -> Result<bool, WebError> {
        if let Some(tilt) = self.cards.get_mut(card) {
            return Ok(tilt.pointer_move(position));
        }
        // Post cards only react to enter and leave.
        self.lift_mut(card).map(|_| false)
    }

    pub fn pointer_leave(&mut self, card: usize) -> Result<(), WebError> {
        if let Some(tilt) = self.cards.get_mut(card) {
            tilt.pointer_leave();
            return Ok(());
        }
        self.lift_mut(card)?.hover(false);
        Ok(())
    }

    fn lift_mut(&mut self, card: usize) -> Result<&mut HoverLift, WebError> {
        let index = card
            .checked_sub(self.cards.len())
            .ok_or(WebError::UnknownCard(card))?;
        self.lifts.get_mut(index).ok_or(WebError::UnknownCard(card))
    }

    /// Nav rail click or in-page anchor.
    pub fn navigate(&mut self, id: &str) -> bool {
        self.nav.click(id, &self.tracker, &mut self.doc)
    }

    /// The hero's "View Projects" button.
    pub fn scroll_to_projects(&mut self) -> bool {
        self.navigate(HERO_CTA_TARGET)
    }

    fn observe_reveals(&mut self) {
        if !self.mounted || self.viewport.is_empty() {
            return;
        }
        let viewport = self.viewport;
        for (id, group) in [
            (PROJECT_GRID_ID, &mut self.project_reveal),
            (WRITING_LIST_ID, &mut self.writing_reveal),
        ] {
            if let Some(rect) = self.doc.bounding_rect(id) {
                if group.observe(viewport, rect) {
                    debug!(container = id, "reveal triggered");
                }
            }
        }
    }

    /// Run one animation frame at monotonic time `now`.
    pub fn frame(&mut self, now: Duration) -> FrameSummary {
        let dt = self.clock.tick_to(now);
        self.frame_idx += 1;

        for handle in self.doc.take_due_frames() {
            self.tracker.on_frame(handle, &self.doc);
        }
        let changes: Vec<RegionId> = self.section_changes.borrow_mut().drain(..).collect();
        if let Some(latest) = changes.last() {
            self.nav.sync(latest);
        }

        self.nav.tick(dt);
        for card in &mut self.cards {
            card.tick(dt);
        }
        for lift in &mut self.lifts {
            lift.tick(dt);
        }
        self.progress.tick(dt);
        self.project_reveal.tick(dt);
        self.writing_reveal.tick(dt);
        self.camera.follow(self.scene_pointer);
        self.plane.displace(self.clock.now().as_secs_f32());

        let animating = !self.nav.is_settled()
            || !self.progress.is_settled()
            || self.cards.iter().any(|c| !c.is_settled())
            || self.lifts.iter().any(|l| !l.is_settled())
            || (self.project_reveal.is_triggered() && !self.project_reveal.is_complete())
            || (self.writing_reveal.is_triggered() && !self.writing_reveal.is_complete());

        trace!(
            frame = self.frame_idx,
            dt_us = dt.as_micros() as u64,
            animating,
            "frame"
        );

        FrameSummary {
            frame_idx: self.frame_idx,
            dt,
            active: self.tracker.active(),
            active_changed: !changes.is_empty(),
            animating,
        }
    }

    /// Commands queued for the host since the last call, oldest first.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        self.doc.drain_commands()
    }

    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        self.nav.items()
    }

    #[must_use]
    pub fn card(&self, card: usize) -> Option<&TiltInteractor> {
        self.cards.get(card)
    }

    #[must_use]
    pub fn progress(&self) -> &ReadingProgress {
        &self.progress
    }

    #[must_use]
    pub fn project_reveal(&self) -> &RevealGroup {
        &self.project_reveal
    }

    #[must_use]
    pub fn writing_reveal(&self) -> &RevealGroup {
        &self.writing_reveal
    }

    #[must_use]
    pub fn post_lift(&self, post: usize) -> Option<f64> {
        self.lifts.get(post).map(HoverLift::offset_y)
    }

    #[must_use]
    pub fn camera(&self) -> Point {
        self.camera.position()
    }

    /// Breathing plane vertex buffer as of the last frame.
    #[must_use]
    pub fn plane_positions(&self) -> &[f32] {
        self.plane.positions()
    }

    /// View state for the host's render layer.
    #[must_use]
    pub fn snapshot_json(&self) -> String {
        let t = self.clock.now().as_secs_f64();
        let rotation = BreathingPlane::rotation(t);
        let nav: Vec<serde_json::Value> = self
            .nav
            .items()
            .into_iter()
            .map(|item| {
                serde_json::json!({
                    "id": item.id.as_str(),
                    "label": item.label,
                    "active": item.active,
                    "height": item.indicator_height,
                })
            })
            .collect();
        let cards: Vec<serde_json::Value> = self
            .cards
            .iter()
            .map(|card| {
                let rotation = card.rotation();
                serde_json::json!({
                    "id": card.element_id(),
                    "rotate_x": rotation.rotate_x_deg,
                    "rotate_y": rotation.rotate_y_deg,
                    "transform": rotation.css(),
                })
            })
            .collect();
        let reveal = |group: &RevealGroup| {
            let items: Vec<serde_json::Value> = (0..group.len())
                .filter_map(|i| group.item(i))
                .map(|style| serde_json::json!({"opacity": style.opacity, "y": style.translate_y}))
                .collect();
            serde_json::json!({
                "triggered": group.is_triggered(),
                "opacity": group.container_opacity(),
                "items": items,
            })
        };
        let camera = self.camera.position();
        serde_json::json!({
            "frame": self.frame_idx,
            "active": self.tracker.active().as_str(),
            "nav": nav,
            "cards": cards,
            "posts": self.lifts.iter().map(HoverLift::offset_y).collect::<Vec<_>>(),
            "progress": self.progress.scale_x(),
            "reveal": {
                "projects": reveal(&self.project_reveal),
                "writing": reveal(&self.writing_reveal),
            },
            "scene": {
                "camera": [camera.x, camera.y],
                "rotation": [rotation.x, rotation.z],
            },
        })
        .to_string()
    }
}

fn watch_sections(
    tracker: &SectionTracker,
    changes: &Rc<RefCell<Vec<RegionId>>>,
) -> Subscription {
    let sink = Rc::clone(changes);
    tracker
        .active_signal()
        .subscribe(move |id: &RegionId| sink.borrow_mut().push(id.clone()))
}

/// JSON form of a host command for the browser glue.
#[must_use]
pub fn command_json(command: &HostCommand) -> serde_json::Value {
    match *command {
        HostCommand::ScrollTo { top, behavior } => serde_json::json!({
            "op": "scroll_to",
            "top": top,
            "behavior": behavior.as_dom(),
        }),
        HostCommand::AddListener { id, kind } => serde_json::json!({
            "op": "add_listener",
            "id": id.get(),
            "event": kind.dom_event(),
        }),
        HostCommand::RemoveListener { id, kind } => serde_json::json!({
            "op": "remove_listener",
            "id": id.get(),
            "event": kind.dom_event(),
        }),
    }
}
