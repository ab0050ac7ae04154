#![forbid(unsafe_code)]

//! Host document model.
//!
//! [`DocumentHost`] is the seam between site components and whatever
//! actually owns the page: element geometry lookups, the scroll position,
//! scroll instructions, listener registration and frame scheduling.
//!
//! [`HostDocument`] is the host-driven implementation. The embedding
//! environment (JS glue, or a test) pushes layout snapshots and scroll
//! state into it; components issue instructions that are queued as
//! [`HostCommand`]s for the embedder to drain and execute.

use std::collections::{HashMap, VecDeque};

use folio_core::event::{ReadyState, ScrollEvent};
use folio_core::geometry::ClientRect;
use folio_runtime::{
    FrameHandle, FrameHost, FrameScheduler, ListenerId, ListenerKind, ListenerRegistry,
};

/// Document-relative vertical placement of an element
/// (`offsetTop` / `offsetHeight`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementLayout {
    pub offset_top: f64,
    pub offset_height: f64,
}

impl ElementLayout {
    #[must_use]
    pub const fn new(offset_top: f64, offset_height: f64) -> Self {
        Self {
            offset_top,
            offset_height,
        }
    }
}

/// How a scroll instruction should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

impl ScrollBehavior {
    /// Value for the DOM `ScrollToOptions.behavior` field.
    #[must_use]
    pub const fn as_dom(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Smooth => "smooth",
        }
    }
}

/// Instruction queued for the embedder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostCommand {
    ScrollTo { top: f64, behavior: ScrollBehavior },
    AddListener { id: ListenerId, kind: ListenerKind },
    RemoveListener { id: ListenerId, kind: ListenerKind },
}

/// Everything a site component may ask of the page.
pub trait DocumentHost: FrameHost {
    fn ready_state(&self) -> ReadyState;

    /// Layout of the element with DOM id `id`, if it exists.
    fn element_layout(&self, id: &str) -> Option<ElementLayout>;

    /// Current bounding box of the element with DOM id `id`, if it exists.
    fn bounding_rect(&self, id: &str) -> Option<ClientRect>;

    /// Current vertical scroll offset of the viewport.
    fn scroll_y(&self) -> f64;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);
}

/// Host-driven document state plus the outbound command queue.
#[derive(Debug, Clone, Default)]
pub struct HostDocument {
    ready_state: ReadyState,
    layouts: HashMap<String, ElementLayout>,
    rects: HashMap<String, ClientRect>,
    scroll: ScrollEvent,
    frames: FrameScheduler,
    listeners: ListenerRegistry,
    commands: VecDeque<HostCommand>,
}

impl HostDocument {
    #[must_use]
    pub fn new(ready_state: ReadyState) -> Self {
        Self {
            ready_state,
            ..Self::default()
        }
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    pub fn set_element_layout(&mut self, id: impl Into<String>, layout: ElementLayout) {
        self.layouts.insert(id.into(), layout);
    }

    pub fn set_bounding_rect(&mut self, id: impl Into<String>, rect: ClientRect) {
        self.rects.insert(id.into(), rect);
    }

    /// Forget an element entirely (both layout and bounding box).
    pub fn remove_element(&mut self, id: &str) {
        self.layouts.remove(id);
        self.rects.remove(id);
    }

    /// Record the latest scroll state reported by the embedder.
    pub fn set_scroll(&mut self, scroll: ScrollEvent) {
        self.scroll = scroll;
    }

    #[must_use]
    pub fn scroll(&self) -> ScrollEvent {
        self.scroll
    }

    #[must_use]
    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    /// Fire the frame: every handle requested and not cancelled since the
    /// previous frame.
    pub fn take_due_frames(&mut self) -> Vec<FrameHandle> {
        self.frames.take_due()
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    #[must_use]
    pub fn has_listener(&self, kind: ListenerKind) -> bool {
        self.listeners.has_listener(kind)
    }

    /// Commands queued since the last drain, oldest first.
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        self.commands.drain(..).collect()
    }

    #[must_use]
    pub fn pending_commands(&self) -> &VecDeque<HostCommand> {
        &self.commands
    }
}

impl FrameHost for HostDocument {
    fn request_frame(&mut self) -> FrameHandle {
        self.frames.request()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.cancel(handle);
    }
}

impl DocumentHost for HostDocument {
    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn element_layout(&self, id: &str) -> Option<ElementLayout> {
        self.layouts.get(id).copied()
    }

    fn bounding_rect(&self, id: &str) -> Option<ClientRect> {
        self.rects.get(id).copied()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll.offset_y
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.commands
            .push_back(HostCommand::ScrollTo { top, behavior });
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = self.listeners.add(kind);
        self.commands.push_back(HostCommand::AddListener { id, kind });
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if let Some(kind) = self.listeners.remove(id) {
            self.commands
                .push_back(HostCommand::RemoveListener { id, kind });
        }
    }
}
