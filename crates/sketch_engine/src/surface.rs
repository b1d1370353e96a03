//! Rendering surfaces
//!
//! A surface is the engine's stand-in for a window: it has an extent, a
//! lifecycle state, a notification channel with ready/update events, and
//! a render queue that surface-mode systems record into. Actual OS
//! windowing and GPU presentation are backend concerns outside the core;
//! the frame loop treats a surface as current while it hands it to a
//! system.

use crate::events::EventBus;
use crate::render::RenderQueue;

/// Identity of a surface within one engine context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub(crate) u32);

impl SurfaceId {
    /// The raw surface number
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Surface lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// Created but not yet announced to subscribers
    New,
    /// Live and receiving per-frame updates
    Valid,
    /// Closed; removed from the frame loop
    Invalid,
}

/// Surface lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface became live; emitted once, before the first update
    Ready,
    /// A new frame is starting on this surface
    Update,
}

/// A headless rendering surface
pub struct Surface {
    id: SurfaceId,
    name: String,
    width: u32,
    height: u32,
    state: SurfaceState,
    close_requested: bool,
    events: EventBus<SurfaceEvent>,
    queue: RenderQueue,
}

impl Surface {
    pub(crate) fn new(id: SurfaceId, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id,
            name: name.into(),
            width,
            height,
            state: SurfaceState::New,
            close_requested: false,
            events: EventBus::new(),
            queue: RenderQueue::new(),
        }
    }

    /// The surface's id
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// The surface's title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extent in pixels as (width, height)
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Current lifecycle state
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Whether the surface is still part of the frame loop
    pub fn is_valid(&self) -> bool {
        self.state != SurfaceState::Invalid
    }

    /// Ask the frame loop to destroy this surface
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Whether a close has been requested
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Subscribe to lifecycle notifications
    pub fn on_event(&mut self, subscriber: impl FnMut(&SurfaceEvent) + 'static) {
        self.events.subscribe(subscriber);
    }

    /// The surface's frame-local render queue
    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    /// Mutable access to the render queue (for submitting draws)
    pub fn queue_mut(&mut self) -> &mut RenderQueue {
        &mut self.queue
    }

    /// Announce the surface if new, then begin a frame on it
    ///
    /// Emits `Ready` exactly once over the surface's lifetime; emits
    /// `Update` on every later call while the surface is valid.
    pub(crate) fn begin_frame(&mut self) {
        match self.state {
            SurfaceState::New => {
                self.events.emit(&SurfaceEvent::Ready);
                self.state = SurfaceState::Valid;
            }
            SurfaceState::Valid => {
                self.events.emit(&SurfaceEvent::Update);
            }
            SurfaceState::Invalid => {}
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.state = SurfaceState::Invalid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_ready_once_then_updates() {
        let mut surface = Surface::new(SurfaceId(0), "test", 600, 600);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        surface.on_event(move |event| sink.borrow_mut().push(*event));

        surface.begin_frame();
        surface.begin_frame();
        surface.begin_frame();

        assert_eq!(
            *seen.borrow(),
            vec![SurfaceEvent::Ready, SurfaceEvent::Update, SurfaceEvent::Update]
        );
        assert_eq!(surface.state(), SurfaceState::Valid);
    }

    #[test]
    fn test_invalid_surface_emits_nothing() {
        let mut surface = Surface::new(SurfaceId(1), "test", 10, 10);
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        surface.on_event(move |_| *sink.borrow_mut() += 1);

        surface.invalidate();
        surface.begin_frame();
        assert_eq!(*seen.borrow(), 0);
        assert!(!surface.is_valid());
    }
}
