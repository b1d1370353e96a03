//! Input management
//!
//! The input manager tracks raw key down-state and notifies subscribers
//! whenever it changes. [`Axis`] and [`Axis2D`] smooth raw key state into
//! continuous values; they are updated explicitly once per frame rather
//! than self-registering against hidden global state.

pub mod axis;

pub use axis::{Axis, Axis2D};

use std::collections::HashSet;

use crate::events::EventBus;

/// Key codes understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Space bar
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
}

/// Raw input change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down
    KeyPressed(Key),
    /// A key came up
    KeyReleased(Key),
}

/// Tracks key down-state and publishes changes
#[derive(Default)]
pub struct InputManager {
    down: HashSet<Key>,
    events: EventBus<InputEvent>,
}

impl InputManager {
    /// Create an input manager with no keys down
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key-down transition from the platform layer
    pub fn press(&mut self, key: Key) {
        if self.down.insert(key) {
            self.events.emit(&InputEvent::KeyPressed(key));
        }
    }

    /// Feed a key-up transition from the platform layer
    pub fn release(&mut self, key: Key) {
        if self.down.remove(&key) {
            self.events.emit(&InputEvent::KeyReleased(key));
        }
    }

    /// Whether a key is currently held
    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// Subscribe to raw input changes
    pub fn on_change(&mut self, subscriber: impl FnMut(&InputEvent) + 'static) {
        self.events.subscribe(subscriber);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_down_state_tracks_transitions() {
        let mut input = InputManager::new();
        assert!(!input.is_down(Key::Left));

        input.press(Key::Left);
        assert!(input.is_down(Key::Left));

        input.release(Key::Left);
        assert!(!input.is_down(Key::Left));
    }

    #[test]
    fn test_notifications_fire_only_on_change() {
        let mut input = InputManager::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        input.on_change(move |event| sink.borrow_mut().push(*event));

        input.press(Key::Space);
        input.press(Key::Space); // repeat, no state change
        input.release(Key::Space);
        input.release(Key::Space); // repeat, no state change

        assert_eq!(
            *seen.borrow(),
            vec![
                InputEvent::KeyPressed(Key::Space),
                InputEvent::KeyReleased(Key::Space),
            ]
        );
    }
}
