//! Synchronous event buses
//!
//! The engine's notification channels are all synchronous: every subscriber
//! runs before the emitting call returns, in registration order, so tests
//! and systems observe mutations deterministically. Nothing is queued or
//! deferred.
//!
//! The scene's signature-change funnel, surface lifecycle events, and raw
//! input notifications all ride on [`EventBus`].

/// An ordered list of subscribers invoked synchronously on emit
pub struct EventBus<E> {
    subscribers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber
    ///
    /// Subscribers are invoked in registration order and never removed.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&E) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Invoke every subscriber with the event, in registration order
    ///
    /// Returns only after every subscriber has run.
    pub fn emit(&mut self, event: &E) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
