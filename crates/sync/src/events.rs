//! Change notifications backed by a `tokio::sync::broadcast` channel.
//!
//! [`ContentEvents`] is the fan-out hub the coordinator publishes on
//! whenever an entity's in-memory state changes, whether from an admin
//! write or a remote snapshot. It is shared via `Arc` and any number of
//! consumers can subscribe independently.

use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// Which synchronized entity changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEvent {
    ProjectsChanged,
    AboutChanged,
    ContactChanged,
    ThemeChanged,
}

/// In-process fan-out for [`ContentEvent`]s.
pub struct ContentEvents {
    sender: broadcast::Sender<ContentEvent>,
}

impl ContentEvents {
    /// Create a hub with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped
    /// and slow receivers observe a `RecvError::Lagged`; consumers react
    /// by re-reading the coordinator's current state, so a lost event is
    /// never a lost update.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped; the state it
    /// describes is already persisted.
    pub fn publish(&self, event: ContentEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.sender.subscribe()
    }
}

impl Default for ContentEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
