//! Synchronization between the remote document store, the local snapshot
//! store, and in-memory content state.
//!
//! The [`coordinator::SyncCoordinator`] owns all published content; the
//! [`watcher::ContentWatcher`] keeps it in step with the remote store
//! when one is configured; [`events::ContentEvents`] fans change
//! notifications out to consumers.

pub mod coordinator;
pub mod error;
pub mod events;
pub mod state;
pub mod watcher;

pub use coordinator::SyncCoordinator;
pub use error::SyncError;
pub use events::{ContentEvent, ContentEvents};
pub use watcher::ContentWatcher;
