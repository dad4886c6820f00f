//! Playback engine seam.
//!
//! The session, router and interpreter only talk to [`PlaybackEngine`]. The
//! shipped implementation is [`RodioEngine`], a list player that runs on its
//! own thread and dispatches lifecycle events from there, so subscriber
//! callbacks never run on the caller's thread.

mod cursor;
mod events;
mod player;
mod sink;
mod thread;
mod types;

#[cfg(test)]
pub mod testing;

use std::path::PathBuf;

use crate::error::EngineError;

pub use events::{EventCallback, SubscriptionId};
pub use player::RodioEngine;
pub use types::{EngineEvent, EngineOptions, EventKind, LoopMode};

/// Capability surface of a list player.
///
/// Commands are requests: a successful `next()` means the request was
/// accepted, not that the item changed. Item changes are announced through
/// [`EngineEvent::TrackChanged`].
pub trait PlaybackEngine: Send + Sync {
    /// Replace the media list with `items`, in order.
    fn set_queue(&self, items: &[PathBuf]) -> Result<(), EngineError>;
    fn set_loop_mode(&self, mode: LoopMode) -> Result<(), EngineError>;
    fn play(&self) -> Result<(), EngineError>;
    fn stop(&self) -> Result<(), EngineError>;
    fn next(&self) -> Result<(), EngineError>;
    fn previous(&self) -> Result<(), EngineError>;
    fn toggle_pause(&self) -> Result<(), EngineError>;

    fn subscribe(
        &self,
        kind: EventKind,
        callback: EventCallback,
    ) -> Result<SubscriptionId, EngineError>;
    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), EngineError>;

    /// Title of the item currently loaded in the player.
    fn current_title(&self) -> Result<String, EngineError>;
    /// Location of the item currently loaded in the player.
    fn current_location(&self) -> Result<PathBuf, EngineError>;

    /// Stop and drop the player. Must come before [`release_queue`](Self::release_queue).
    fn release_player(&self) -> Result<(), EngineError>;
    /// Drop the media list. Fails with [`EngineError::QueueInUse`] while the player is alive.
    fn release_queue(&self) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests;
