//! Engine-facing value types: loop mode, events and the now-playing item.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop at the end of the queue.
    NoLoop,
    /// Wrap around to the start of the queue.
    #[default]
    LoopAll,
}

impl LoopMode {
    pub fn is_looping(self) -> bool {
        self == Self::LoopAll
    }
}

/// Kinds of lifecycle events a subscriber can ask for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    TrackChanged,
    QueueFinished,
    Paused,
    Resumed,
    Stopped,
    MediaFailed,
}

/// Lifecycle events emitted by an engine on its own dispatch thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A new item started; its metadata is read back from the engine.
    TrackChanged,
    /// The last item of the queue ended and the engine is not looping.
    QueueFinished,
    Paused,
    Resumed,
    Stopped,
    /// An item could not be opened or decoded and was skipped.
    MediaFailed { path: PathBuf, reason: String },
}

impl EngineEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TrackChanged => EventKind::TrackChanged,
            Self::QueueFinished => EventKind::QueueFinished,
            Self::Paused => EventKind::Paused,
            Self::Resumed => EventKind::Resumed,
            Self::Stopped => EventKind::Stopped,
            Self::MediaFailed { .. } => EventKind::MediaFailed,
        }
    }
}

/// The item the engine is currently playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub path: PathBuf,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// How often the engine thread checks whether the current item ended.
    pub poll_interval: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
        }
    }
}
