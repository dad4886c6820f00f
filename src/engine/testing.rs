//! In-memory engine that records every call, for session and router tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::EngineError;

use super::PlaybackEngine;
use super::events::{EventBus, EventCallback, SubscriptionId};
use super::types::{EngineEvent, EventKind, LoopMode, MediaItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetQueue(Vec<PathBuf>),
    SetLoopMode(LoopMode),
    Play,
    Stop,
    Next,
    Previous,
    TogglePause,
    ReleasePlayer,
    ReleaseQueue,
    Subscribe(EventKind),
    Unsubscribe,
}

#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    bus: EventBus,
    items: Mutex<Vec<PathBuf>>,
    pos: Mutex<Option<usize>>,
    now: Mutex<Option<MediaItem>>,
    fail_commands: AtomicBool,
    fail_metadata: AtomicBool,
    advance_on_next: AtomicBool,
    player_released: AtomicBool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, including subscriptions.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Calls that drive playback, without subscription bookkeeping.
    pub fn commands(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Subscribe(_) | Call::Unsubscribe))
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.len()
    }

    /// Make every playback command fail as if the engine were gone.
    pub fn fail_commands(&self, fail: bool) {
        self.fail_commands.store(fail, Ordering::SeqCst);
    }

    /// Make title/location lookups fail.
    pub fn fail_metadata(&self, fail: bool) {
        self.fail_metadata.store(fail, Ordering::SeqCst);
    }

    /// When set, `next()` moves to the following queued item and delivers
    /// `TrackChanged` before returning, i.e. the event wins the race.
    pub fn advance_on_next(&self, advance: bool) {
        self.advance_on_next.store(advance, Ordering::SeqCst);
    }

    pub fn set_now_playing(&self, path: impl AsRef<Path>, title: &str) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = Some(MediaItem {
            path: path.as_ref().to_path_buf(),
            title: title.to_string(),
        });
    }

    /// Deliver `event` to subscribers on the calling thread.
    pub fn emit(&self, event: EngineEvent) -> usize {
        self.bus.dispatch(&event)
    }

    fn record(&self, call: Call) -> Result<(), EngineError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        if self.fail_commands.load(Ordering::SeqCst) {
            return Err(EngineError::Disconnected);
        }
        Ok(())
    }

    fn advance(&self) {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner).clone();
        let next = {
            let mut pos = self.pos.lock().unwrap_or_else(PoisonError::into_inner);
            let next = pos.map_or(0, |p| p + 1);
            if next >= items.len() {
                return;
            }
            *pos = Some(next);
            next
        };
        let path = &items[next];
        let title = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        self.set_now_playing(path, &title);
        self.emit(EngineEvent::TrackChanged);
    }
}

impl PlaybackEngine for RecordingEngine {
    fn set_queue(&self, items: &[PathBuf]) -> Result<(), EngineError> {
        self.record(Call::SetQueue(items.to_vec()))?;
        *self.items.lock().unwrap_or_else(PoisonError::into_inner) = items.to_vec();
        Ok(())
    }

    fn set_loop_mode(&self, mode: LoopMode) -> Result<(), EngineError> {
        self.record(Call::SetLoopMode(mode))
    }

    fn play(&self) -> Result<(), EngineError> {
        self.record(Call::Play)
    }

    fn stop(&self) -> Result<(), EngineError> {
        self.record(Call::Stop)
    }

    fn next(&self) -> Result<(), EngineError> {
        self.record(Call::Next)?;
        if self.advance_on_next.load(Ordering::SeqCst) {
            self.advance();
        }
        Ok(())
    }

    fn previous(&self) -> Result<(), EngineError> {
        self.record(Call::Previous)
    }

    fn toggle_pause(&self) -> Result<(), EngineError> {
        self.record(Call::TogglePause)
    }

    fn subscribe(
        &self,
        kind: EventKind,
        callback: EventCallback,
    ) -> Result<SubscriptionId, EngineError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call::Subscribe(kind));
        Ok(self.bus.subscribe(kind, callback))
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), EngineError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call::Unsubscribe);
        self.bus.unsubscribe(id)
    }

    fn current_title(&self) -> Result<String, EngineError> {
        if self.fail_metadata.load(Ordering::SeqCst) {
            return Err(EngineError::NoCurrentItem);
        }
        self.now
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|m| m.title.clone())
            .ok_or(EngineError::NoCurrentItem)
    }

    fn current_location(&self) -> Result<PathBuf, EngineError> {
        if self.fail_metadata.load(Ordering::SeqCst) {
            return Err(EngineError::NoCurrentItem);
        }
        self.now
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|m| m.path.clone())
            .ok_or(EngineError::NoCurrentItem)
    }

    fn release_player(&self) -> Result<(), EngineError> {
        self.record(Call::ReleasePlayer)?;
        self.player_released.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn release_queue(&self) -> Result<(), EngineError> {
        if !self.player_released.load(Ordering::SeqCst) {
            return Err(EngineError::QueueInUse);
        }
        self.record(Call::ReleaseQueue)
    }
}
