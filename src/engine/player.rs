use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tracing::debug;

use crate::error::EngineError;

use super::PlaybackEngine;
use super::events::{EventBus, EventCallback, SubscriptionId};
use super::thread::{EngineCmd, NowPlayingHandle, spawn_engine_thread};
use super::types::{EngineOptions, EventKind, LoopMode, MediaItem};

/// List player backed by `rodio`, driven from a dedicated engine thread.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    now_playing: NowPlayingHandle,
    bus: Arc<EventBus>,
    player_released: AtomicBool,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioEngine {
    /// Open the default output device and start the engine thread.
    ///
    /// Blocks until the device is open so a missing device fails startup.
    pub fn initialize(options: EngineOptions) -> Result<Self, EngineError> {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), String>>(1);
        let now_playing: NowPlayingHandle = Arc::new(Mutex::new(None));
        let bus = Arc::new(EventBus::new());

        let handle = spawn_engine_thread(
            rx,
            ready_tx,
            now_playing.clone(),
            bus.clone(),
            options.poll_interval,
        )
        .map_err(|e| EngineError::Init(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(reason)) => {
                let _ = handle.join();
                return Err(EngineError::Init(reason));
            }
            Err(_) => {
                let _ = handle.join();
                return Err(EngineError::Init("engine thread exited during startup".into()));
            }
        }
        debug!("audio output opened");

        Ok(Self {
            tx,
            now_playing,
            bus,
            player_released: AtomicBool::new(false),
            join: Mutex::new(Some(handle)),
        })
    }

    fn send(&self, cmd: EngineCmd) -> Result<(), EngineError> {
        if self.player_released.load(Ordering::Acquire) {
            return Err(EngineError::Disconnected);
        }
        self.tx.send(cmd).map_err(|_| EngineError::Disconnected)
    }

    fn current<T>(&self, f: impl FnOnce(&MediaItem) -> T) -> Result<T, EngineError> {
        let guard = self.now_playing.lock().map_err(|_| EngineError::Disconnected)?;
        guard.as_ref().map(f).ok_or(EngineError::NoCurrentItem)
    }
}

impl PlaybackEngine for RodioEngine {
    fn set_queue(&self, items: &[PathBuf]) -> Result<(), EngineError> {
        if let Some(missing) = items.iter().find(|p| !p.is_file()) {
            return Err(EngineError::Media {
                path: missing.clone(),
                reason: "not a readable file".into(),
            });
        }
        self.send(EngineCmd::SetQueue(items.to_vec()))
    }

    fn set_loop_mode(&self, mode: LoopMode) -> Result<(), EngineError> {
        self.send(EngineCmd::SetLoopMode(mode))
    }

    fn play(&self) -> Result<(), EngineError> {
        self.send(EngineCmd::Play)
    }

    fn stop(&self) -> Result<(), EngineError> {
        self.send(EngineCmd::Stop)
    }

    fn next(&self) -> Result<(), EngineError> {
        self.send(EngineCmd::Next)
    }

    fn previous(&self) -> Result<(), EngineError> {
        self.send(EngineCmd::Prev)
    }

    fn toggle_pause(&self) -> Result<(), EngineError> {
        self.send(EngineCmd::TogglePause)
    }

    fn subscribe(
        &self,
        kind: EventKind,
        callback: EventCallback,
    ) -> Result<SubscriptionId, EngineError> {
        Ok(self.bus.subscribe(kind, callback))
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), EngineError> {
        self.bus.unsubscribe(id)
    }

    fn current_title(&self) -> Result<String, EngineError> {
        self.current(|item| item.title.clone())
    }

    fn current_location(&self) -> Result<PathBuf, EngineError> {
        self.current(|item| item.path.clone())
    }

    fn release_player(&self) -> Result<(), EngineError> {
        let result = self.send(EngineCmd::ReleasePlayer);
        self.player_released.store(true, Ordering::Release);
        result
    }

    fn release_queue(&self) -> Result<(), EngineError> {
        if !self.player_released.load(Ordering::Acquire) {
            return Err(EngineError::QueueInUse);
        }
        if !self.bus.is_empty() {
            debug!(subscribers = self.bus.len(), "releasing media list with subscribers attached");
        }
        let sent = self
            .tx
            .send(EngineCmd::ReleaseQueue)
            .map_err(|_| EngineError::Disconnected);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
        sent
    }
}
