//! Playback session: requests transitions from the engine and owns the state
//! the event router commits.

mod signal;
mod state;

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::engine::{LoopMode, PlaybackEngine};
use crate::error::{EngineError, SessionError};
use crate::queue::Queue;

pub use signal::{TerminationTrigger, TerminationWaiter, termination_signal};
pub use state::{SessionState, StateHandle};

pub struct PlaybackSession {
    engine: Arc<dyn PlaybackEngine>,
    state: StateHandle,
}

impl PlaybackSession {
    pub fn new(engine: Arc<dyn PlaybackEngine>) -> Self {
        Self {
            engine,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    /// Shared state handle for the event router.
    pub fn state_handle(&self) -> StateHandle {
        self.state.clone()
    }

    /// Load `queue` into the engine, set the loop mode and start playing.
    pub fn start(&self, queue: &Queue, loop_mode: LoopMode) -> Result<(), SessionError> {
        if queue.is_empty() {
            return Err(SessionError::EmptyQueue);
        }

        self.engine.set_queue(&queue.paths())?;
        self.engine.set_loop_mode(loop_mode)?;
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_loop_mode(loop_mode);
        self.engine.play()?;

        info!(tracks = queue.len(), ?loop_mode, "playback started");
        Ok(())
    }

    pub fn next(&self) -> Result<(), EngineError> {
        self.engine.next()
    }

    pub fn previous(&self) -> Result<(), EngineError> {
        self.engine.previous()
    }

    pub fn toggle_pause(&self) -> Result<(), EngineError> {
        self.engine.toggle_pause()
    }

    /// Skip the reported track and delete its file.
    ///
    /// The path is captured before `next()` is issued, so a `TrackChanged`
    /// that lands in between cannot redirect the delete to the following
    /// track. If the skip request fails, nothing is deleted.
    pub fn remove_current_and_advance(&self) -> Result<PathBuf, SessionError> {
        let (target, title) = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let target = state.current_track().cloned();
            let title = state.current_title().unwrap_or_default().to_string();
            (target.ok_or(SessionError::NothingPlaying)?, title)
        };

        self.engine.next()?;

        fs::remove_file(&target).map_err(|source| SessionError::Remove {
            path: target.clone(),
            source,
        })?;
        info!(path = %target.display(), "removed {title}");
        Ok(target)
    }

    /// Release engine resources: stop playback, release the player, then the
    /// media list. Every step runs; the first failure is returned.
    pub fn shutdown(&self) -> Result<(), EngineError> {
        let mut first_err = None;
        let mut record = |name: &str, result: Result<(), EngineError>| match result {
            Ok(()) => debug!("shutdown: {name}"),
            Err(e) => {
                warn!(error = %e, "shutdown: {name} failed");
                first_err.get_or_insert(e);
            }
        };

        record("stop", self.engine.stop());
        record("release player", self.engine.release_player());
        record("release media list", self.engine.release_queue());

        first_err.map_or(Ok(()), Err)
    }
}
