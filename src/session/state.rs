use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::engine::LoopMode;

/// State shared by the command interpreter and the event router.
///
/// `current_track` is the last item the engine *reported*; it is written by
/// the event router only and may lag behind a `next` the operator just issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    current_track: Option<PathBuf>,
    current_title: Option<String>,
    loop_mode: LoopMode,
}

pub type StateHandle = Arc<Mutex<SessionState>>;

impl SessionState {
    pub fn current_track(&self) -> Option<&PathBuf> {
        self.current_track.as_ref()
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current_title.as_deref()
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub(crate) fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    /// Commit a track change confirmed by the engine.
    pub(crate) fn commit_track(&mut self, path: PathBuf, title: String) {
        self.current_track = Some(path);
        self.current_title = Some(title);
    }
}
