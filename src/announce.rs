//! Best-effort "now playing" side effects triggered by track changes.

mod desktop;
mod terminal;

use std::path::PathBuf;

use crate::error::AnnounceError;

pub use desktop::DesktopNotifier;
pub use terminal::TerminalTitle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub path: PathBuf,
    /// Display title, known extensions already stripped.
    pub title: String,
}

/// A side effect fired on every committed track change.
///
/// Implementations run on the engine's dispatch thread and must return quickly.
pub trait Announcer: Send + Sync {
    fn name(&self) -> &'static str;
    fn announce(&self, now: &NowPlaying) -> Result<(), AnnounceError>;
}
