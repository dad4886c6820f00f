use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use crossterm::execute;
use crossterm::terminal::SetTitle;

use crate::error::AnnounceError;

use super::{Announcer, NowPlaying};

/// Sets the terminal window/tab title to the current track.
pub struct TerminalTitle<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalTitle<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalTitle<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> Announcer for TerminalTitle<W> {
    fn name(&self) -> &'static str {
        "terminal-title"
    }

    fn announce(&self, now: &NowPlaying) -> Result<(), AnnounceError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("terminal writer poisoned"))?;
        execute!(&mut *out, SetTitle(&now.title))?;
        Ok(())
    }
}
