//! Line-oriented operator commands read from the terminal.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::error::InterpreterError;
use crate::session::PlaybackSession;

const HELP: [(&str, &str); 4] = [
    ("n", "next track"),
    ("p", "previous track"),
    ("t", "pause or resume"),
    ("r", "remove current track from disk and skip"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    TogglePause,
    RemoveCurrent,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "n" => Command::Next,
            "p" => Command::Previous,
            "t" => Command::TogglePause,
            "r" => Command::RemoveCurrent,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Read commands from `input` until it closes or fails.
///
/// Never returns `Ok`: end of input is reported as
/// [`InterpreterError::InputClosed`] so the caller can decide whether that
/// ends the process.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    session: &PlaybackSession,
) -> Result<(), InterpreterError> {
    let mut line = String::new();
    loop {
        line.clear();
        let read = input.read_line(&mut line).map_err(InterpreterError::Read)?;
        if read == 0 {
            return Err(InterpreterError::InputClosed);
        }

        let command = Command::parse(&line);
        debug!(?command, "operator command");
        execute(&command, &mut out, session);
    }
}

fn execute<W: Write>(command: &Command, out: &mut W, session: &PlaybackSession) {
    let result = match command {
        Command::Next => session.next().map_err(|e| e.to_string()),
        Command::Previous => session.previous().map_err(|e| e.to_string()),
        Command::TogglePause => session.toggle_pause().map_err(|e| e.to_string()),
        Command::RemoveCurrent => match session.remove_current_and_advance() {
            Ok(path) => {
                let _ = writeln!(out, "removed {}", path.display());
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        },
        Command::Unknown(_) => {
            if let Err(e) = print_help(out) {
                warn!(error = %e, "failed to print help");
            }
            Ok(())
        }
    };

    if let Err(msg) = result {
        warn!(?command, error = %msg, "command failed");
        let _ = writeln!(out, "error: {msg}");
    }
}

fn print_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "commands:")?;
    for (key, what) in HELP {
        writeln!(out, "  {key}  {what}")?;
    }
    out.flush()
}
