//! Error types shared across the player.
//!
//! Startup errors (`ScanError`, `SessionError`, `WaitError`) bubble up to
//! `main` and end the process. Engine command failures and announcer failures
//! are reported where they happen and never stop a running session.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library scan failures. Any of these aborts the scan; there is no partial
/// library.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to walk {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failures reported by a playback engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine initialization failed: {0}")]
    Init(String),

    #[error("engine is no longer running")]
    Disconnected,

    #[error("nothing is playing")]
    NoCurrentItem,

    #[error("cannot load {path}: {reason}")]
    Media { path: PathBuf, reason: String },

    #[error("media list is still attached to the player")]
    QueueInUse,

    #[error("unknown subscription {0}")]
    UnknownSubscription(u64),
}

/// Session-level failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the queue is empty: no playable files were found")]
    EmptyQueue,

    #[error("no track has been reported as playing yet")]
    NothingPlaying,

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Reasons the command interpreter stops reading.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("command input closed")]
    InputClosed,

    #[error("failed to read command input: {0}")]
    Read(#[source] io::Error),
}

/// Best-effort side effect failures.
#[derive(Debug, Error)]
pub enum AnnounceError {
    #[error("failed to write terminal title: {0}")]
    Terminal(#[from] io::Error),

    #[error("notification worker has stopped")]
    WorkerGone,
}

/// Failures while waiting for the library root to appear.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("cannot access {path}: {source}")]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
