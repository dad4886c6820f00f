use std::env;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{LoopModeSetting, Settings};

/// Shuffle-play every video under a folder.
#[derive(Parser, Debug, Default)]
#[command(name = "shuffleplay")]
#[command(version)]
pub struct Args {
    /// Library root to scan [default: library.root from config, then the current directory]
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// More logging; repeat for trace output
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Keep retrying until the library root exists
    #[arg(long, overrides_with = "no_wait")]
    pub wait: bool,

    /// Fail immediately if the library root is missing
    #[arg(long, overrides_with = "wait")]
    pub no_wait: bool,

    /// Stop after the last track instead of starting over
    #[arg(long)]
    pub no_loop: bool,

    /// Seed for a reproducible play order
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,
}

impl Args {
    /// Layer flags given on the command line over `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.path {
            settings.library.root = Some(path.clone());
        }
        if self.wait {
            settings.startup.wait_for_root = true;
        }
        if self.no_wait {
            settings.startup.wait_for_root = false;
        }
        if self.no_loop {
            settings.playback.loop_mode = LoopModeSetting::NoLoop;
        }
        if self.seed.is_some() {
            settings.playback.seed = self.seed;
        }
        if self.no_notify {
            settings.notifications.enabled = false;
        }
    }
}

/// Library root after flags have been applied.
pub fn library_root(settings: &Settings) -> PathBuf {
    settings
        .library
        .root
        .clone()
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
