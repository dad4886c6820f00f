use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/shuffleplay/config.toml` or `~/.config/shuffleplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Command line flags (applied by the runtime)
/// 2) Environment variables (prefix `SHUFFLEPLAY__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub startup: StartupSettings,
    pub engine: EngineSettings,
    pub notifications: NotificationSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Music folder used when no path is given on the command line.
    pub root: Option<PathBuf>,
    /// File extensions to treat as playable (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// File name prefixes that mark metadata side files (e.g. `._song.mp4`).
    pub ignore_prefixes: Vec<String>,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: vec!["mp4".into(), "webm".into()],
            ignore_prefixes: vec!["._".into()],
            include_hidden: false,
            follow_links: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether the queue wraps around when it runs out.
    pub loop_mode: LoopModeSetting,
    /// Fixed shuffle seed; a fresh order is drawn every run when unset.
    pub seed: Option<u64>,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopModeSetting {
    #[serde(alias = "no_loop", alias = "noloop", alias = "off")]
    NoLoop,
    #[default]
    #[serde(alias = "loop_all", alias = "loopall", alias = "loop", alias = "on")]
    LoopAll,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StartupSettings {
    /// Poll until the music folder exists instead of failing right away.
    pub wait_for_root: bool,
    /// Seconds between two checks while waiting for the music folder.
    pub retry_interval_secs: u64,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            wait_for_root: true,
            retry_interval_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// How often the engine thread checks whether the current item ended (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Send a desktop notification on every track change.
    pub enabled: bool,
    /// Application name reported to the notification daemon.
    pub app_name: String,
    /// Optional icon path or freedesktop icon name.
    pub icon: Option<String>,
    /// Expiry in milliseconds; `-1` lets the daemon decide.
    pub timeout_ms: i32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            app_name: "shuffleplay".to_string(),
            icon: None,
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Set the terminal window/tab title to the current track.
    pub terminal_title: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            terminal_title: true,
        }
    }
}
