use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::config::LoopModeSetting;
use crate::engine::LoopMode;
use crate::error::WaitError;

impl From<LoopModeSetting> for LoopMode {
    fn from(setting: LoopModeSetting) -> Self {
        match setting {
            LoopModeSetting::NoLoop => LoopMode::NoLoop,
            LoopModeSetting::LoopAll => LoopMode::LoopAll,
        }
    }
}

/// Block until `root` exists, checking every `interval`.
///
/// Removable drives show up late after boot; a missing root is retried while
/// `retry` is set. Any other metadata error (permissions, I/O) fails at once.
pub fn wait_for_root(root: &Path, retry: bool, interval: Duration) -> Result<(), WaitError> {
    loop {
        match fs::metadata(root) {
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound && retry => {
                info!(path = %root.display(), "not ready, retrying in {}s", interval.as_secs_f32());
                thread::sleep(interval);
            }
            Err(source) => {
                return Err(WaitError::Inaccessible {
                    path: root.to_path_buf(),
                    source,
                });
            }
        }
    }
}
