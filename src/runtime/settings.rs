use tracing::{debug, warn};

use crate::cli::Args;
use crate::config;

/// Load settings, falling back to defaults, then apply command line flags.
pub fn load_settings(args: &Args) -> config::Settings {
    let mut settings = match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent playback.
            warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    };

    args.apply(&mut settings);
    debug!(?settings, "effective settings");
    settings
}
