use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "shuffleplay=info",
        1 => "shuffleplay=debug",
        _ => "shuffleplay=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "shuffleplay=info");
        assert_eq!(default_directive(1), "shuffleplay=debug");
        assert_eq!(default_directive(5), "shuffleplay=trace");
    }
}
