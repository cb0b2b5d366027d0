use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

static INIT_ONCE: Once = Once::new();

/// Level used for `verbosity` (`-v` count) when `RUST_LOG` is not set.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global `fmt` subscriber, as JSON lines when `json` is set.
///
/// `RUST_LOG` takes precedence over `verbosity`. Only the first call has an
/// effect; an already installed global subscriber is left in place.
pub fn init(verbosity: u8, json: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

        let installed = if json {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init()
        };

        if installed.is_err() {
            tracing::debug!("global subscriber already installed, keeping it");
        }
    });
}
