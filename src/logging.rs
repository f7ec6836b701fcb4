//! Tracing initialization.

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_ENV: &str = "KVMDEPS_LOG";

/// Default filter for a given `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "kvmdeps=warn",
        1 => "kvmdeps=info",
        _ => "kvmdeps=debug",
    }
}

/// Install the stderr subscriber. `KVMDEPS_LOG` (EnvFilter syntax) wins over
/// `verbosity`. Later calls are no-ops.
pub fn init_tracing(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
