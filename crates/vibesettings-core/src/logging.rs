//! Logging initialization for the vibesettings binary.
//!
//! Verbosity is controlled by the `-v` flag count, with `RUST_LOG` taking
//! precedence when set so targeted filters keep working.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Maps the CLI verbosity count to a default level: 0 = warn, 1 = info,
/// 2 = debug, 3+ = trace.
pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
