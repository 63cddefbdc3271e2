//! Tracing subscriber setup for the `bytefreq` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary.  Events go to stderr so decoded bytes on stdout stay clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive.  Takes precedence
/// over the verbosity flags.
pub const LOG_ENV_VAR: &str = "BYTEFREQ_LOG";

/// Map `-q` / `-v` counts to a default filter level.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.  Calling this twice is harmless; the second
/// call is ignored.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(level_for(verbose, quiet)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
