//! Logging initialization.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Default filter directive for a `-v` count, or `error` when quiet.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "vaultex=error";
    }
    match verbose {
        0 => "vaultex=warn",
        1 => "vaultex=info",
        2 => "vaultex=debug",
        _ => "vaultex=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// verbosity flags. Later calls are no-ops.
pub fn init(verbose: u8, quiet: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
