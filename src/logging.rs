//! Logging setup

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise the tracing subscriber once per process. Logs go to stderr so
/// stdout stays reserved for compiled output and paths.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "coffee_cache=debug"
        } else {
            "coffee_cache=info"
        };
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    });
}
