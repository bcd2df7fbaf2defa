//! Diagnostic logging for the CLI.
//!
//! Engine events (`round started`, `round settled`, ...) go through `tracing`
//! to stderr. The filter comes from `NEONMINES_LOG` using `EnvFilter` syntax
//! (e.g. `NEONMINES_LOG=neonmines_engine=debug`) and defaults to `warn`, so
//! normal runs print nothing extra.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "NEONMINES_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `NEONMINES_LOG`, falling back to `warn` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global stderr subscriber. Later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
