//! Logging initialization.
//!
//! The discovery engine emits all diagnostics (dropped paths, skipped
//! imports, budget exhaustion) as `tracing` events; the subscriber installed
//! here is the "diagnostic log channel" a caller opts into. Library users
//! embedding the engine install their own subscriber instead.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging for the CLI.
///
/// `RUST_LOG` takes precedence when set; otherwise `verbose` selects between
/// debug-level and warn-level output for this crate. Repeated calls are
/// no-ops.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "memfold=debug" } else { "memfold=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
