//! Tracing setup for applications embedding this crate.
//!
//! The core modules emit structured events via [`tracing`]; the embedding
//! application decides where they go. This helper installs the standard
//! `fmt` subscriber with an environment-controlled filter (`RUST_LOG`),
//! defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops. Intended to be
/// invoked once at application startup, before any store access.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
