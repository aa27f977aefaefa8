//! Logging setup for the `pplx` binary
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the application.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize tracing subscriber for structured logging
///
/// This can only be called once per process. Subsequent calls are silently ignored.
///
/// Reads log level from RUST_LOG environment variable, defaulting to
/// `default_level` for this crate and `warn` for everything else.
///
/// # Examples
///
/// ```no_run
/// pplx::telemetry::init("debug");
/// tracing::info!("Client starting");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    });
}

fn default_filter(default_level: &str) -> String {
    format!("warn,pplx={}", default_level)
}
