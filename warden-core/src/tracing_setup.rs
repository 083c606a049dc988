//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Warden tracing/logging system.
///
/// Reads the `WARDEN_LOG` environment variable for per-subsystem log
/// levels, e.g. `WARDEN_LOG=warden_analysis=debug,warden_audit=info`.
/// Falls back to `warden=info` when unset or invalid.
///
/// Idempotent: calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("WARDEN_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warden=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
