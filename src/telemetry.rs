//! Opt-in tracing setup for hosts embedding `chart-motion`.
//!
//! Layout passes and pointer handling emit `tracing` events; nothing is
//! printed unless the host installs a subscriber, either its own or the
//! one provided here.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`
/// (falling back to `warn`) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or the host already set a
/// global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
