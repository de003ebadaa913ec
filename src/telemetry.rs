//! Opt-in tracing setup for hosts embedding `telechart-rs`.
//!
//! The chart only emits events: store writes at `trace`, frame targets and
//! drag transitions at `debug`, rejected input at `warn`. Hosts either call
//! one of the helpers below or install their own subscriber.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "telechart_rs=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with an explicit fallback directive,
/// e.g. `"telechart_rs::api=trace"` to follow every store write.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
