#![forbid(unsafe_code)]

//! Structured logging helpers.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here and
//! [`init`] installs a formatted subscriber filtered by `RUST_LOG` (falling
//! back to the given default directive). `tracing-json` adds [`init_json`]
//! for line-delimited JSON output.
//!
//! Installing a subscriber is the host's decision; library code only emits
//! events. Both initializers are idempotent: a second call is ignored.

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

#[cfg(feature = "tracing")]
fn env_filter(default_directive: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive))
}

/// Install a human-readable subscriber. Returns `false` if one was already set.
#[cfg(feature = "tracing")]
pub fn init(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Install a JSON subscriber. Returns `false` if one was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(default_directive))
        .with_current_span(false)
        .try_init()
        .is_ok()
}
