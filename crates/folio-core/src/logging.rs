#![forbid(unsafe_code)]

//! Logging facade.
//!
//! Folio components log through `tracing`. The macros are re-exported here
//! so downstream crates share a single import path, and the `tracing-json`
//! feature adds a one-call subscriber setup for hosts that collect
//! structured logs (native harnesses, server-side prerendering).

pub use tracing::{debug, debug_span, error, info, info_span, trace, trace_span, warn};

/// Default filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
