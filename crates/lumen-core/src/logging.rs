//! Logging facade.
//!
//! With the `tracing` feature the standard macros are re-exported here so
//! downstream crates can log through `lumen_core::{debug, info, ...}`. The
//! `tracing-json` feature adds [`init_subscriber`] for hosts that want JSON
//! lines on stderr.

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

/// Install a global JSON subscriber filtered by `LUMEN_LOG` (default `warn`).
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_subscriber() -> crate::FxResult<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(crate::env::ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| crate::FxError::ResourceUnavailable(format!("log subscriber: {e}")))
}
