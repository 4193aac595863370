#![forbid(unsafe_code)]

//! Environment-driven knobs.
//!
//! Every lookup goes through a caller-supplied getter so tests can inject a
//! fake environment instead of mutating the process one.

use crate::error::{FxError, FxResult};

/// Seed for the terrain RNG (decimal `u64`).
pub const ENV_FX_SEED: &str = "LUMEN_FX_SEED";
/// Truthy value switches every effect off at mount time.
pub const ENV_FX_DISABLE: &str = "LUMEN_FX_DISABLE";
/// `tracing-subscriber` filter directive.
pub const ENV_LOG: &str = "LUMEN_LOG";

#[inline]
fn flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Whether `key` is set to a truthy value.
pub fn truthy_with<F>(key: &str, get_env: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key).is_some_and(|v| flag(&v))
}

/// Read the RNG seed override, if any.
///
/// An unset or empty variable yields `Ok(None)`; a value that does not parse
/// as `u64` is a configuration error.
pub fn seed_with<F>(get_env: F) -> FxResult<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match get_env(ENV_FX_SEED) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| FxError::config("LUMEN_FX_SEED", raw, "expected an unsigned integer")),
    }
}
