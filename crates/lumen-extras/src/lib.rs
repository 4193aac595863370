#![forbid(unsafe_code)]

//! Visual effects for Lumen.
//!
//! Each effect is behind its own feature so hosts only pay for what they
//! mount:
//! - `visual-fx-plasma`: scrolling two-layer plasma cloud into an RGBA buffer.
//! - `visual-fx-terrain`: jittered, gently drifting mountain mesh with
//!   pointer-driven triangle highlights.

#[cfg(feature = "visual-fx")]
pub mod visual_fx;

/// Install the JSON log subscriber (see `lumen_core::logging`).
#[cfg(feature = "logging")]
pub use lumen_core::logging::init_subscriber;
