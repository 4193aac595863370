#![forbid(unsafe_code)]

//! Core: errors, input events, tweens, and environment-driven configuration.
//!
//! # Role in Lumen
//! `lumen-core` is the leaf crate. It owns the error taxonomy every effect
//! reports through, the normalized pointer/resize events a host delivers, and
//! the small tween engine used for transient color animation.
//!
//! # Primary responsibilities
//! - **FxError**: setup failures (configuration, missing surface) and per-frame
//!   degradation.
//! - **InputEvent**: pointer positions in normalized device coordinates and
//!   viewport resizes.
//! - **Tween**: time-bounded interpolation with easing.
//! - **env**: truthy-flag and numeric lookups through an injectable getter.
//!
//! # How it fits in the system
//! `lumen-runtime` routes `InputEvent`s to engines and drives their ticks.
//! `lumen-render` holds pixels and geometry. `lumen-extras` builds the plasma
//! and terrain effects on top of both.

pub mod animation;
pub mod env;
pub mod error;
pub mod event;
pub mod logging;

pub use error::{FxError, FxResult};
pub use event::{InputEvent, Ndc, Viewport};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
