#![forbid(unsafe_code)]

//! Procedural visual effects.
//!
//! Every effect is an [`Engine`](lumen_runtime::Engine): constructed per
//! mount from a validated config, ticked once per display refresh by a
//! [`FrameScheduler`](lumen_runtime::FrameScheduler), and exposing its
//! output buffers to the host by reference.

pub mod effects;

#[cfg(feature = "visual-fx-plasma")]
pub use effects::height_field::HeightField;
#[cfg(feature = "visual-fx-plasma")]
pub use effects::palette::{ColorPalette, GradientName, PALETTE_LEN};
#[cfg(feature = "visual-fx-plasma")]
pub use effects::plasma::{
    MAX_MAP_SIZE, PlasmaCompositor, PlasmaConfig, PlasmaEngine, PlasmaGeometry, PlasmaOffsets,
};
#[cfg(feature = "visual-fx-terrain")]
pub use effects::terrain::{
    HighlightState, MAX_VERTICES, PointerHighlighter, TerrainAnimator, TerrainConfig,
    TerrainEngine, TerrainMesh, rng_from_env_with,
};
