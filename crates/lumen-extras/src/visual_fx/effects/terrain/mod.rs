#![forbid(unsafe_code)]

//! Pointer-lit terrain mesh.
//!
//! A jittered plane breathes in x/y every frame while a ray cast through the
//! pointer lights up the triangle under it; the lit triangle fades back to
//! the base color over a short tween.
//!
//! # Frame cycle
//! ```text
//! TerrainEngine::tick(now)
//!   → PointerHighlighter::pick_ray // bail out on a non-finite ray, mesh untouched
//!   → TerrainAnimator::tick        // x/y wobble around the original positions
//!   → PointerHighlighter::tick     // advance fade, light nearest face
//! ```
//!
//! # Invariants
//! - Original positions and phases are fixed at generation.
//! - z is never written after generation.
//! - At most one highlight tween is active; a new hit replaces it.

mod animator;
mod highlight;
mod mesh;

pub use animator::{AMPLITUDE, FRAME_STEP, TerrainAnimator};
pub use highlight::{HIGHLIGHT_DURATION, HighlightState, PointerHighlighter, pick};
pub use mesh::{COLOR_STRIDE, MAX_VERTICES, POSITION_STRIDE, TerrainMesh};

use std::time::Duration;

use lumen_core::{FxError, FxResult, Ndc, Viewport, env};
use lumen_render::{DirectionalLight, PerspectiveCamera, RgbF};
use lumen_runtime::Engine;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Terrain mount configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TerrainConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Base vertex color.
    pub bg_color: RgbF,
    /// Color of a freshly hit triangle.
    pub raycast_color: RgbF,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            width_segments: 50,
            height_segments: 50,
            bg_color: RgbF::new(0.89, 0.22, 0.086),
            raycast_color: RgbF::new(0.831, 0.271, 0.153),
        }
    }
}

impl TerrainConfig {
    /// Validate constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<FxError>> {
        let mut errors = Vec::new();
        if self.width_segments == 0 {
            errors.push(FxError::config("width_segments", self.width_segments, "must be > 0"));
        }
        if self.height_segments == 0 {
            errors.push(FxError::config("height_segments", self.height_segments, "must be > 0"));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            errors.push(FxError::config("width", self.width, "must be finite and > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            errors.push(FxError::config("height", self.height, "must be finite and > 0"));
        }
        if !self.bg_color.is_unit() {
            errors.push(FxError::config(
                "bg_color",
                format!("{:?}", self.bg_color.to_array()),
                "channels must be within [0, 1]",
            ));
        }
        if !self.raycast_color.is_unit() {
            errors.push(FxError::config(
                "raycast_color",
                format!("{:?}", self.raycast_color.to_array()),
                "channels must be within [0, 1]",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn checked(&self) -> FxResult<()> {
        self.validate().map_err(|mut errs| errs.swap_remove(0))
    }
}

/// Terrain RNG seeded from `LUMEN_FX_SEED`, or from entropy when unset.
pub fn rng_from_env_with<F>(get_env: F) -> FxResult<StdRng>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(match env::seed_with(get_env)? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    })
}

// ---------------------------------------------------------------------------
// TerrainEngine
// ---------------------------------------------------------------------------

/// Per-mount terrain context: mesh, animation state, camera, and light.
#[derive(Debug, Clone)]
pub struct TerrainEngine {
    config: TerrainConfig,
    mesh: TerrainMesh,
    animator: TerrainAnimator,
    highlighter: PointerHighlighter,
    camera: PerspectiveCamera,
    light: DirectionalLight,
    viewport: Option<Viewport>,
    rng: StdRng,
}

impl TerrainEngine {
    /// Build from `config`, seeding from the process environment.
    pub fn new(config: TerrainConfig) -> FxResult<Self> {
        let rng = rng_from_env_with(|k| std::env::var(k).ok())?;
        Self::with_rng(config, rng)
    }

    /// Build with a caller-supplied generator.
    pub fn with_rng(config: TerrainConfig, mut rng: StdRng) -> FxResult<Self> {
        let mesh = TerrainMesh::generate(&config, &mut rng)?;
        Ok(Self {
            highlighter: PointerHighlighter::new(&config),
            config,
            mesh,
            animator: TerrainAnimator::new(),
            camera: PerspectiveCamera::new(1.0),
            light: DirectionalLight::default(),
            viewport: None,
            rng,
        })
    }

    pub fn with_seed(config: TerrainConfig, seed: u64) -> FxResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Rebuild the mesh from a re-issued config.
    ///
    /// Camera and light are kept; the animation counter and highlight state
    /// start over. On error the current mesh stays in place.
    pub fn regenerate(&mut self, config: TerrainConfig) -> FxResult<()> {
        self.mesh = TerrainMesh::generate(&config, &mut self.rng)?;
        self.animator = TerrainAnimator::new();
        self.highlighter = PointerHighlighter::new(&config);
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    #[must_use]
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    #[must_use]
    pub fn animator(&self) -> &TerrainAnimator {
        &self.animator
    }

    #[must_use]
    pub fn highlighter(&self) -> &PointerHighlighter {
        &self.highlighter
    }

    #[must_use]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Camera for host-side adjustments; the next tick picks with it.
    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    #[must_use]
    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    /// Last surface size delivered by a resize.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl Engine for TerrainEngine {
    fn name(&self) -> &'static str {
        "terrain"
    }

    fn tick(&mut self, now: Duration) -> FxResult<()> {
        let ray = self.highlighter.pick_ray(&self.camera)?;
        self.animator.tick(&mut self.mesh);
        self.highlighter.tick(now, &mut self.mesh, ray);
        lumen_core::trace!(counter = self.animator.counter(), "terrain tick");
        Ok(())
    }

    fn pointer_moved(&mut self, pointer: Option<Ndc>) {
        self.highlighter.set_pointer(pointer);
    }

    fn resized(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.aspect());
        self.viewport = Some(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn small() -> TerrainConfig {
        TerrainConfig {
            width: 20.0,
            height: 20.0,
            width_segments: 4,
            height_segments: 3,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
    }

    #[test]
    fn validation_reports_every_violation() {
        let bad = TerrainConfig {
            width: f32::NAN,
            height: -1.0,
            width_segments: 0,
            height_segments: 0,
            bg_color: RgbF::new(1.5, 0.0, 0.0),
            raycast_color: RgbF::new(0.0, f32::INFINITY, 0.0),
        };
        assert_eq!(bad.validate().unwrap_err().len(), 6);
    }

    #[test]
    fn zero_segments_fail_at_construction() {
        let cfg = TerrainConfig {
            width_segments: 0,
            ..small()
        };
        let err = TerrainEngine::with_seed(cfg, 1).unwrap_err();
        assert!(matches!(
            err,
            FxError::Configuration {
                field: "width_segments",
                ..
            }
        ));
    }

    #[test]
    fn seed_from_env_is_reproducible() {
        let env: HashMap<&str, &str> = [("LUMEN_FX_SEED", "42")].into_iter().collect();
        let get = |k: &str| env.get(k).map(|v| (*v).to_string());
        let a = TerrainEngine::with_rng(small(), rng_from_env_with(get).unwrap()).unwrap();
        let b = TerrainEngine::with_seed(small(), 42).unwrap();
        assert_eq!(a.mesh().positions(), b.mesh().positions());
        assert_eq!(a.mesh().phases(), b.mesh().phases());
    }

    #[test]
    fn malformed_seed_is_a_configuration_error() {
        let err = rng_from_env_with(|_| Some("forty-two".into())).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn resize_updates_camera_aspect_and_viewport() {
        let mut engine = TerrainEngine::with_seed(small(), 7).unwrap();
        assert_eq!(engine.viewport(), None);
        engine.resized(Viewport::new(1600, 800).unwrap());
        assert_eq!(engine.camera().aspect, 2.0);
        assert_eq!(engine.viewport(), Viewport::new(1600, 800));
    }

    #[test]
    fn degraded_pick_leaves_mesh_unanimated() {
        let mut engine = TerrainEngine::with_seed(small(), 7).unwrap();
        engine.tick(Duration::ZERO).unwrap();
        let before = engine.mesh().positions().to_vec();
        let counter = engine.animator().counter();

        engine.camera_mut().fov_deg = f32::NAN;
        engine.pointer_moved(Ndc::new(0.1, -0.2));
        let err = engine.tick(Duration::from_millis(16)).unwrap_err();
        assert!(matches!(err, FxError::DegradedFrame(_)));
        assert_eq!(engine.mesh().positions(), &before[..]);
        assert_eq!(engine.animator().counter(), counter);

        engine.camera_mut().fov_deg = PerspectiveCamera::DEFAULT_FOV_DEG;
        engine.tick(Duration::from_millis(32)).unwrap();
        assert!(engine.animator().counter() > counter);
    }

    #[test]
    fn regenerate_rebuilds_with_new_geometry() {
        let mut engine = TerrainEngine::with_seed(small(), 7).unwrap();
        engine.tick(Duration::ZERO).unwrap();
        let bigger = TerrainConfig {
            width_segments: 8,
            height_segments: 8,
            ..small()
        };
        engine.regenerate(bigger).unwrap();
        assert_eq!(engine.mesh().vertex_count(), 81);
        assert_eq!(engine.animator().counter(), 0.0);
        assert!(matches!(engine.highlighter().state(), HighlightState::Idle));

        let before = engine.mesh().positions().to_vec();
        let invalid = TerrainConfig {
            height_segments: 0,
            ..small()
        };
        assert!(engine.regenerate(invalid).is_err());
        assert_eq!(engine.mesh().positions(), &before[..]);
    }

    #[test]
    fn light_and_camera_defaults() {
        let engine = TerrainEngine::with_seed(small(), 7).unwrap();
        assert_eq!(engine.camera().position.z, 50.0);
        assert_eq!(engine.camera().fov_deg, 75.0);
        assert_eq!(engine.light().intensity, 1.0);
    }
}
