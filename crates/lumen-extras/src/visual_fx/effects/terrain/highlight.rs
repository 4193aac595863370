//! Pointer picking and the highlight fade.
//!
//! # State machine
//! ```text
//! Idle ──hit──▶ Fading{face, tween} ──complete──▶ Idle
//!                  │  ▲
//!                  └──┘ hit (any face): replace tween
//! ```
//! A superseded tween is dropped as-is; its face keeps whatever color it had
//! reached.

use std::time::Duration;

use lumen_core::animation::{Easing, Tween};
use lumen_core::{FxError, FxResult, Ndc};
use lumen_render::intersect::{ray_aabb_hit_t, ray_triangle};
use lumen_render::{PerspectiveCamera, Ray, RgbF};

use super::TerrainConfig;
use super::mesh::TerrainMesh;

/// Time for a lit face to fade back to the base color.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub enum HighlightState {
    Idle,
    Fading { face: usize, tween: Tween<3> },
}

/// Lights the face under the pointer and fades it back.
#[derive(Debug, Clone)]
pub struct PointerHighlighter {
    highlight: RgbF,
    base: RgbF,
    easing: Easing,
    duration: Duration,
    state: HighlightState,
    pointer: Option<Ndc>,
    last_tick: Option<Duration>,
    hits: u64,
}

impl PointerHighlighter {
    #[must_use]
    pub fn new(config: &TerrainConfig) -> Self {
        Self {
            highlight: config.raycast_color,
            base: config.bg_color,
            easing: Easing::QuadOut,
            duration: HIGHLIGHT_DURATION,
            state: HighlightState::Idle,
            pointer: None,
            last_tick: None,
            hits: 0,
        }
    }

    /// Latest pointer position; `None` stops ray casting.
    pub fn set_pointer(&mut self, pointer: Option<Ndc>) {
        self.pointer = pointer;
    }

    #[must_use]
    pub fn pointer(&self) -> Option<Ndc> {
        self.pointer
    }

    #[must_use]
    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    /// Total hits since construction.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Ray through the current pointer, or `None` without one.
    ///
    /// A non-finite ray is a degraded frame; nothing has been mutated yet, so
    /// the caller can bail out before touching the mesh.
    pub fn pick_ray(&self, camera: &PerspectiveCamera) -> FxResult<Option<Ray>> {
        let Some(ndc) = self.pointer else {
            return Ok(None);
        };
        let ray = camera.ray_from_ndc(ndc);
        if !(ray.origin.is_finite() && ray.direction.is_finite()) {
            return Err(FxError::DegradedFrame(format!(
                "terrain: non-finite pick ray from ({}, {})",
                ndc.x, ndc.y
            )));
        }
        Ok(Some(ray))
    }

    /// Advance the fade to `now`, then light the face `ray` hits.
    ///
    /// Returns the face hit this tick, if any.
    pub fn tick(
        &mut self,
        now: Duration,
        mesh: &mut TerrainMesh,
        ray: Option<Ray>,
    ) -> Option<usize> {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_tick = Some(now);
        self.advance(dt, mesh);

        let (face, _) = pick(&ray?, mesh)?;
        mesh.set_face_color(face, self.highlight);
        let preempted = match &self.state {
            HighlightState::Fading { face: prev, .. } => Some(*prev),
            HighlightState::Idle => None,
        };
        lumen_core::debug!(face, ?preempted, "highlight tween started");
        self.state = HighlightState::Fading {
            face,
            tween: Tween::new(
                self.highlight.to_array(),
                self.base.to_array(),
                self.duration,
                self.easing,
            ),
        };
        self.hits += 1;
        Some(face)
    }

    fn advance(&mut self, dt: Duration, mesh: &mut TerrainMesh) {
        let HighlightState::Fading { face, tween } = &mut self.state else {
            return;
        };
        let face = *face;
        let color = RgbF::from_array(tween.advance(dt));
        if tween.is_complete() {
            mesh.set_face_color(face, self.base);
            self.state = HighlightState::Idle;
        } else {
            mesh.set_face_color(face, color);
        }
    }
}

/// Nearest face pierced by `ray`, with its ray parameter.
///
/// Tests the current positions, so the result tracks the animated mesh.
#[must_use]
pub fn pick(ray: &Ray, mesh: &TerrainMesh) -> Option<(usize, f32)> {
    let bounds = mesh.bounds()?;
    ray_aabb_hit_t(ray, &bounds)?;
    (0..mesh.face_count())
        .filter_map(|f| {
            let [a, b, c] = mesh.triangle(f);
            ray_triangle(ray, a, b, c).map(|t| (f, t))
        })
        .min_by(|x, y| x.1.total_cmp(&y.1))
}
