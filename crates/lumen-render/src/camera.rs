//! Perspective camera, rays, and the scene light.
//!
//! The camera never rotates: it sits on the +z axis looking toward the
//! origin, so unprojecting a pointer reduces to scaling the NDC by the
//! half-extents of the view frustum at unit depth.

use lumen_core::Ndc;

use crate::color::RgbF;
use crate::geometry::Vec3;

/// A half-line `origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera looking down -z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub const DEFAULT_FOV_DEG: f32 = 75.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 1000.0;
    pub const DEFAULT_DISTANCE: f32 = 50.0;

    /// Camera at `(0, 0, 50)` with a 75° vertical field of view.
    #[must_use]
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_deg: Self::DEFAULT_FOV_DEG,
            aspect,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
            position: Vec3::new(0.0, 0.0, Self::DEFAULT_DISTANCE),
        }
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Ray from the eye through the pointer position.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Ndc) -> Ray {
        let half_h = (self.fov_deg.to_radians() * 0.5).tan();
        let half_w = half_h * self.aspect;
        let dir = Vec3::new(ndc.x * half_w, ndc.y * half_h, -1.0).normalize();
        Ray {
            origin: self.position,
            direction: dir,
        }
    }

    /// Project a world point to NDC. Returns `None` for points behind the eye.
    #[must_use]
    pub fn project(&self, p: Vec3) -> Option<(f32, f32)> {
        let rel = p - self.position;
        let depth = -rel.z;
        if depth <= 0.0 {
            return None;
        }
        let half_h = (self.fov_deg.to_radians() * 0.5).tan();
        let half_w = half_h * self.aspect;
        Some((rel.x / (depth * half_w), rel.y / (depth * half_h)))
    }
}

/// A single directional light, passed to the host for shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: RgbF,
    pub intensity: f32,
    /// The light shines from `position` toward the origin.
    pub position: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: RgbF::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            position: Vec3::new(0.0, 1.0, 1.0),
        }
    }
}

impl DirectionalLight {
    /// Unit vector pointing from the scene toward the light.
    #[must_use]
    pub fn direction_to_light(&self) -> Vec3 {
        self.position.normalize()
    }
}
