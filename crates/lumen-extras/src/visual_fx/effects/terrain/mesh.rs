//! Grid mesh with fixed-stride vertex buffers.

use std::f32::consts::TAU;

use lumen_core::{FxError, FxResult};
use lumen_render::intersect::Aabb;
use lumen_render::{RgbF, Vec3};
use rand::Rng;

use super::TerrainConfig;

/// Floats per vertex in the position, original-position, and phase buffers.
pub const POSITION_STRIDE: usize = 3;
/// Floats per vertex in the color buffer.
pub const COLOR_STRIDE: usize = 3;
/// Largest accepted grid, in vertices.
pub const MAX_VERTICES: usize = 1 << 20;

const JITTER_XY: f32 = 1.5;
const JITTER_Z: f32 = 2.5;

/// A subdivided plane in the z = 0 plane, centered on the origin.
///
/// Vertices run row-major from the top-left corner; every grid cell holds two
/// triangles. All per-vertex data lives in flat `f32` buffers addressed by
/// [`POSITION_STRIDE`] and [`COLOR_STRIDE`].
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    width_segments: u32,
    height_segments: u32,
    positions: Vec<f32>,
    original: Vec<f32>,
    phases: Vec<f32>,
    colors: Vec<f32>,
    faces: Vec<[u32; 3]>,
    base_color: RgbF,
}

impl TerrainMesh {
    /// Plane without jitter, all phases zero.
    pub fn flat(config: &TerrainConfig) -> FxResult<Self> {
        config.checked()?;
        let (cols, rows) = grid_dims(config)?;
        let seg_w = config.width / config.width_segments as f32;
        let seg_h = config.height / config.height_segments as f32;
        let (half_w, half_h) = (config.width / 2.0, config.height / 2.0);

        let mut positions = Vec::with_capacity(cols * rows * POSITION_STRIDE);
        for iy in 0..rows {
            for ix in 0..cols {
                positions.extend_from_slice(&[
                    ix as f32 * seg_w - half_w,
                    half_h - iy as f32 * seg_h,
                    0.0,
                ]);
            }
        }

        let vertices = cols * rows;
        let mut faces = Vec::with_capacity(2 * (cols - 1) * (rows - 1));
        let stride = cols as u32;
        for iy in 0..config.height_segments {
            for ix in 0..config.width_segments {
                let a = ix + stride * iy;
                let b = ix + stride * (iy + 1);
                let c = ix + 1 + stride * (iy + 1);
                let d = ix + 1 + stride * iy;
                faces.push([a, b, d]);
                faces.push([b, c, d]);
            }
        }

        let base = config.bg_color.to_array();
        Ok(Self {
            width_segments: config.width_segments,
            height_segments: config.height_segments,
            original: positions.clone(),
            positions,
            phases: vec![0.0; vertices * POSITION_STRIDE],
            colors: base.repeat(vertices),
            faces,
            base_color: config.bg_color,
        })
    }

    /// Jittered plane with random per-component phases.
    ///
    /// Per vertex the generator is drawn in a fixed order: x, y, z jitter,
    /// then x, y, z phase.
    pub fn generate<R: Rng + ?Sized>(config: &TerrainConfig, rng: &mut R) -> FxResult<Self> {
        let mut mesh = Self::flat(config)?;
        for (pos, phase) in mesh
            .positions
            .chunks_exact_mut(POSITION_STRIDE)
            .zip(mesh.phases.chunks_exact_mut(POSITION_STRIDE))
        {
            pos[0] += rng.gen_range(-JITTER_XY..JITTER_XY);
            pos[1] += rng.gen_range(-JITTER_XY..JITTER_XY);
            pos[2] += rng.gen_range(-JITTER_Z..JITTER_Z);
            for p in phase.iter_mut() {
                *p = rng.gen_range(0.0..TAU);
            }
        }
        mesh.original.copy_from_slice(&mesh.positions);
        lumen_core::info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "terrain mesh generated"
        );
        Ok(mesh)
    }

    // -- Topology -----------------------------------------------------------

    #[must_use]
    pub fn segments(&self) -> (u32, u32) {
        (self.width_segments, self.height_segments)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_STRIDE
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    // -- Buffers ------------------------------------------------------------

    /// Current (deformed) positions.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Positions snapshotted after jitter.
    #[must_use]
    pub fn original_positions(&self) -> &[f32] {
        &self.original
    }

    /// One phase in `[0, 2π)` per position component.
    #[must_use]
    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    #[must_use]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    #[must_use]
    pub fn base_color(&self) -> RgbF {
        self.base_color
    }

    pub(super) fn animation_buffers_mut(&mut self) -> (&mut [f32], &[f32], &[f32]) {
        (&mut self.positions, &self.original, &self.phases)
    }

    // -- Per-vertex access --------------------------------------------------

    #[must_use]
    pub fn vertex(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions, index * POSITION_STRIDE)
    }

    #[must_use]
    pub fn vertex_color(&self, index: usize) -> RgbF {
        let i = index * COLOR_STRIDE;
        RgbF::new(self.colors[i], self.colors[i + 1], self.colors[i + 2])
    }

    pub fn set_vertex_color(&mut self, index: usize, color: RgbF) {
        let i = index * COLOR_STRIDE;
        self.colors[i..i + COLOR_STRIDE].copy_from_slice(&color.to_array());
    }

    /// Paint all three corners of `face`.
    pub fn set_face_color(&mut self, face: usize, color: RgbF) {
        for v in self.faces[face] {
            self.set_vertex_color(v as usize, color);
        }
    }

    // -- Per-face geometry --------------------------------------------------

    #[must_use]
    pub fn triangle(&self, face: usize) -> [Vec3; 3] {
        self.faces[face].map(|v| self.vertex(v as usize))
    }

    /// Unit normal of `face` for flat shading (counter-clockwise winding).
    #[must_use]
    pub fn face_normal(&self, face: usize) -> Vec3 {
        let [a, b, c] = self.triangle(face);
        (b - a).cross(c - a).normalize()
    }

    /// Bounds of the current positions.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_positions(&self.positions)
    }
}

fn grid_dims(config: &TerrainConfig) -> FxResult<(usize, usize)> {
    let cols = config.width_segments as usize + 1;
    let rows = config.height_segments as usize + 1;
    cols.checked_mul(rows)
        .filter(|n| *n <= MAX_VERTICES)
        .map(|_| (cols, rows))
        .ok_or_else(|| {
            FxError::config(
                "width_segments",
                format!("{}x{}", config.width_segments, config.height_segments),
                format!("vertex count exceeds {MAX_VERTICES}"),
            )
        })
}
