//! Ray intersection tests.

use crate::camera::Ray;
use crate::geometry::Vec3;

const EPSILON: f32 = 1e-7;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Bounds of a flat `[x, y, z, x, y, z, ...]` position array.
    ///
    /// Returns `None` for an empty array.
    pub fn from_positions(positions: &[f32]) -> Option<Self> {
        let mut chunks = positions.chunks_exact(3);
        let first = chunks.next()?;
        let p0 = Vec3::new(first[0], first[1], first[2]);
        let (min, max) = chunks.fold((p0, p0), |(lo, hi), c| {
            let p = Vec3::new(c[0], c[1], c[2]);
            (lo.min(p), hi.max(p))
        });
        Some(Self { min, max })
    }
}

/// Slab-method ray–AABB intersection, returns Some(t) or None.
pub fn ray_aabb_hit_t(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let o = ray.origin;
    let d = ray.direction;
    let inv = Vec3::new(
        if d.x != 0.0 { 1.0 / d.x } else { f32::INFINITY },
        if d.y != 0.0 { 1.0 / d.y } else { f32::INFINITY },
        if d.z != 0.0 { 1.0 / d.z } else { f32::INFINITY },
    );

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;
    for (o, inv, lo, hi) in [
        (o.x, inv.x, aabb.min.x, aabb.max.x),
        (o.y, inv.y, aabb.min.y, aabb.max.y),
        (o.z, inv.z, aabb.min.z, aabb.max.z),
    ] {
        if inv.is_infinite() {
            // Parallel to the slab: inside or a miss.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Möller–Trumbore ray–triangle intersection, both faces.
///
/// Returns the ray parameter `t > 0` of the hit.
pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}
