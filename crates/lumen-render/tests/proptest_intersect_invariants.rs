//! Property-based invariants for picking geometry.
//!
//! 1. A reported triangle hit lies on the triangle's plane and inside its
//!    bounds.
//! 2. Any ray that hits a triangle also hits the triangle's bounding box.
//! 3. Projecting a point and casting back through it reaches the point.

use lumen_core::Ndc;
use lumen_render::intersect::{Aabb, ray_aabb_hit_t, ray_triangle};
use lumen_render::{PerspectiveCamera, Ray, Vec3};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn point_strategy() -> impl Strategy<Value = Vec3> {
    (-50.0f32..50.0, -50.0f32..50.0, -5.0f32..5.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn ray_strategy() -> impl Strategy<Value = Ray> {
    (point_strategy(), -1.0f32..1.0, -1.0f32..1.0).prop_map(|(p, dx, dy)| Ray {
        origin: Vec3::new(p.x, p.y, 40.0),
        direction: Vec3::new(dx, dy, -1.0).normalize(),
    })
}

proptest! {
    #[test]
    fn triangle_hits_are_on_the_triangle(
        a in point_strategy(),
        b in point_strategy(),
        c in point_strategy(),
        ray in ray_strategy(),
    ) {
        let Some(t) = ray_triangle(&ray, a, b, c) else {
            return Ok(());
        };
        prop_assert!(t > 0.0);
        let p = ray.at(t);
        let n = (b - a).cross(c - a);
        prop_assume!(n.length() > 1e-2);
        // Grazing rays amplify rounding along the ray.
        prop_assume!(ray.direction.dot(n.normalize()).abs() > 0.1);
        let plane_dist = (p - a).dot(n.normalize()).abs();
        prop_assert!(plane_dist < 1e-2, "hit {} off the plane", plane_dist);

        let bounds = Aabb::from_positions(&[a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z]).unwrap();
        let tol = 1e-2;
        prop_assert!(p.x >= bounds.min.x - tol && p.x <= bounds.max.x + tol);
        prop_assert!(p.y >= bounds.min.y - tol && p.y <= bounds.max.y + tol);
        let slack = Vec3::new(tol, tol, tol);
        let padded = Aabb { min: bounds.min - slack, max: bounds.max + slack };
        prop_assert!(ray_aabb_hit_t(&ray, &padded).is_some());
    }

    #[test]
    fn project_then_unproject_reaches_point(
        x in -30.0f32..30.0,
        y in -30.0f32..30.0,
        aspect in 0.5f32..3.0,
    ) {
        let camera = PerspectiveCamera::new(aspect);
        let (nx, ny) = camera.project(Vec3::new(x, y, 0.0)).unwrap();
        prop_assume!(nx.abs() <= 1.0 && ny.abs() <= 1.0);
        let ray = camera.ray_from_ndc(Ndc::new(nx, ny).unwrap());
        let t = -ray.origin.z / ray.direction.z;
        let hit = ray.at(t);
        prop_assert!((hit.x - x).abs() < 1e-3);
        prop_assert!((hit.y - y).abs() < 1e-3);
    }
}
