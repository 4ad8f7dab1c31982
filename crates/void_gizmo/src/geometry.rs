//! Geometric primitives for picking.
//!
//! Only what the manipulator needs: rays, planes, skew-line closest points and
//! a few 2D screen-space tests.

use glam::{Vec2, Vec3};

use crate::EPSILON;

/// 3D ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, or `None` when the direction has no length.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        Some(Self { origin, direction })
    }

    pub fn from_points(start: Vec3, end: Vec3) -> Option<Self> {
        Self::new(start, end - start)
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Plane in point-normal form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    /// Normalized normal
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Option<Self> {
        let normal = normal.normalize_or_zero();
        if normal == Vec3::ZERO {
            return None;
        }
        Some(Self { point, normal })
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.point).dot(self.normal)
    }
}

/// Intersection of a ray with a plane, in front of the ray origin.
///
/// Returns `None` if the ray is (nearly) parallel to the plane.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    let denom = plane.normal.dot(ray.direction);
    if denom.abs() < 1e-4 {
        return None;
    }

    let t = (plane.point - ray.origin).dot(plane.normal) / denom;
    if t < 0.0 {
        return None;
    }

    Some(ray.at(t))
}

/// Closest points between two infinite lines given as rays.
///
/// Returns `(point_on_a, point_on_b)`, or `None` for (nearly) parallel lines.
pub fn closest_points_between_lines(a: &Ray, b: &Ray) -> Option<(Vec3, Vec3)> {
    let w = a.origin - b.origin;
    let d1 = a.direction;
    let d2 = b.direction;

    let aa = d1.dot(d1);
    let ab = d1.dot(d2);
    let bb = d2.dot(d2);
    let d = d1.dot(w);
    let e = d2.dot(w);

    let denom = aa * bb - ab * ab;
    if denom.abs() < EPSILON {
        return None;
    }

    let s = (ab * e - bb * d) / denom;
    let t = (aa * e - ab * d) / denom;

    Some((a.at(s), b.at(t)))
}

/// Distance from `point` to the segment `start..end` in 2D.
pub fn distance_to_segment(start: Vec2, end: Vec2, point: Vec2) -> f32 {
    let dir = end - start;
    let len_sq = dir.length_squared();
    if len_sq < EPSILON {
        return point.distance(start);
    }

    let t = ((point - start).dot(dir) / len_sq).clamp(0.0, 1.0);
    point.distance(start + dir * t)
}

/// Point-in-convex-quad test, independent of winding order.
pub fn point_in_quad(quad: &[Vec2; 4], point: Vec2) -> bool {
    let mut sign = 0.0f32;
    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let cross = (b - a).perp_dot(point - a);
        if cross.abs() < EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    // A fully degenerate quad contains nothing.
    sign != 0.0
}
