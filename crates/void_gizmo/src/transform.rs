//! Node transforms and the cached gizmo frame.

use glam::{Mat4, Quat, Vec3};

use crate::EPSILON;

/// Local transform of a selectable node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[inline]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    #[inline]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Move in world space.
    #[inline]
    pub fn move_global(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate in place, `rotation` applied after the current one.
    pub fn turn(&mut self, rotation: Quat) {
        self.rotation = (rotation * self.rotation).normalize();
    }

    /// Rotate around a world-space pivot.
    pub fn turn_about(&mut self, rotation: Quat, pivot: Vec3) {
        self.position = pivot + rotation * (self.position - pivot);
        self.turn(rotation);
    }

    /// Add `delta` to the scale vector.
    #[inline]
    pub fn resize(&mut self, delta: Vec3) {
        self.scale += delta;
    }

    /// Add `delta` to the scale vector and move away from (or towards) `pivot`
    /// in proportion to the relative scale change on each local axis.
    ///
    /// Axes with a degenerate old scale keep their offset.
    pub fn resize_about(&mut self, delta: Vec3, pivot: Vec3) {
        let old = self.scale;
        self.scale += delta;

        let ratio = Vec3::new(
            safe_ratio(delta.x, old.x),
            safe_ratio(delta.y, old.y),
            safe_ratio(delta.z, old.z),
        );
        let local_offset = self.rotation.inverse() * (self.position - pivot);
        self.position += self.rotation * (local_offset * ratio);
    }
}

fn safe_ratio(delta: f32, old: f32) -> f32 {
    if old.abs() < EPSILON {
        0.0
    } else {
        delta / old
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Cached manipulator frame (pivot, orientation, on-screen size).
///
/// This is derived data. Setters on the model call [`GizmoTransform::invalidate`]
/// and the model recomputes the frame on its next update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GizmoTransform {
    pub position: Vec3,
    pub orientation: Quat,
    /// Uniform scale that keeps the gizmo roughly constant on screen.
    pub size: f32,
    /// `-1` when the axes are mirrored (maximum pivot), `1` otherwise.
    pub axis_sign: f32,
    dirty: bool,
}

impl GizmoTransform {
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// World matrix of the gizmo geometry.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.size * self.axis_sign),
            self.orientation,
            self.position,
        )
    }

    /// World direction of a unit gizmo axis, including mirroring.
    pub fn axis_direction(&self, unit: Vec3) -> Vec3 {
        self.orientation * unit * self.axis_sign
    }
}

impl Default for GizmoTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            size: 1.0,
            axis_sign: 1.0,
            dirty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn test_turn_about_pivot() {
        let mut t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        t.turn_about(Quat::from_rotation_y(FRAC_PI_2), Vec3::ZERO);
        assert!(t.position.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
        assert!(t
            .rotation
            .abs_diff_eq(Quat::from_rotation_y(FRAC_PI_2), 1e-5));
    }

    #[test]
    fn test_resize_about_pivot() {
        let mut t = Transform::from_position(Vec3::new(2.0, 0.0, 0.0));
        t.resize_about(Vec3::ONE, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::splat(2.0));
        assert!(t.position.abs_diff_eq(Vec3::new(4.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_resize_about_degenerate_scale() {
        let mut t = Transform::from_position(Vec3::new(2.0, 0.0, 0.0)).with_scale(Vec3::ZERO);
        t.resize_about(Vec3::ONE, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_gizmo_matrix_mirrors_axes() {
        let gizmo = GizmoTransform {
            position: Vec3::new(1.0, 2.0, 3.0),
            size: 2.0,
            axis_sign: -1.0,
            ..Default::default()
        };
        let tip = gizmo.matrix().transform_point3(Vec3::X);
        assert!(tip.abs_diff_eq(Vec3::new(-1.0, 2.0, 3.0), 1e-5));
        assert!(gizmo.axis_direction(Vec3::Y).abs_diff_eq(Vec3::NEG_Y, 1e-6));
    }
}
