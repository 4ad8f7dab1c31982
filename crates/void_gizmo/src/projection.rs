//! Camera projection and viewport mapping.
//!
//! Screen coordinates are pixels with the origin at the top-left corner of
//! the viewport and y pointing down, matching pointer input.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4Swizzles};

use crate::geometry::Ray;
use crate::EPSILON;

/// Render viewport in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height.abs() < EPSILON {
            1.0
        } else {
            self.width / self.height
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width.abs() < EPSILON || self.height.abs() < EPSILON
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_size(1.0, 1.0)
    }
}

/// Projection matrix together with the viewport it maps to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub matrix: Mat4,
    pub viewport: Viewport,
}

impl Projection {
    pub fn new(matrix: Mat4, viewport: Viewport) -> Self {
        Self { matrix, viewport }
    }

    /// Right-handed perspective projection.
    pub fn perspective(fov_y_radians: f32, near: f32, far: f32, viewport: Viewport) -> Self {
        let matrix = Mat4::perspective_rh(fov_y_radians, viewport.aspect_ratio(), near, far);
        Self::new(matrix, viewport)
    }

    /// Right-handed orthographic projection showing `height` world units vertically.
    pub fn orthographic(height: f32, near: f32, far: f32, viewport: Viewport) -> Self {
        let half_h = height * 0.5;
        let half_w = half_h * viewport.aspect_ratio();
        let matrix = Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, near, far);
        Self::new(matrix, viewport)
    }

    /// The last matrix element is 1 for orthographic and 0 for perspective projections.
    #[inline]
    pub fn is_orthographic(&self) -> bool {
        (self.matrix.w_axis.w - 1.0).abs() < EPSILON
    }

    /// Projects a view-space point to screen pixels.
    ///
    /// Returns `None` for points at or behind the eye.
    pub fn project_point(&self, view_point: Vec3) -> Option<Vec2> {
        if self.viewport.is_degenerate() {
            return None;
        }

        let clip = self.matrix * view_point.extend(1.0);
        if clip.w <= EPSILON {
            return None;
        }

        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            self.viewport.x + (ndc.x + 1.0) * 0.5 * self.viewport.width,
            self.viewport.y + (1.0 - ndc.y) * 0.5 * self.viewport.height,
        ))
    }

    /// World-space ray through a screen position.
    ///
    /// `camera` is the camera's world matrix (the inverse of the view matrix).
    pub fn view_ray(&self, pointer: Vec2, camera: &Mat4) -> Option<Ray> {
        if self.viewport.is_degenerate() {
            return None;
        }

        let ndc_x = (pointer.x - self.viewport.x) / self.viewport.width * 2.0 - 1.0;
        let ndc_y = 1.0 - (pointer.y - self.viewport.y) / self.viewport.height * 2.0;

        // Depth 0 and 1 lie on the ray for both depth conventions.
        let inv_proj = self.matrix.inverse();
        let near = inv_proj.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv_proj.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        // A singular projection inverts to NaN or infinity.
        if !near.is_finite() || !far.is_finite() {
            return None;
        }

        Ray::from_points(camera.transform_point3(near), camera.transform_point3(far))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(60f32.to_radians(), 0.1, 1000.0, Viewport::default())
    }
}

/// Everything the model needs to know about the current camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSetup {
    /// World → view
    pub view: Mat4,
    pub projection: Projection,
    /// Camera world matrix (view → world)
    pub camera: Mat4,
}

impl ViewSetup {
    /// Builds the view matrix from the camera's world matrix.
    pub fn from_camera(camera: Mat4, projection: Projection) -> Self {
        Self {
            view: camera.inverse(),
            projection,
            camera,
        }
    }

    #[inline]
    pub fn camera_position(&self) -> Vec3 {
        self.camera.w_axis.xyz()
    }

    /// Viewing direction (-Z of the camera).
    pub fn camera_forward(&self) -> Vec3 {
        (-self.camera.z_axis.xyz()).normalize_or_zero()
    }

    pub fn camera_rotation(&self) -> Quat {
        let (_, rotation, _) = self.camera.to_scale_rotation_translation();
        rotation.normalize()
    }

    /// Direction in which `target` is seen from the camera.
    pub fn view_direction_to(&self, target: Vec3) -> Vec3 {
        if self.projection.is_orthographic() {
            return self.camera_forward();
        }
        let dir = (target - self.camera_position()).normalize_or_zero();
        if dir == Vec3::ZERO {
            self.camera_forward()
        } else {
            dir
        }
    }

    /// Projects a world-space point to screen pixels.
    pub fn project_world(&self, point: Vec3) -> Option<Vec2> {
        self.projection.project_point(self.view.transform_point3(point))
    }

    pub fn view_ray(&self, pointer: Vec2) -> Option<Ray> {
        self.projection.view_ray(pointer, &self.camera)
    }
}

impl Default for ViewSetup {
    fn default() -> Self {
        Self::from_camera(Mat4::IDENTITY, Projection::default())
    }
}
