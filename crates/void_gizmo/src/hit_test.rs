//! Screen-space hit testing of the gizmo handles, plus ray picking.

use glam::{Vec2, Vec3};

use crate::axis::{AxesState, Axis, SelectionState};
use crate::geometry::{self, Plane};
use crate::projection::ViewSetup;
use crate::transform::GizmoTransform;

/// Gizmo handle geometry projected to screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenGizmo {
    pub origin: Vec2,
    /// Axis tips
    pub ends: [Option<Vec2>; 3],
    /// Axis points at the plane handle size
    pub half: [Option<Vec2>; 3],
    /// Outer plane corners for XY, YZ and ZX
    pub planes: [Option<Vec2>; 3],
    /// Screen bounds of the uniform handle
    pub uniform: Option<(Vec2, Vec2)>,
}

/// Result of a hit test.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hit {
    pub state: SelectionState,
    /// Normalized screen direction of the hit axis (zero for non-axis hits).
    pub arrow_direction: Vec2,
}

/// Screen-space handle tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTester {
    /// Pick distance around axis lines, in pixels.
    pub selection_radius: f32,
    /// Plane handle size as a fraction of the axis length.
    pub axes_plane_size: f32,
    /// Half extent of the uniform handle cube as a fraction of the axis length.
    pub uniform_box_size: f32,
}

impl Default for HitTester {
    fn default() -> Self {
        Self {
            selection_radius: 5.0,
            axes_plane_size: 0.3,
            uniform_box_size: 0.15,
        }
    }
}

impl HitTester {
    /// Projects the handles of `gizmo`. `None` if the gizmo origin is off screen
    /// or behind the camera.
    pub fn project(&self, gizmo: &GizmoTransform, view: &ViewSetup) -> Option<ScreenGizmo> {
        let matrix = gizmo.matrix();
        let project = |local: Vec3| view.project_world(matrix.transform_point3(local));

        let origin = project(Vec3::ZERO)?;
        let size = self.axes_plane_size;

        let mut screen = ScreenGizmo {
            origin,
            ends: [None; 3],
            half: [None; 3],
            planes: [None; 3],
            uniform: None,
        };

        for axis in Axis::ALL {
            let i = axis.index();
            let next = Axis::ALL[(i + 1) % 3];
            screen.ends[i] = project(axis.unit());
            screen.half[i] = project(axis.unit() * size);
            screen.planes[i] = project((axis.unit() + next.unit()) * size);
        }

        let u = self.uniform_box_size;
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut all_projected = true;
        for corner in 0..8u32 {
            let local = Vec3::new(
                if corner & 1 == 0 { -u } else { u },
                if corner & 2 == 0 { -u } else { u },
                if corner & 4 == 0 { -u } else { u },
            );
            match project(local) {
                Some(p) => {
                    min = min.min(p);
                    max = max.max(p);
                }
                None => all_projected = false,
            }
        }
        if all_projected {
            screen.uniform = Some((min, max));
        }

        Some(screen)
    }

    fn is_line_selected(&self, start: Vec2, end: Vec2, pointer: Vec2) -> bool {
        geometry::distance_to_segment(start, end, pointer) < self.selection_radius
    }

    /// Picks at most one handle under `pointer`.
    ///
    /// Order: single axes X, Y, Z, then planes XY, YZ, ZX, then the uniform
    /// handle. The first match wins.
    pub fn hit(
        &self,
        screen: &ScreenGizmo,
        axes: &AxesState,
        pointer: Vec2,
        planes_enabled: bool,
        uniform_enabled: bool,
    ) -> Hit {
        for axis in Axis::ALL {
            let i = axis.index();
            let Some(end) = screen.ends[i] else { continue };
            if axes[i].is_selectable() && self.is_line_selected(screen.origin, end, pointer) {
                return Hit {
                    state: SelectionState::from_flags(single(i)),
                    arrow_direction: (end - screen.origin).normalize_or_zero(),
                };
            }
        }

        if planes_enabled {
            for axis in Axis::ALL {
                let a = axis.index();
                let b = (a + 1) % 3;
                if !(axes[a].is_selectable() && axes[b].is_selectable()) {
                    continue;
                }
                let (Some(half_a), Some(half_b), Some(corner)) =
                    (screen.half[a], screen.half[b], screen.planes[a])
                else {
                    continue;
                };

                let quad = [screen.origin, half_a, corner, half_b];
                if geometry::point_in_quad(&quad, pointer)
                    || self.is_line_selected(half_a, corner, pointer)
                    || self.is_line_selected(half_b, corner, pointer)
                {
                    return Hit {
                        state: SelectionState::plane_from(axis),
                        arrow_direction: Vec2::ZERO,
                    };
                }
            }
        }

        if uniform_enabled {
            if let Some((min, max)) = screen.uniform {
                let inside = pointer.cmpge(min).all() && pointer.cmple(max).all();
                if inside {
                    return Hit {
                        state: SelectionState::Uniform,
                        arrow_direction: Vec2::ZERO,
                    };
                }
            }
        }

        Hit::default()
    }
}

fn single(index: usize) -> [bool; 3] {
    let mut flags = [false; 3];
    flags[index] = true;
    flags
}

/// World position under `pointer` on the active axis line or plane.
///
/// Two active axes pick on the plane they span through the gizmo origin; one
/// active axis picks the point on the axis line closest to the pointer ray.
/// Returns `None` when nothing is active or the geometry is degenerate.
pub fn pick_position(
    view: &ViewSetup,
    gizmo: &GizmoTransform,
    active: [bool; 3],
    pointer: Vec2,
) -> Option<Vec3> {
    let ray = view.view_ray(pointer)?;

    let plane_normal = match active {
        [_, true, true] => Some(Vec3::X),
        [true, true, _] => Some(Vec3::Z),
        [true, _, true] => Some(Vec3::Y),
        _ => None,
    };

    if let Some(normal) = plane_normal {
        let plane = Plane::new(gizmo.position, gizmo.orientation * normal)?;
        return geometry::ray_plane(&ray, &plane);
    }

    let axis = Axis::ALL.into_iter().find(|a| active[a.index()])?;
    let axis_ray = geometry::Ray::new(gizmo.position, gizmo.axis_direction(axis.unit()))?;
    let (_, on_axis) = geometry::closest_points_between_lines(&ray, &axis_ray)?;
    Some(on_axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{Projection, Viewport};
    use glam::Mat4;

    fn ortho_view() -> ViewSetup {
        // 10 world units over 500 pixels: 50 px per unit, origin at (250, 250).
        let projection = Projection::orthographic(10.0, 0.1, 100.0, Viewport::from_size(500.0, 500.0));
        ViewSetup::from_camera(Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)), projection)
    }

    fn gizmo(size: f32) -> GizmoTransform {
        let mut gizmo = GizmoTransform::default();
        gizmo.size = size;
        gizmo
    }

    fn visible_axes() -> AxesState {
        let mut axes = AxesState::default();
        // Z points at the camera.
        axes[Axis::Z].visibility = 0.0;
        axes
    }

    #[test]
    fn test_projection_layout() {
        let screen = HitTester::default().project(&gizmo(2.0), &ortho_view()).unwrap();
        assert!(screen.origin.abs_diff_eq(Vec2::new(250.0, 250.0), 1e-3));
        assert!(screen.ends[0].unwrap().abs_diff_eq(Vec2::new(350.0, 250.0), 1e-3));
        assert!(screen.ends[1].unwrap().abs_diff_eq(Vec2::new(250.0, 150.0), 1e-3));
    }

    #[test]
    fn test_axis_hit() {
        let tester = HitTester::default();
        let screen = tester.project(&gizmo(2.0), &ortho_view()).unwrap();
        let hit = tester.hit(&screen, &visible_axes(), Vec2::new(320.0, 253.0), true, false);
        assert_eq!(hit.state, SelectionState::XAxis);
        assert!(hit.arrow_direction.abs_diff_eq(Vec2::X, 1e-5));

        let hit = tester.hit(&screen, &visible_axes(), Vec2::new(248.0, 180.0), true, false);
        assert_eq!(hit.state, SelectionState::YAxis);
        assert!(hit.arrow_direction.abs_diff_eq(Vec2::NEG_Y, 1e-5));
    }

    #[test]
    fn test_plane_hit_only_in_plane_mode() {
        let tester = HitTester::default();
        let screen = tester.project(&gizmo(2.0), &ortho_view()).unwrap();
        // Plane handle spans 30 px from the origin on both axes.
        let pointer = Vec2::new(265.0, 235.0);

        let hit = tester.hit(&screen, &visible_axes(), pointer, true, false);
        assert_eq!(hit.state, SelectionState::XYPlane);

        let hit = tester.hit(&screen, &visible_axes(), pointer, false, false);
        assert_eq!(hit.state, SelectionState::None);
    }

    #[test]
    fn test_axis_beats_plane() {
        let tester = HitTester::default();
        let screen = tester.project(&gizmo(2.0), &ortho_view()).unwrap();
        // Inside the XY quad but within the radius of the X axis line.
        let hit = tester.hit(&screen, &visible_axes(), Vec2::new(270.0, 248.0), true, false);
        assert_eq!(hit.state, SelectionState::XAxis);
    }

    #[test]
    fn test_hidden_axis_is_not_hit() {
        let tester = HitTester::default();
        let screen = tester.project(&gizmo(2.0), &ortho_view()).unwrap();
        let mut axes = visible_axes();
        axes[Axis::X].visibility = 0.4;
        let hit = tester.hit(&screen, &axes, Vec2::new(320.0, 250.0), true, false);
        assert_eq!(hit.state, SelectionState::None);
    }

    #[test]
    fn test_uniform_hit() {
        let tester = HitTester::default();
        let screen = tester.project(&gizmo(2.0), &ortho_view()).unwrap();
        // Uniform cube half extent: 0.15 * 2 units = 15 px.
        let hit = tester.hit(&screen, &visible_axes(), Vec2::new(260.0, 260.0), false, true);
        assert_eq!(hit.state, SelectionState::Uniform);

        let hit = tester.hit(&screen, &visible_axes(), Vec2::new(280.0, 280.0), false, true);
        assert_eq!(hit.state, SelectionState::None);
    }

    #[test]
    fn test_pick_on_plane() {
        let view = ortho_view();
        let picked = pick_position(&view, &gizmo(2.0), [true, true, false], Vec2::new(300.0, 200.0))
            .unwrap();
        assert!(picked.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-3));
    }

    #[test]
    fn test_pick_on_axis() {
        let view = ortho_view();
        let picked = pick_position(&view, &gizmo(2.0), [true, false, false], Vec2::new(300.0, 200.0))
            .unwrap();
        assert!(picked.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-3));
    }

    #[test]
    fn test_pick_requires_active_axis() {
        let view = ortho_view();
        assert!(pick_position(&view, &gizmo(2.0), [false; 3], Vec2::new(300.0, 200.0)).is_none());
    }

    #[test]
    fn test_pick_along_view_axis_is_degenerate() {
        // The Z axis is parallel to the pick ray.
        let view = ortho_view();
        assert!(pick_position(&view, &gizmo(2.0), [false, false, true], Vec2::new(300.0, 200.0)).is_none());
    }
}
