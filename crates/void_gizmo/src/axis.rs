//! Per-axis state and the derived selection state.

use core::ops::{Index, IndexMut};

use glam::Vec3;

/// Coordinate axis of the gizmo frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub const fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// State of a single gizmo axis, read by the renderer to pick colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisState {
    pub is_enabled: bool,
    /// Hovered (highlighted)
    pub is_selected: bool,
    /// Part of the running drag
    pub is_active: bool,
    /// Fade factor in `[0, 1]`
    pub visibility: f32,
}

impl AxisState {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility > 0.5
    }

    #[inline]
    pub fn is_selectable(&self) -> bool {
        self.is_visible() && self.is_enabled
    }
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            is_enabled: true,
            is_selected: false,
            is_active: false,
            visibility: 1.0,
        }
    }
}

/// The three axis states, indexable by [`Axis`] or by `usize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxesState {
    axes: [AxisState; 3],
}

impl AxesState {
    pub fn iter(&self) -> impl Iterator<Item = &AxisState> {
        self.axes.iter()
    }

    pub fn any_selected(&self) -> bool {
        self.axes.iter().any(|a| a.is_selected)
    }

    pub fn any_active(&self) -> bool {
        self.axes.iter().any(|a| a.is_active)
    }

    pub fn all_enabled(&self) -> bool {
        self.axes.iter().all(|a| a.is_enabled)
    }

    pub fn clear_selected(&mut self) {
        for axis in &mut self.axes {
            axis.is_selected = false;
        }
    }

    pub fn clear_active(&mut self) {
        for axis in &mut self.axes {
            axis.is_active = false;
        }
    }

    /// Promote the hovered axes to the active set.
    pub fn activate_selected(&mut self) {
        for axis in &mut self.axes {
            axis.is_active = axis.is_selected;
        }
    }

    pub(crate) fn select(&mut self, axes: [bool; 3]) {
        for (state, selected) in self.axes.iter_mut().zip(axes) {
            state.is_selected = selected;
        }
    }

    fn flags(&self, pick: impl Fn(&AxisState) -> bool) -> [bool; 3] {
        [pick(&self.axes[0]), pick(&self.axes[1]), pick(&self.axes[2])]
    }

    pub fn selected_flags(&self) -> [bool; 3] {
        self.flags(|a| a.is_selected)
    }

    pub fn active_flags(&self) -> [bool; 3] {
        self.flags(|a| a.is_active)
    }
}

impl Index<usize> for AxesState {
    type Output = AxisState;

    fn index(&self, index: usize) -> &AxisState {
        &self.axes[index]
    }
}

impl IndexMut<usize> for AxesState {
    fn index_mut(&mut self, index: usize) -> &mut AxisState {
        &mut self.axes[index]
    }
}

impl Index<Axis> for AxesState {
    type Output = AxisState;

    fn index(&self, axis: Axis) -> &AxisState {
        &self.axes[axis.index()]
    }
}

impl IndexMut<Axis> for AxesState {
    fn index_mut(&mut self, axis: Axis) -> &mut AxisState {
        &mut self.axes[axis.index()]
    }
}

/// Which part of the gizmo is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionState {
    #[default]
    None,
    XAxis,
    YAxis,
    ZAxis,
    XYPlane,
    YZPlane,
    ZXPlane,
    /// All axes at once
    Uniform,
}

impl SelectionState {
    /// Derive the state from the three selection flags.
    pub fn from_flags(flags: [bool; 3]) -> Self {
        match flags {
            [true, true, true] => SelectionState::Uniform,
            [true, true, false] => SelectionState::XYPlane,
            [false, true, true] => SelectionState::YZPlane,
            [true, false, true] => SelectionState::ZXPlane,
            [true, false, false] => SelectionState::XAxis,
            [false, true, false] => SelectionState::YAxis,
            [false, false, true] => SelectionState::ZAxis,
            [false, false, false] => SelectionState::None,
        }
    }

    /// The axis flags this state covers.
    pub fn flags(self) -> [bool; 3] {
        match self {
            SelectionState::None => [false, false, false],
            SelectionState::XAxis => [true, false, false],
            SelectionState::YAxis => [false, true, false],
            SelectionState::ZAxis => [false, false, true],
            SelectionState::XYPlane => [true, true, false],
            SelectionState::YZPlane => [false, true, true],
            SelectionState::ZXPlane => [true, false, true],
            SelectionState::Uniform => [true, true, true],
        }
    }

    pub fn axis(self) -> Option<Axis> {
        match self {
            SelectionState::XAxis => Some(Axis::X),
            SelectionState::YAxis => Some(Axis::Y),
            SelectionState::ZAxis => Some(Axis::Z),
            _ => None,
        }
    }

    /// Plane state spanned by `a` and its successor in X → Y → Z → X order.
    pub fn plane_from(a: Axis) -> Self {
        match a {
            Axis::X => SelectionState::XYPlane,
            Axis::Y => SelectionState::YZPlane,
            Axis::Z => SelectionState::ZXPlane,
        }
    }

    #[inline]
    pub fn is_axis(self) -> bool {
        self.axis().is_some()
    }

    #[inline]
    pub fn is_plane(self) -> bool {
        matches!(
            self,
            SelectionState::XYPlane | SelectionState::YZPlane | SelectionState::ZXPlane
        )
    }
}

/// Fade factor for an axis seen along `view_dir`.
///
/// The angle to the nearest view-parallel direction (0° or 180°) is run through
/// a smoothstep between `min_angle` and `max_angle` (degrees). An axis pointing
/// straight at the camera gets 0.
pub fn axis_visibility(axis_dir: Vec3, view_dir: Vec3, min_angle: f32, max_angle: f32) -> f32 {
    let axis_dir = axis_dir.normalize_or_zero();
    let view_dir = view_dir.normalize_or_zero();
    if axis_dir == Vec3::ZERO || view_dir == Vec3::ZERO {
        return 1.0;
    }

    let cos = axis_dir.dot(view_dir).abs().clamp(0.0, 1.0);
    let off_axis = cos.acos().to_degrees();

    if max_angle <= min_angle {
        return if off_axis > min_angle { 1.0 } else { 0.0 };
    }
    let t = ((off_axis - min_angle) / (max_angle - min_angle)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectable_requires_visibility() {
        let mut state = AxisState::default();
        assert!(state.is_selectable());

        state.visibility = 0.5;
        assert!(!state.is_visible());
        assert!(!state.is_selectable());

        state.visibility = 1.0;
        state.is_enabled = false;
        assert!(!state.is_selectable());
    }

    #[test]
    fn test_state_from_flags() {
        assert_eq!(SelectionState::from_flags([true, false, false]), SelectionState::XAxis);
        assert_eq!(SelectionState::from_flags([false, true, true]), SelectionState::YZPlane);
        assert_eq!(SelectionState::from_flags([true, false, true]), SelectionState::ZXPlane);
        assert_eq!(SelectionState::from_flags([true, true, true]), SelectionState::Uniform);
        assert_eq!(SelectionState::from_flags([false; 3]), SelectionState::None);

        for axis in Axis::ALL {
            let plane = SelectionState::plane_from(axis);
            assert_eq!(SelectionState::from_flags(plane.flags()), plane);
        }
    }

    #[test]
    fn test_visibility_looking_down_axis() {
        let v = axis_visibility(Vec3::Z, Vec3::NEG_Z, 5.0, 15.0);
        assert!(v <= 0.5);
        let v = axis_visibility(Vec3::Z, Vec3::Z, 5.0, 15.0);
        assert!(v <= 0.5);
    }

    #[test]
    fn test_visibility_perpendicular_axis() {
        assert_eq!(axis_visibility(Vec3::X, Vec3::NEG_Z, 5.0, 15.0), 1.0);
    }

    #[test]
    fn test_visibility_is_continuous() {
        let view = Vec3::NEG_Z;
        let mut last = 0.0;
        for step in 0..=90 {
            let angle = (step as f32).to_radians();
            let axis = Vec3::new(angle.sin(), 0.0, -angle.cos());
            let v = axis_visibility(axis, view, 5.0, 15.0);
            assert!(v >= last - 1e-6);
            assert!(v - last < 0.25);
            last = v;
        }
    }
}
