//! Pivot point and orientation policies.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Where the shared pivot of the selection sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotAlignment {
    /// Arithmetic mean of all selected origins
    #[default]
    MedianPoint,
    /// Every node transforms about its own origin. The gizmo itself sits at the median point.
    IndividualOrigins,
    /// Origin of the active (last selected) node
    ActiveElement,
    /// Center of the box enclosing all selected origins
    BoundingBox,
    /// Minimum corner of that box
    Minimum,
    /// Maximum corner of that box. Also mirrors the gizmo axes.
    Maximum,
    /// The externally supplied 3D cursor, regardless of the selection
    GlobalCursor,
}

impl PivotAlignment {
    /// Sign applied to the gizmo axes for drag math.
    pub fn axis_sign(self) -> f32 {
        if self == PivotAlignment::Maximum {
            -1.0
        } else {
            1.0
        }
    }
}

/// How the gizmo frame is oriented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationAlignment {
    /// World axes
    #[default]
    Global,
    /// Axes of the selected node. Only honoured for a single selection.
    Local,
    /// Camera axes
    View,
}

/// Resolves `Local` to `Global` unless exactly one node is selected.
pub fn active_orientation_alignment(
    alignment: OrientationAlignment,
    selection_count: usize,
) -> OrientationAlignment {
    if alignment == OrientationAlignment::Local && selection_count != 1 {
        OrientationAlignment::Global
    } else {
        alignment
    }
}

/// Whether rotation and scale act about one shared pivot.
pub fn is_pivot_distributed(alignment: PivotAlignment, selection_count: usize) -> bool {
    selection_count > 1 && alignment != PivotAlignment::IndividualOrigins
}

/// Computes the pivot from the world positions of the selected nodes.
///
/// `active` is the position of the active node, `cursor` the 3D cursor. An
/// empty selection yields the origin, except for the cursor policy.
pub fn compute_pivot(
    alignment: PivotAlignment,
    positions: &[Vec3],
    active: Option<Vec3>,
    cursor: Vec3,
) -> Vec3 {
    if alignment == PivotAlignment::GlobalCursor {
        return cursor;
    }
    if positions.is_empty() {
        return Vec3::ZERO;
    }

    match alignment {
        PivotAlignment::MedianPoint | PivotAlignment::IndividualOrigins => median_point(positions),
        PivotAlignment::ActiveElement => active.unwrap_or(Vec3::ZERO),
        PivotAlignment::BoundingBox => {
            let (min, max) = bounds(positions);
            (min + max) * 0.5
        }
        PivotAlignment::Minimum => bounds(positions).0,
        PivotAlignment::Maximum => bounds(positions).1,
        PivotAlignment::GlobalCursor => cursor,
    }
}

/// Computes the gizmo orientation for an already resolved alignment.
pub fn compute_orientation(
    alignment: OrientationAlignment,
    local: Option<Quat>,
    camera: Quat,
) -> Quat {
    match alignment {
        OrientationAlignment::Global => Quat::IDENTITY,
        OrientationAlignment::Local => local.unwrap_or(Quat::IDENTITY),
        OrientationAlignment::View => camera,
    }
}

fn median_point(positions: &[Vec3]) -> Vec3 {
    positions.iter().copied().sum::<Vec3>() / positions.len() as f32
}

fn bounds(positions: &[Vec3]) -> (Vec3, Vec3) {
    positions.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), &p| (min.min(p), max.max(p)),
    )
}
