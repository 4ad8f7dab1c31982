//! # void_gizmo - Transform Manipulator Model
//!
//! The editor-side model behind the translate/rotate/scale gizmo:
//!
//! - **Hit testing**: screen-space picking of axes, axis planes and the uniform handle
//! - **Pivots**: median, bounding box, active element, min/max corner, 3D cursor
//! - **Orientation**: global, local (single selection only) or view aligned frames
//! - **Raster**: grid snapping that keeps the sub-step remainder between frames
//! - **Dragging**: snapshot on activation, commit on release, full rollback on cancel
//!
//! ## Architecture
//!
//! ```text
//! Pointer Input → TransformGizmoModel → HitTester / pivot → TransformApplier → Selectable
//! ```
//!
//! The model never owns scene nodes. It holds [`NodeId`] handles and reaches the
//! nodes through a caller supplied [`NodeRegistry`]. Rendering of the gizmo is
//! left to the host, which reads [`AxesState`] and [`GizmoTransform`].

pub mod applier;
pub mod axis;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hit_test;
pub mod model;
pub mod pivot;
pub mod projection;
pub mod raster;
pub mod selectable;
pub mod selection;
pub mod transform;

pub use applier::TransformApplier;
pub use axis::{axis_visibility, AxesState, Axis, AxisState, SelectionState};
pub use config::GizmoConfig;
pub use error::{GizmoError, Result};
pub use geometry::{Plane, Ray};
pub use hit_test::{Hit, HitTester, ScreenGizmo};
pub use model::{MouseButton, TransformDelta, TransformGizmoModel, TransformMode};
pub use pivot::{OrientationAlignment, PivotAlignment};
pub use projection::{Projection, ViewSetup, Viewport};
pub use raster::{RasterConfig, RasterMode, RasterScalar, RasterVector};
pub use selectable::{apply_transform, NodeId, NodeRegistry, Selectable, TransformFlags};
pub use selection::{SelectionEvent, SelectionList};
pub use transform::{GizmoTransform, Transform};

/// Tolerance used for degenerate-geometry checks throughout the crate.
pub const EPSILON: f32 = 1e-6;

pub mod prelude {
    pub use crate::{
        GizmoConfig, MouseButton, NodeId, NodeRegistry, OrientationAlignment, PivotAlignment,
        Projection, RasterMode, Selectable, SelectionState, Transform, TransformGizmoModel,
        TransformMode, ViewSetup, Viewport,
    };
}
