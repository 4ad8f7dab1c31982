//! The manipulator model.
//!
//! Tracks the selected nodes, the hovered handle and the running drag, and
//! turns pointer input into translate, rotate and scale deltas.

use glam::{IVec2, Quat, Vec2, Vec3};

use crate::applier::TransformApplier;
use crate::axis::{axis_visibility, AxesState, Axis, SelectionState};
use crate::config::GizmoConfig;
use crate::hit_test::{self, HitTester};
use crate::pivot::{self, OrientationAlignment, PivotAlignment};
use crate::projection::ViewSetup;
use crate::raster::{RasterConfig, RasterMode, RasterScalar};
use crate::selectable::{apply_transform, NodeId, NodeRegistry};
use crate::selection::{SelectionEvent, SelectionList};
use crate::transform::{GizmoTransform, Transform};
use crate::EPSILON;

/// Transformation the gizmo performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

/// Mouse buttons understood by the host helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Delta written into the selection by one input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformDelta {
    Translate(Vec3),
    Rotate(Quat),
    Scale(Vec3),
}

/// State of a running drag.
#[derive(Clone, Debug)]
struct DragState {
    /// Local transforms at drag start, restored on cancel
    snapshot: Vec<(NodeId, Transform)>,
    /// Pick position minus gizmo origin at drag start
    pick_displacement: Vec3,
}

/// Selection and drag state of the transform gizmo.
///
/// Drive it once per frame with [`setup_view`](Self::setup_view) and
/// [`update`](Self::update), and forward pointer events either through the
/// `process_*` calls or the `on_*` host helpers.
pub struct TransformGizmoModel {
    config: GizmoConfig,
    /// A disabled gizmo ignores all input
    pub is_enabled: bool,
    transform_mode: TransformMode,
    pivot_alignment: PivotAlignment,
    orientation_alignment: OrientationAlignment,
    global_cursor: Vec3,

    selection: SelectionList,
    axes: AxesState,
    selection_state: SelectionState,
    arrow_direction: Vec2,

    view: ViewSetup,
    pivot: Vec3,
    gizmo: GizmoTransform,
    prev_gizmo: GizmoTransform,

    drag: Option<DragState>,
    angle_raster: RasterScalar,
    cursor_warp: Option<IVec2>,
    last_pointer: Vec2,
}

impl Default for TransformGizmoModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformGizmoModel {
    pub fn new() -> Self {
        Self::with_config(GizmoConfig::default())
    }

    pub fn with_config(mut config: GizmoConfig) -> Self {
        config.axes_plane_size = config.axes_plane_size.clamp(0.0, 1.0);
        Self {
            config,
            is_enabled: true,
            transform_mode: TransformMode::Translate,
            pivot_alignment: PivotAlignment::MedianPoint,
            orientation_alignment: OrientationAlignment::Global,
            global_cursor: Vec3::ZERO,
            selection: SelectionList::new(),
            axes: AxesState::default(),
            selection_state: SelectionState::None,
            arrow_direction: Vec2::ZERO,
            view: ViewSetup::default(),
            pivot: Vec3::ZERO,
            gizmo: GizmoTransform::default(),
            prev_gizmo: GizmoTransform::default(),
            drag: None,
            angle_raster: RasterScalar::default(),
            cursor_warp: None,
            last_pointer: Vec2::ZERO,
        }
    }

    // --- Frame ---

    /// Store the camera for this frame.
    pub fn setup_view(&mut self, view: ViewSetup) {
        self.view = view;
        self.gizmo.invalidate();
    }

    /// Recompute the gizmo frame if the view, the selection or a setting changed.
    pub fn update<R: NodeRegistry + ?Sized>(&mut self, registry: &R) {
        let selection_changed = self.selection.take_dirty();
        if selection_changed || self.gizmo.is_dirty() {
            self.refresh_gizmo(registry);
        }
    }

    /// Force a recompute on the next [`update`](Self::update), e.g. after the
    /// host moved selected nodes itself.
    pub fn invalidate(&mut self) {
        self.gizmo.invalidate();
    }

    fn refresh_gizmo<R: NodeRegistry + ?Sized>(&mut self, registry: &R) {
        let mut positions = Vec::with_capacity(self.selection.len());
        for id in self.selection.iter() {
            match registry.node(id) {
                Some(node) => positions.push(node.world_position()),
                None => log::warn!("{} is selected but no longer exists", id),
            }
        }

        let active = self.selection.active().and_then(|id| registry.node(id));
        self.pivot = pivot::compute_pivot(
            self.pivot_alignment,
            &positions,
            active.map(|node| node.world_position()),
            self.global_cursor,
        );

        self.gizmo.position = self.pivot + self.config.raster.free_offset();
        self.gizmo.orientation = pivot::compute_orientation(
            self.active_orientation_alignment(),
            active.map(|node| node.world_rotation()),
            self.view.camera_rotation(),
        );
        self.gizmo.axis_sign = self.pivot_alignment.axis_sign();
        self.gizmo.size = self.screen_constant_size();
        self.gizmo.mark_clean();

        self.update_axis_visibility();
    }

    /// `0.5 / proj[1][1]`, times the camera distance for perspective projections.
    fn screen_constant_size(&self) -> f32 {
        let proj = self.view.projection.matrix;
        let height = proj.y_axis.y.abs();
        if height < EPSILON {
            return self.config.gizmo_scale;
        }

        let distance = self.gizmo.position.distance(self.view.camera_position());
        // w is 1 for orthographic and 0 for perspective projections.
        let w = proj.w_axis.w;
        let by_distance = distance + (1.0 - distance) * w;

        0.5 / height * by_distance * self.config.gizmo_scale
    }

    fn update_axis_visibility(&mut self) {
        if !self.config.use_visibility {
            for axis in Axis::ALL {
                self.axes[axis].visibility = 1.0;
            }
            return;
        }

        let view_dir = self.view.view_direction_to(self.gizmo.position);
        for axis in Axis::ALL {
            self.axes[axis].visibility = axis_visibility(
                self.gizmo.axis_direction(axis.unit()),
                view_dir,
                self.config.visibility_min_angle,
                self.config.visibility_max_angle,
            );
        }
    }

    // --- Selection of the gizmo handles ---

    fn hit_tester(&self) -> HitTester {
        HitTester {
            selection_radius: self.config.selection_radius,
            axes_plane_size: self.config.axes_plane_size,
            uniform_box_size: self.config.uniform_box_size,
        }
    }

    /// Clear the hovered handle.
    pub fn reset_selection(&mut self) {
        self.axes.clear_selected();
        self.selection_state = SelectionState::None;
        self.arrow_direction = Vec2::ZERO;
    }

    /// Hit-test the gizmo handles under `pointer` and mark the hit one as selected.
    ///
    /// Does nothing while a drag is running. Uses the frame of the last
    /// [`update`](Self::update). Returns whether a handle was hit.
    pub fn process_selection(&mut self, pointer: Vec2) -> bool {
        if self.is_active() {
            return false;
        }

        let previous = self.selection_state;
        self.reset_selection();

        if !self.is_enabled || self.selection.is_empty() {
            return false;
        }

        self.update_axis_visibility();

        let tester = self.hit_tester();
        let Some(screen) = tester.project(&self.gizmo, &self.view) else {
            return false;
        };

        let hit = tester.hit(
            &screen,
            &self.axes,
            pointer,
            self.are_axes_planes_enabled(),
            self.is_uniform_transform_enabled(),
        );

        self.axes.select(hit.state.flags());
        self.selection_state = hit.state;
        self.arrow_direction = hit.arrow_direction;

        if hit.state != previous {
            log::debug!("Gizmo selection: {:?} -> {:?}", previous, hit.state);
        }
        hit.state != SelectionState::None
    }

    // --- Drag lifecycle ---

    /// Start (`activate`) or commit (`!activate`) a drag on the selected handle.
    ///
    /// Starting snapshots the selected nodes and fires their begin hooks;
    /// committing fires the end hooks. `frame_origin` is the top-left corner of
    /// the render frame on screen, needed for cursor alignment.
    pub fn process_activation<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        pointer: Vec2,
        activate: bool,
        frame_origin: Option<IVec2>,
    ) {
        if !activate {
            // Commits even when the hover was reset mid-drag.
            self.axes.clear_active();
            if let Some(drag) = self.drag.take() {
                self.end_drag(registry, &drag.snapshot);
                log::debug!("Gizmo drag committed ({} nodes)", drag.snapshot.len());
            }
            return;
        }

        if !self.is_enabled || !self.is_any_selected() {
            return;
        }
        self.axes.activate_selected();
        if self.drag.is_none() && self.are_any_nodes_selected() {
            self.begin_drag(registry, pointer, frame_origin);
        }
    }

    fn begin_drag<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        pointer: Vec2,
        frame_origin: Option<IVec2>,
    ) {
        let mut snapshot = Vec::with_capacity(self.selection.len());
        for id in self.selection.iter() {
            if let Some(node) = registry.node_mut(id) {
                node.on_transform_begin();
                snapshot.push((id, *node.local_transform()));
            }
        }

        self.prev_gizmo = self.gizmo;
        self.config.raster.vector.reset();
        self.angle_raster.reset();

        let mut pick_displacement = Vec3::ZERO;
        match frame_origin {
            Some(origin) if self.config.align_cursor => {
                self.align_cursor_to_origin(origin);
            }
            _ => {
                if let Some(position) = self.pick_position(pointer) {
                    pick_displacement = position - self.gizmo.position;
                }
            }
        }

        self.drag = Some(DragState {
            snapshot,
            pick_displacement,
        });
        log::debug!(
            "Gizmo drag started: {:?} {:?} ({} nodes)",
            self.transform_mode,
            self.selection_state,
            self.selection.len()
        );
    }

    /// Fires the end hooks on the nodes that got a begin hook, whatever the
    /// selection holds now.
    fn end_drag<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        snapshot: &[(NodeId, Transform)],
    ) {
        for (id, _) in snapshot {
            if let Some(node) = registry.node_mut(*id) {
                node.on_transform_end();
            }
        }
        self.config.raster.vector.reset();
        self.angle_raster.reset();
        self.refresh_gizmo(&*registry);
    }

    /// Abort the running drag and restore every node to its drag-start transform.
    ///
    /// The restore runs through the regular transform callback, followed by a
    /// single end hook per node.
    pub fn cancel_activation<R: NodeRegistry + ?Sized>(&mut self, registry: &mut R) {
        if !self.is_enabled {
            return;
        }
        let Some(drag) = self.drag.take() else {
            return;
        };

        self.axes.clear_active();
        for (id, stored) in &drag.snapshot {
            match registry.node_mut(*id) {
                Some(node) => apply_transform(node, |t| *t = *stored, false),
                None => log::warn!("{} vanished during the drag, cannot restore it", id),
            }
        }

        self.end_drag(registry, &drag.snapshot);
        log::debug!("Gizmo drag cancelled ({} nodes restored)", drag.snapshot.len());
    }

    fn align_cursor_to_origin(&mut self, frame_origin: IVec2) -> bool {
        match self.view.project_world(self.gizmo.position) {
            Some(point) => {
                self.cursor_warp = Some(frame_origin + point.as_ivec2());
                true
            }
            None => false,
        }
    }

    /// Pointer position the host should warp the cursor to, if any.
    pub fn take_cursor_warp(&mut self) -> Option<IVec2> {
        self.cursor_warp.take()
    }

    // --- Picking ---

    /// World position under `pointer` on the active axis or plane.
    pub fn pick_position(&self, pointer: Vec2) -> Option<Vec3> {
        hit_test::pick_position(&self.view, &self.gizmo, self.axes.active_flags(), pointer)
    }

    /// Translation that moves the picked point under `pointer`.
    ///
    /// Zero when nothing can be picked.
    pub fn pick_offset(&self, pointer: Vec2) -> Vec3 {
        let displacement = self
            .drag
            .as_ref()
            .map_or(Vec3::ZERO, |drag| drag.pick_displacement);

        match self.pick_position(pointer) {
            Some(position) => position - self.gizmo.position - displacement,
            None => Vec3::ZERO,
        }
    }

    // --- Transformation ---

    /// Process an absolute pointer position while dragging (plane handles and
    /// picking translation).
    pub fn process_absolute_transform<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        pointer: Vec2,
    ) -> Option<TransformDelta> {
        if !self.is_enabled || !self.is_active() {
            return None;
        }

        let picked = self.is_plane_selection() || (self.is_axis_selection() && self.is_picking_active());
        if !picked || self.transform_mode != TransformMode::Translate {
            return None;
        }

        let offset = self.pick_offset(pointer);
        self.translate_selection(registry, offset, true)
    }

    /// Process relative pointer motion while dragging (single axes and the
    /// uniform handle).
    pub fn process_relative_transform<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        motion: Vec2,
    ) -> Option<TransformDelta> {
        if !self.is_enabled || !self.is_active() {
            return None;
        }

        if self.selection_state == SelectionState::Uniform {
            self.process_transform_uniform(registry, motion)
        } else if self.is_axis_selection() && !self.is_picking_active() {
            self.process_transform_axis(registry, motion)
        } else {
            None
        }
    }

    /// World units per pixel of motion along the arrow.
    fn motion_distance_scale(&self) -> f32 {
        self.view.camera_position().distance(self.gizmo.position) * self.config.distance_factor
    }

    fn process_transform_axis<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        motion: Vec2,
    ) -> Option<TransformDelta> {
        let axis = self.selection_state.axis()?;
        let direction = self.gizmo.axis_direction(axis.unit());

        match self.transform_mode {
            TransformMode::Translate => {
                let speed = self.arrow_direction.dot(motion) * self.motion_distance_scale();
                self.translate_selection(registry, direction * speed, false)
            }
            TransformMode::Rotate => {
                let degrees = self.arrow_direction.perp().dot(motion) * self.config.rotate_speed;
                self.rotate_selection(registry, direction, degrees)
            }
            TransformMode::Scale => {
                let speed = self.arrow_direction.dot(motion) * self.motion_distance_scale();
                self.scale_selection(registry, axis.unit() * speed)
            }
        }
    }

    fn process_transform_uniform<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        motion: Vec2,
    ) -> Option<TransformDelta> {
        match self.transform_mode {
            TransformMode::Translate => None,
            TransformMode::Rotate => {
                let axis = self.view.camera_forward();
                self.rotate_selection(registry, axis, motion.x * self.config.rotate_speed)
            }
            TransformMode::Scale => {
                // Right and up grow, left and down shrink.
                let amount = (motion.x - motion.y) * 0.5 * self.motion_distance_scale();
                self.scale_selection(registry, Vec3::splat(amount))
            }
        }
    }

    fn translate_selection<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        delta: Vec3,
        picked: bool,
    ) -> Option<TransformDelta> {
        if !delta.is_finite() {
            return None;
        }

        let raster = &mut self.config.raster;
        let mut applied = delta;
        if raster.is_enabled() {
            if picked && !raster.move_free_in_raster {
                // Picked offsets already contain the remainder.
                raster.vector.reset();
            }
            let flushed = raster.accumulate(delta);
            applied = flushed;
            if raster.mode == RasterMode::Absolute {
                applied = snap_to_grid(flushed, self.pivot, raster.size);
                // The grid correction is paid out of the remainder.
                raster.vector += flushed - applied;
            }
        }

        let distributed = self.is_pivot_distributed();
        TransformApplier::new(registry, self.selection.nodes(), self.pivot, distributed)
            .translate(applied);
        self.refresh_gizmo(&*registry);

        log::trace!("Gizmo translate {:?}", applied);
        Some(TransformDelta::Translate(applied))
    }

    fn rotate_selection<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        axis: Vec3,
        degrees: f32,
    ) -> Option<TransformDelta> {
        let mut degrees = degrees;
        if let Some(step) = self.config.rotation_step {
            self.angle_raster += degrees;
            degrees = self.angle_raster.raster_flush(step);
        }

        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO || !degrees.is_finite() || degrees == 0.0 {
            return None;
        }

        let rotation = Quat::from_axis_angle(axis, degrees.to_radians());
        let distributed = self.is_pivot_distributed();
        TransformApplier::new(registry, self.selection.nodes(), self.pivot, distributed)
            .rotate(rotation);
        self.refresh_gizmo(&*registry);

        log::trace!("Gizmo rotate {:.3} deg about {:?}", degrees, axis);
        Some(TransformDelta::Rotate(rotation))
    }

    fn scale_selection<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        delta: Vec3,
    ) -> Option<TransformDelta> {
        if !delta.is_finite() || delta == Vec3::ZERO {
            return None;
        }

        let distributed = self.is_pivot_distributed();
        TransformApplier::new(registry, self.selection.nodes(), self.pivot, distributed)
            .scale(delta);
        self.refresh_gizmo(&*registry);

        log::trace!("Gizmo scale {:?}", delta);
        Some(TransformDelta::Scale(delta))
    }

    /// One-shot edit of the whole selection outside of a drag.
    ///
    /// Each node gets its own begin/end hooks. Returns the number of nodes changed.
    pub fn transform_selection<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        delta: TransformDelta,
    ) -> usize {
        let distributed = self.is_pivot_distributed();
        let mut applier =
            TransformApplier::new(registry, self.selection.nodes(), self.pivot, distributed).unique(true);
        let changed = match delta {
            TransformDelta::Translate(offset) => applier.translate(offset),
            TransformDelta::Rotate(rotation) => applier.rotate(rotation),
            TransformDelta::Scale(amount) => applier.scale(amount),
        };
        self.refresh_gizmo(&*registry);
        changed
    }

    // --- Host event helpers ---

    /// Pointer moved inside the frame: hover test, then absolute transform.
    pub fn on_pointer_move<R: NodeRegistry + ?Sized>(&mut self, registry: &mut R, position: Vec2) {
        self.last_pointer = position;
        if !self.are_any_nodes_selected() {
            return;
        }
        self.update(&*registry);
        self.process_selection(position);
        self.process_absolute_transform(registry, position);
    }

    /// Relative pointer motion (e.g. raw mouse deltas).
    pub fn on_pointer_motion<R: NodeRegistry + ?Sized>(&mut self, registry: &mut R, motion: Vec2) {
        self.process_relative_transform(registry, motion);
    }

    /// Left starts a drag on the hovered handle, right cancels a running one.
    pub fn on_button_down<R: NodeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        button: MouseButton,
        frame_origin: Option<IVec2>,
    ) {
        let pointer = self.last_pointer;
        match button {
            MouseButton::Left => {
                if self.are_any_nodes_selected() && self.is_any_selected() {
                    self.process_activation(registry, pointer, true, frame_origin);
                }
            }
            MouseButton::Right => {
                if self.is_active() {
                    self.cancel_activation(registry);
                    self.process_selection(pointer);
                }
            }
            MouseButton::Middle => {}
        }
    }

    /// Left release commits the running drag.
    pub fn on_button_up<R: NodeRegistry + ?Sized>(&mut self, registry: &mut R, button: MouseButton) {
        if button == MouseButton::Left && self.is_active() {
            let pointer = self.last_pointer;
            self.process_activation(registry, pointer, false, None);
            self.process_selection(pointer);
        }
    }

    pub fn on_focus_lost(&mut self) {
        self.reset_selection();
    }

    // --- Selected nodes ---

    /// Select `id` and make it the active node.
    pub fn add_node(&mut self, id: NodeId) {
        self.selection.add(id);
        self.gizmo.invalidate();
    }

    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let removed = self.selection.remove(id);
        if removed {
            self.gizmo.invalidate();
        }
        removed
    }

    pub fn remove_all_nodes(&mut self) {
        self.selection.clear();
        self.gizmo.invalidate();
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_nodes(&self) -> &[NodeId] {
        self.selection.nodes()
    }

    pub fn active_node(&self) -> Option<NodeId> {
        self.selection.active()
    }

    pub fn selection(&self) -> &SelectionList {
        &self.selection
    }

    /// Selection changes since the last call.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        self.selection.drain_events()
    }

    // --- Settings ---

    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    /// Switch the transform mode. Ignored while dragging.
    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        if self.is_active() {
            log::warn!("Cannot switch gizmo mode to {:?} during a drag", mode);
            return;
        }
        self.transform_mode = mode;
        self.reset_selection();
    }

    pub fn pivot_alignment(&self) -> PivotAlignment {
        self.pivot_alignment
    }

    pub fn set_pivot_alignment(&mut self, alignment: PivotAlignment) {
        self.pivot_alignment = alignment;
        self.gizmo.invalidate();
    }

    pub fn orientation_alignment(&self) -> OrientationAlignment {
        self.orientation_alignment
    }

    pub fn set_orientation_alignment(&mut self, alignment: OrientationAlignment) {
        self.orientation_alignment = alignment;
        self.gizmo.invalidate();
    }

    pub fn global_cursor(&self) -> Vec3 {
        self.global_cursor
    }

    pub fn set_global_cursor(&mut self, position: Vec3) {
        self.global_cursor = position;
        self.gizmo.invalidate();
    }

    pub fn raster(&self) -> &RasterConfig {
        &self.config.raster
    }

    pub fn set_raster_mode(&mut self, mode: RasterMode) {
        if self.config.raster.mode != mode {
            self.config.raster.mode = mode;
            self.config.raster.vector.reset();
            self.gizmo.invalidate();
        }
    }

    /// Set the raster step. Non-positive sizes are rejected.
    pub fn set_raster_size(&mut self, size: f32) {
        if !(size > 0.0) {
            log::warn!("Ignoring raster size {}", size);
            return;
        }
        self.config.raster.size = size;
    }

    pub fn set_move_free_in_raster(&mut self, enable: bool) {
        self.config.raster.move_free_in_raster = enable;
        self.gizmo.invalidate();
    }

    pub fn axes_plane_size(&self) -> f32 {
        self.config.axes_plane_size
    }

    /// Set the plane handle size, saturated to `[0, 1]`.
    pub fn set_axes_plane_size(&mut self, size: f32) {
        self.config.axes_plane_size = if size.is_nan() { 0.0 } else { size.clamp(0.0, 1.0) };
    }

    pub fn set_rotation_step(&mut self, step: Option<f32>) {
        self.config.rotation_step = step.filter(|s| *s > 0.0);
        self.angle_raster.reset();
    }

    pub fn set_align_cursor(&mut self, enable: bool) {
        self.config.align_cursor = enable;
    }

    pub fn set_picking_only_translation(&mut self, enable: bool) {
        self.config.picking_only_translation = enable;
    }

    /// Enable or disable one axis. Indices outside `0..3` are ignored.
    pub fn enable_axis(&mut self, index: usize, enable: bool) {
        if index < 3 {
            self.axes[index].is_enabled = enable;
        }
    }

    /// Override the gizmo size until the next recompute.
    pub fn resize(&mut self, size: f32) {
        self.gizmo.size = size;
    }

    pub fn size(&self) -> f32 {
        self.gizmo.size
    }

    // --- Queries ---

    pub fn view(&self) -> &ViewSetup {
        &self.view
    }

    pub fn axes(&self) -> &AxesState {
        &self.axes
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection_state
    }

    /// Normalized screen direction of the hovered axis.
    pub fn arrow_direction(&self) -> Vec2 {
        self.arrow_direction
    }

    /// Pivot of the last recompute, without raster offset.
    ///
    /// Distributed rotate and scale turn about this point, not about the gizmo
    /// position, which also carries the free raster offset of translation.
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn gizmo(&self) -> &GizmoTransform {
        &self.gizmo
    }

    /// Gizmo frame at the start of the running (or last) drag.
    pub fn prev_gizmo(&self) -> &GizmoTransform {
        &self.prev_gizmo
    }

    /// Whether a drag is running.
    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_any_selected(&self) -> bool {
        self.axes.any_selected()
    }

    pub fn are_any_nodes_selected(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn is_axis_selection(&self) -> bool {
        self.selection_state.is_axis()
    }

    pub fn is_plane_selection(&self) -> bool {
        self.selection_state.is_plane()
    }

    pub fn are_all_axes_enabled(&self) -> bool {
        self.axes.all_enabled()
    }

    pub fn are_axes_planes_enabled(&self) -> bool {
        self.transform_mode == TransformMode::Translate
    }

    pub fn is_uniform_transform_enabled(&self) -> bool {
        self.are_all_axes_enabled()
            && matches!(self.transform_mode, TransformMode::Rotate | TransformMode::Scale)
    }

    pub fn is_picking_active(&self) -> bool {
        self.config.picking_only_translation && self.transform_mode == TransformMode::Translate
    }

    pub fn is_pivot_distributed(&self) -> bool {
        pivot::is_pivot_distributed(self.pivot_alignment, self.selection.len())
    }

    /// Orientation alignment in effect: `Local` only applies to a single node.
    pub fn active_orientation_alignment(&self) -> OrientationAlignment {
        pivot::active_orientation_alignment(self.orientation_alignment, self.selection.len())
    }
}

/// Corrects each non-zero step so that `pivot + step` lands on the grid.
fn snap_to_grid(step: Vec3, pivot: Vec3, size: f32) -> Vec3 {
    let mut snapped = step;
    for c in 0..3 {
        if snapped[c] != 0.0 {
            snapped[c] = RasterScalar::new(pivot[c] + snapped[c]).raster(size) - pivot[c];
        }
    }
    snapped
}
