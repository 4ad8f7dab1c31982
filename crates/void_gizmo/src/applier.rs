//! Applies gizmo deltas to the selected nodes.

use glam::{Quat, Vec3};

use crate::selectable::{apply_transform, NodeId, NodeRegistry, Selectable, TransformFlags};
use crate::EPSILON;

/// Writes one translate, rotate or scale delta into every selected node.
///
/// With a distributed pivot all nodes rotate and scale about the shared pivot,
/// otherwise each node transforms about its own origin. Nodes whose
/// [`TransformFlags`] forbid the operation are left alone, handles that no
/// longer resolve are skipped.
pub struct TransformApplier<'a, R: NodeRegistry + ?Sized> {
    registry: &'a mut R,
    nodes: &'a [NodeId],
    pivot: Vec3,
    distributed: bool,
    is_unique: bool,
}

impl<'a, R: NodeRegistry + ?Sized> TransformApplier<'a, R> {
    /// Applier for edits that are part of a drag (`is_unique == false`).
    pub fn new(registry: &'a mut R, nodes: &'a [NodeId], pivot: Vec3, distributed: bool) -> Self {
        Self {
            registry,
            nodes,
            pivot,
            distributed,
            is_unique: false,
        }
    }

    /// Mark the edits as one-shot, wrapping each in begin/end hooks.
    pub fn unique(mut self, is_unique: bool) -> Self {
        self.is_unique = is_unique;
        self
    }

    /// Moves every node by the same world delta. Returns the number of nodes changed.
    pub fn translate(&mut self, delta: Vec3) -> usize {
        if delta == Vec3::ZERO {
            return 0;
        }
        let is_unique = self.is_unique;
        self.for_each(TransformFlags::TRANSLATE, |node| {
            apply_transform(node, |t| t.move_global(delta), is_unique);
        })
    }

    /// Pre-multiplies every node rotation by `rotation`.
    pub fn rotate(&mut self, rotation: Quat) -> usize {
        if rotation.abs_diff_eq(Quat::IDENTITY, EPSILON) {
            return 0;
        }
        let (pivot, distributed, is_unique) = (self.pivot, self.distributed, self.is_unique);
        self.for_each(TransformFlags::ROTATE, |node| {
            if distributed {
                apply_transform(node, |t| t.turn_about(rotation, pivot), is_unique);
            } else {
                apply_transform(node, |t| t.turn(rotation), is_unique);
            }
        })
    }

    /// Adds `delta` to the node scales.
    ///
    /// About a distributed pivot each node receives `delta * scale / max_scale`,
    /// where `max_scale` is the component-wise largest scale in the selection,
    /// and its offset from the pivot grows with its relative scale change.
    pub fn scale(&mut self, delta: Vec3) -> usize {
        if delta == Vec3::ZERO {
            return 0;
        }
        let required = if delta.x == delta.y && delta.y == delta.z {
            TransformFlags::UNIFORM_SCALE
        } else {
            TransformFlags::FREE_SCALE
        };

        let (pivot, is_unique) = (self.pivot, self.is_unique);
        if !self.distributed {
            return self.for_each(required, |node| {
                apply_transform(node, |t| t.resize(delta), is_unique);
            });
        }

        let max_scale = self.max_scale();
        self.for_each(required, |node| {
            let node_delta = delta * node.local_transform().scale / max_scale;
            apply_transform(node, |t| t.resize_about(node_delta, pivot), is_unique);
        })
    }

    fn max_scale(&self) -> Vec3 {
        self.nodes
            .iter()
            .filter_map(|&id| self.registry.node(id))
            .fold(Vec3::splat(f32::MIN_POSITIVE), |max, node| {
                max.max(node.local_transform().scale)
            })
    }

    fn for_each<F>(&mut self, required: TransformFlags, mut f: F) -> usize
    where
        F: FnMut(&mut dyn Selectable),
    {
        let mut changed = 0;
        for &id in self.nodes {
            let Some(node) = self.registry.node_mut(id) else {
                log::warn!("{} is selected but no longer exists, skipping", id);
                continue;
            };
            if !node.transform_flags().contains(required) {
                continue;
            }
            f(node);
            changed += 1;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;
    use core::f32::consts::FRAC_PI_2;
    use std::collections::BTreeMap;

    struct Node {
        transform: Transform,
        flags: TransformFlags,
        begin: u32,
        end: u32,
    }

    impl Node {
        fn at(x: f32) -> Self {
            Self {
                transform: Transform::from_position(Vec3::new(x, 0.0, 0.0)),
                flags: TransformFlags::ALL,
                begin: 0,
                end: 0,
            }
        }
    }

    impl Selectable for Node {
        fn local_transform(&self) -> &Transform {
            &self.transform
        }

        fn local_transform_mut(&mut self) -> &mut Transform {
            &mut self.transform
        }

        fn transform_flags(&self) -> TransformFlags {
            self.flags
        }

        fn on_transform_begin(&mut self) {
            self.begin += 1;
        }

        fn on_transform_end(&mut self) {
            self.end += 1;
        }
    }

    fn scene() -> (BTreeMap<NodeId, Node>, Vec<NodeId>) {
        let mut nodes = BTreeMap::new();
        nodes.insert(NodeId(0), Node::at(0.0));
        nodes.insert(NodeId(1), Node::at(2.0));
        nodes.insert(NodeId(2), Node::at(4.0));
        (nodes, vec![NodeId(0), NodeId(1), NodeId(2)])
    }

    #[test]
    fn test_translate_moves_all() {
        let (mut nodes, ids) = scene();
        let changed = TransformApplier::new(&mut nodes, &ids, Vec3::ZERO, true).translate(Vec3::Y);
        assert_eq!(changed, 3);
        assert_eq!(nodes[&NodeId(2)].transform.position, Vec3::new(4.0, 1.0, 0.0));
        assert_eq!(nodes[&NodeId(2)].begin, 0);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let (mut nodes, ids) = scene();
        let q = Quat::from_rotation_z(FRAC_PI_2);
        TransformApplier::new(&mut nodes, &ids, Vec3::new(2.0, 0.0, 0.0), true).rotate(q);

        let p = nodes[&NodeId(2)].transform.position;
        assert!(p.abs_diff_eq(Vec3::new(2.0, 2.0, 0.0), 1e-5));
        assert!(nodes[&NodeId(1)].transform.position.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
        assert!(nodes[&NodeId(0)].transform.rotation.abs_diff_eq(q, 1e-5));
    }

    #[test]
    fn test_rotate_individual_keeps_positions() {
        let (mut nodes, ids) = scene();
        let q = Quat::from_rotation_z(FRAC_PI_2);
        TransformApplier::new(&mut nodes, &ids, Vec3::new(2.0, 0.0, 0.0), false).rotate(q);

        assert_eq!(nodes[&NodeId(2)].transform.position, Vec3::new(4.0, 0.0, 0.0));
        assert!(nodes[&NodeId(2)].transform.rotation.abs_diff_eq(q, 1e-5));
    }

    #[test]
    fn test_distributed_scale_uses_max() {
        let (mut nodes, ids) = scene();
        nodes.get_mut(&NodeId(2)).unwrap().transform.scale = Vec3::splat(2.0);

        TransformApplier::new(&mut nodes, &ids, Vec3::ZERO, true).scale(Vec3::ONE);

        // delta * 1 / 2 for the unit-scale nodes, delta * 2 / 2 for the big one.
        assert!(nodes[&NodeId(1)].transform.scale.abs_diff_eq(Vec3::splat(1.5), 1e-5));
        assert!(nodes[&NodeId(1)].transform.position.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-5));
        assert!(nodes[&NodeId(2)].transform.scale.abs_diff_eq(Vec3::splat(3.0), 1e-5));
        assert!(nodes[&NodeId(2)].transform.position.abs_diff_eq(Vec3::new(6.0, 0.0, 0.0), 1e-5));
        assert_eq!(nodes[&NodeId(0)].transform.position, Vec3::ZERO);
    }

    #[test]
    fn test_individual_scale_keeps_positions() {
        let (mut nodes, ids) = scene();
        TransformApplier::new(&mut nodes, &ids, Vec3::ZERO, false).scale(Vec3::X);
        assert_eq!(nodes[&NodeId(2)].transform.scale, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(nodes[&NodeId(2)].transform.position, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_flags_are_respected() {
        let (mut nodes, ids) = scene();
        nodes.get_mut(&NodeId(0)).unwrap().flags = TransformFlags::ROTATE;
        nodes.get_mut(&NodeId(1)).unwrap().flags = TransformFlags::TRANSLATE | TransformFlags::UNIFORM_SCALE;

        let mut applier = TransformApplier::new(&mut nodes, &ids, Vec3::ZERO, true);
        assert_eq!(applier.translate(Vec3::Z), 2);
        assert_eq!(applier.scale(Vec3::splat(0.5)), 2);
        assert_eq!(applier.scale(Vec3::X), 1);

        assert_eq!(nodes[&NodeId(0)].transform.position, Vec3::ZERO);
        assert_eq!(nodes[&NodeId(0)].transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_missing_nodes_are_skipped() {
        let (mut nodes, _) = scene();
        let ids = [NodeId(1), NodeId(42)];
        let changed = TransformApplier::new(&mut nodes, &ids, Vec3::ZERO, false).translate(Vec3::X);
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_unique_edits_fire_hooks() {
        let (mut nodes, ids) = scene();
        TransformApplier::new(&mut nodes, &ids, Vec3::ZERO, false)
            .unique(true)
            .translate(Vec3::X);
        assert!(nodes.values().all(|n| n.begin == 1 && n.end == 1));
    }
}
