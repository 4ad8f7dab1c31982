//! The capability a scene node needs to be manipulated by the gizmo.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use glam::{Mat4, Quat, Vec3, Vec4Swizzles};

use crate::transform::Transform;

/// Handle of a caller-owned selectable node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Which kinds of transformation a node accepts (bitflags-style).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TransformFlags(u8);

impl TransformFlags {
    pub const NONE: Self = Self(0);
    pub const TRANSLATE: Self = Self(1 << 0);
    pub const ROTATE: Self = Self(1 << 1);
    pub const UNIFORM_SCALE: Self = Self(1 << 2);
    pub const FREE_SCALE: Self = Self(1 << 3);
    pub const SCALE: Self = Self(Self::UNIFORM_SCALE.0 | Self::FREE_SCALE.0);
    pub const ALL: Self = Self(0xff);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl Default for TransformFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for TransformFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TransformFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Scene node that can be picked up by the gizmo.
///
/// Implementors keep ownership of their transform. The hooks default to no-ops
/// and can be overridden, e.g. to push the new transform into a physics body.
pub trait Selectable {
    fn local_transform(&self) -> &Transform;

    fn local_transform_mut(&mut self) -> &mut Transform;

    /// World matrix. Defaults to the local transform (root nodes).
    fn global_matrix(&self) -> Mat4 {
        self.local_transform().to_matrix()
    }

    fn transform_flags(&self) -> TransformFlags {
        TransformFlags::ALL
    }

    fn on_transform_begin(&mut self) {}

    fn on_transform(&mut self) {}

    fn on_transform_end(&mut self) {}

    fn world_position(&self) -> Vec3 {
        self.global_matrix().w_axis.xyz()
    }

    fn world_rotation(&self) -> Quat {
        let (_, rotation, _) = self.global_matrix().to_scale_rotation_translation();
        rotation.normalize()
    }
}

/// Runs `mutator` on the node's transform and fires the hooks.
///
/// A unique edit is wrapped in `on_transform_begin`/`on_transform_end`. Edits
/// that are part of a drag only fire `on_transform`; the drag itself brackets
/// them.
pub fn apply_transform<S, F>(node: &mut S, mutator: F, is_unique: bool)
where
    S: Selectable + ?Sized,
    F: FnOnce(&mut Transform),
{
    if is_unique {
        node.on_transform_begin();
    }

    mutator(node.local_transform_mut());
    node.on_transform();

    if is_unique {
        node.on_transform_end();
    }
}

/// Caller-owned storage the model resolves [`NodeId`] handles against.
pub trait NodeRegistry {
    fn node(&self, id: NodeId) -> Option<&dyn Selectable>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn Selectable>;
}

impl<T: Selectable> NodeRegistry for HashMap<NodeId, T> {
    fn node(&self, id: NodeId) -> Option<&dyn Selectable> {
        self.get(&id).map(|n| n as &dyn Selectable)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn Selectable> {
        self.get_mut(&id).map(|n| n as &mut dyn Selectable)
    }
}

impl<T: Selectable> NodeRegistry for BTreeMap<NodeId, T> {
    fn node(&self, id: NodeId) -> Option<&dyn Selectable> {
        self.get(&id).map(|n| n as &dyn Selectable)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn Selectable> {
        self.get_mut(&id).map(|n| n as &mut dyn Selectable)
    }
}
