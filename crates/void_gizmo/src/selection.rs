//! Ordered selection list with an active (last selected) node.

use crate::selectable::NodeId;

/// Change notification queued by the selection list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    Added(NodeId),
    Removed(NodeId),
    Cleared,
    Activated(NodeId),
    Deactivated(NodeId),
}

/// Selected nodes in selection order, without duplicates.
///
/// The active node is always a member of the list.
#[derive(Clone, Debug, Default)]
pub struct SelectionList {
    nodes: Vec<NodeId>,
    active: Option<NodeId>,
    dirty: bool,
    events: Vec<SelectionEvent>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Check and clear the change flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Adds a node and makes it active.
    ///
    /// A node that is already selected moves to the back of the list instead
    /// of being added twice.
    pub fn add(&mut self, id: NodeId) {
        if let Some(index) = self.nodes.iter().position(|&n| n == id) {
            self.nodes[index..].rotate_left(1);
        } else {
            self.nodes.push(id);
            self.events.push(SelectionEvent::Added(id));
        }
        self.set_active(Some(id));
        self.dirty = true;
    }

    /// Removes a node. Returns `false` if it was not selected.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(index) = self.nodes.iter().position(|&n| n == id) else {
            return false;
        };

        self.nodes.remove(index);
        self.events.push(SelectionEvent::Removed(id));

        if self.active == Some(id) {
            self.set_active(self.nodes.last().copied());
        }
        self.dirty = true;
        true
    }

    pub fn clear(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        self.set_active(None);
        self.nodes.clear();
        self.events.push(SelectionEvent::Cleared);
        self.dirty = true;
    }

    fn set_active(&mut self, id: Option<NodeId>) {
        if self.active == id {
            return;
        }
        if let Some(old) = self.active {
            self.events.push(SelectionEvent::Deactivated(old));
        }
        self.active = id;
        if let Some(new) = id {
            self.events.push(SelectionEvent::Activated(new));
        }
    }
}
