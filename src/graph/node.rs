// src/graph/node.rs

use serde::Serialize;
use std::fmt;

use crate::catalog::RoomTypeId;
use crate::utils::geometry::{Point2D, Rect, Vector2D};

/// Identifier of a room node, unique within its graph. Generated once at
/// creation and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn fresh() -> Self {
        NodeId(rand::random())
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A single graph vertex: one dungeon room or corridor placeholder.
///
/// The node is a passive record and performs no validation of its own:
/// the adjacency lists are only ever touched by the graph's `link`,
/// `unlink`, `retype_node` and `delete_node`, which validate first and
/// keep both sides of every edge in step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomNode {
    id: NodeId,
    room_type: RoomTypeId,
    parent_ids: Vec<NodeId>,
    child_ids: Vec<NodeId>,
    bounds: Rect,
}

impl RoomNode {
    pub(crate) fn new(id: NodeId, room_type: RoomTypeId, bounds: Rect) -> Self {
        Self {
            id,
            room_type,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
            bounds,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn room_type(&self) -> RoomTypeId {
        self.room_type
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn center(&self) -> Point2D {
        self.bounds.center()
    }

    /// Parent ids, in the order the edges were created.
    pub fn parent_ids(&self) -> &[NodeId] {
        &self.parent_ids
    }

    /// Child ids, in the order the edges were created.
    pub fn child_ids(&self) -> &[NodeId] {
        &self.child_ids
    }

    pub fn has_parent(&self) -> bool {
        !self.parent_ids.is_empty()
    }

    pub(crate) fn set_type(&mut self, room_type: RoomTypeId) {
        self.room_type = room_type;
    }

    /// Appends to `child_ids` unless already present; reports whether the
    /// id was added.
    pub(crate) fn add_child(&mut self, id: NodeId) -> bool {
        if self.child_ids.contains(&id) {
            return false;
        }
        self.child_ids.push(id);
        true
    }

    /// Appends to `parent_ids` unless already present; reports whether
    /// the id was added.
    pub(crate) fn add_parent(&mut self, id: NodeId) -> bool {
        if self.parent_ids.contains(&id) {
            return false;
        }
        self.parent_ids.push(id);
        true
    }

    pub(crate) fn remove_child(&mut self, id: NodeId) -> bool {
        match self.child_ids.iter().position(|&c| c == id) {
            Some(slot) => {
                self.child_ids.remove(slot);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_parent(&mut self, id: NodeId) -> bool {
        match self.parent_ids.iter().position(|&p| p == id) {
            Some(slot) => {
                self.parent_ids.remove(slot);
                true
            }
            None => false,
        }
    }

    pub(crate) fn translate(&mut self, delta: &Vector2D) {
        self.bounds.translate(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn node() -> RoomNode {
        RoomNode::new(
            NodeId::fresh(),
            RoomTypeId(0),
            Rect::new(0.0, 0.0, 160.0, 75.0),
        )
    }

    #[test]
    fn test_fresh_ids_are_distinct() {
        let a = NodeId::fresh();
        let b = NodeId::fresh();
        assert_ne!(a, b);
        assert_ne!(a.as_u64(), b.as_u64());
        assert_eq!(a.to_string().len(), 16);
    }

    #[test]
    fn test_add_child_deduplicates() {
        let mut n = node();
        let child = NodeId::fresh();
        assert!(n.add_child(child));
        assert!(!n.add_child(child));
        assert_eq!(n.child_ids(), &[child]);
    }

    #[test]
    fn test_add_parent_deduplicates() {
        let mut n = node();
        let parent = NodeId::fresh();
        assert!(n.add_parent(parent));
        assert!(!n.add_parent(parent));
        assert_eq!(n.parent_ids(), &[parent]);
        assert!(n.has_parent());
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut n = node();
        let child = NodeId::fresh();
        n.add_child(child);
        assert!(n.remove_child(child));
        assert!(!n.remove_child(child));
        assert!(n.child_ids().is_empty());

        let parent = NodeId::fresh();
        n.add_parent(parent);
        assert!(n.remove_parent(parent));
        assert!(!n.remove_parent(parent));
        assert!(!n.has_parent());
    }

    #[test]
    fn test_child_order_is_insertion_order() {
        let mut n = node();
        let first = NodeId::fresh();
        let second = NodeId::fresh();
        n.add_child(first);
        n.add_child(second);
        assert_eq!(n.child_ids(), &[first, second]);
    }

    #[test]
    fn test_translate_shifts_bounds() {
        let mut n = node();
        n.translate(&Vector2D::new(30.0, -10.0));
        assert_approx_eq!(n.bounds().x, 30.0);
        assert_approx_eq!(n.bounds().y, -10.0);
        assert_approx_eq!(n.center().x, 110.0);
    }
}
