// src/graph/room_graph.rs

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use log::{debug, info};

use crate::catalog::{RoomTypeCatalog, RoomTypeDescriptor, RoomTypeId};
use crate::utils::geometry::{Point2D, Rect, Vector2D};

use super::error::{GraphError, LinkError};
use super::node::{NodeId, RoomNode};
use super::{MAX_CHILD_CORRIDOR, NODE_HEIGHT, NODE_WIDTH};

/// The container of all room nodes in the active graph.
///
/// Owns every node. The node list is authoritative and insertion-ordered;
/// the id→slot index is derived from it and either updated transactionally
/// with a mutation or rebuilt in full, never hand-maintained in a way that
/// can drift.
pub struct RoomGraph {
    catalog: Arc<RoomTypeCatalog>,
    pub(crate) nodes: Vec<RoomNode>,
    pub(crate) index: HashMap<NodeId, usize>,
}

impl RoomGraph {
    pub fn new(catalog: Arc<RoomTypeCatalog>) -> Self {
        Self {
            catalog,
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &RoomTypeCatalog {
        &self.catalog
    }

    // --- Node creation ---

    /// Creates a node of the given type and returns its fresh id.
    pub fn create_node(&mut self, room_type: RoomTypeId, bounds: Rect) -> Result<NodeId, GraphError> {
        if self.catalog.get(room_type).is_none() {
            return Err(GraphError::UnknownRoomType(room_type));
        }
        Ok(self.insert_node(room_type, bounds))
    }

    /// Creates a placeholder-typed node with the default node box at the
    /// given position. The context-menu "add room node" path.
    pub fn create_node_at(&mut self, position: Point2D) -> NodeId {
        let bounds = Rect::new(position.x, position.y, NODE_WIDTH, NODE_HEIGHT);
        self.insert_node(self.catalog.none_type(), bounds)
    }

    fn insert_node(&mut self, room_type: RoomTypeId, bounds: Rect) -> NodeId {
        let id = self.fresh_id();
        self.nodes.push(RoomNode::new(id, room_type, bounds));
        self.index.insert(id, self.nodes.len() - 1);
        debug!("created room node {id}");
        id
    }

    fn fresh_id(&self) -> NodeId {
        // Re-roll on the astronomically unlikely collision.
        loop {
            let id = NodeId::fresh();
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    // --- Queries ---

    pub fn node(&self, id: NodeId) -> Option<&RoomNode> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &RoomNode> {
        self.nodes.iter()
    }

    /// All edges as (parent, child) pairs, in deterministic order: parents
    /// in insertion order, children in link order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::new();
        for node in &self.nodes {
            for &child in node.child_ids() {
                edges.push((node.id(), child));
            }
        }
        edges
    }

    pub fn room_type_of(&self, id: NodeId) -> Option<&RoomTypeDescriptor> {
        self.node(id).map(|n| self.descriptor(n.room_type()))
    }

    /// True if any boss-typed node anywhere in the graph already has a
    /// parent.
    pub fn connected_boss_exists(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| self.descriptor(n.room_type()).is_boss_room && n.has_parent())
    }

    fn slot(&self, id: NodeId) -> Result<usize, GraphError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn descriptor(&self, id: RoomTypeId) -> &RoomTypeDescriptor {
        self.catalog
            .get(id)
            .expect("room type ids are validated when a node is created or retyped")
    }

    // --- Connectivity validation ---

    /// Decides whether a parent→child edge may be created, reporting the
    /// first violated rule.
    pub fn check_link(&self, parent_id: NodeId, child_id: NodeId) -> Result<(), GraphError> {
        let parent = self.node(parent_id).ok_or(GraphError::NodeNotFound(parent_id))?;
        let child = self.node(child_id).ok_or(GraphError::NodeNotFound(child_id))?;
        self.validate_link(parent, child)?;
        Ok(())
    }

    /// Boolean form of [`check_link`](Self::check_link).
    pub fn can_link(&self, parent_id: NodeId, child_id: NodeId) -> bool {
        self.check_link(parent_id, child_id).is_ok()
    }

    fn validate_link(&self, parent: &RoomNode, child: &RoomNode) -> Result<(), LinkError> {
        if parent.id() == child.id() {
            return Err(LinkError::SelfLoop);
        }

        let parent_type = self.descriptor(parent.room_type());
        let child_type = self.descriptor(child.room_type());

        if child_type.is_none {
            return Err(LinkError::TargetIsPlaceholder);
        }
        if child_type.is_entrance {
            return Err(LinkError::TargetIsEntrance);
        }
        // Each non-root room accepts exactly one incoming edge.
        if child.has_parent() {
            return Err(LinkError::TargetAlreadyHasParent);
        }
        if child_type.is_boss_room && self.connected_boss_exists() {
            return Err(LinkError::DuplicateBossRoom);
        }
        if parent.child_ids().contains(&child.id()) {
            return Err(LinkError::DuplicateEdge);
        }
        if parent.parent_ids().contains(&child.id()) {
            return Err(LinkError::BackEdge);
        }
        // Edges must alternate corridor / non-corridor.
        if parent_type.is_corridor == child_type.is_corridor {
            return Err(LinkError::CorridorAdjacency);
        }

        if child_type.is_corridor {
            let corridor_children = parent
                .child_ids()
                .iter()
                .filter(|&&c| {
                    self.node(c)
                        .map(|n| self.descriptor(n.room_type()).is_corridor)
                        .unwrap_or(false)
                })
                .count();
            if corridor_children + 1 > MAX_CHILD_CORRIDOR {
                return Err(LinkError::FanOutExceeded);
            }
        } else if !parent.child_ids().is_empty() {
            // A corridor parent spends its single passage on one room.
            return Err(LinkError::FanOutExceeded);
        }

        Ok(())
    }

    // --- Structural mutation ---

    /// Validates and creates the edge. Both half-edges are applied
    /// together; the two adjacency lists never desynchronize.
    pub fn link(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), GraphError> {
        let parent_slot = self.slot(parent_id)?;
        let child_slot = self.slot(child_id)?;
        self.validate_link(&self.nodes[parent_slot], &self.nodes[child_slot])?;

        let added_child = self.nodes[parent_slot].add_child(child_id);
        let added_parent = self.nodes[child_slot].add_parent(parent_id);
        debug_assert!(
            added_child && added_parent,
            "validated edge {parent_id}->{child_id} was already half-present"
        );
        debug!("linked {parent_id} -> {child_id}");
        Ok(())
    }

    /// Removes the edge from both sides. Returns whether an edge existed;
    /// removing an absent edge is a no-op, not an error.
    pub fn unlink(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<bool, GraphError> {
        let parent_slot = self.slot(parent_id)?;
        let child_slot = self.slot(child_id)?;

        let removed_child = self.nodes[parent_slot].remove_child(child_id);
        let removed_parent = self.nodes[child_slot].remove_parent(parent_id);
        debug_assert!(
            removed_child == removed_parent,
            "edge {parent_id}->{child_id} was recorded on only one side"
        );
        if removed_child {
            debug!("unlinked {parent_id} -> {child_id}");
        }
        Ok(removed_child)
    }

    /// Reassigns a node's type. When its corridor-ness flips, or it newly
    /// becomes a boss room, every existing child edge is severed (the
    /// adjacency rules that justified them may no longer hold). Returns
    /// how many edges were severed.
    pub fn retype_node(&mut self, id: NodeId, new_type: RoomTypeId) -> Result<usize, GraphError> {
        let slot = self.slot(id)?;
        let new_desc = self
            .catalog
            .get(new_type)
            .ok_or(GraphError::UnknownRoomType(new_type))?;
        let (new_is_corridor, new_is_boss) = (new_desc.is_corridor, new_desc.is_boss_room);

        let old_desc = self.descriptor(self.nodes[slot].room_type());
        let cascade =
            old_desc.is_corridor != new_is_corridor || (new_is_boss && !old_desc.is_boss_room);

        self.nodes[slot].set_type(new_type);
        if !cascade {
            return Ok(0);
        }

        let children: Vec<NodeId> = self.nodes[slot].child_ids().to_vec();
        let mut severed = 0;
        for child in children {
            if self.unlink(id, child)? {
                severed += 1;
            }
        }
        if severed > 0 {
            info!("retyping {id} severed {severed} child link(s)");
        }
        Ok(severed)
    }

    /// Moves a node's bounds by the given delta. No validation; positions
    /// carry no structural meaning.
    pub fn translate_node(&mut self, id: NodeId, delta: &Vector2D) -> Result<(), GraphError> {
        let slot = self.slot(id)?;
        self.nodes[slot].translate(delta);
        Ok(())
    }

    /// Removes a node and strips every edge referencing it. Entrance
    /// nodes are permanent roots and refuse deletion; the graph is left
    /// unchanged in that case.
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let slot = self.slot(id)?;
        if self.descriptor(self.nodes[slot].room_type()).is_entrance {
            return Err(GraphError::ProtectedNode(id));
        }

        for node in &mut self.nodes {
            node.remove_child(id);
            node.remove_parent(id);
        }
        self.nodes.remove(slot);
        self.rebuild_index();
        info!("deleted room node {id}");
        Ok(())
    }

    /// Severs every edge whose parent and child are both in the set.
    /// Built purely on [`unlink`](Self::unlink); returns the number of
    /// edges severed.
    pub fn delete_edges_within(&mut self, ids: &BTreeSet<NodeId>) -> usize {
        let mut doomed = Vec::new();
        for &parent_id in ids {
            if let Some(parent) = self.node(parent_id) {
                for &child_id in parent.child_ids() {
                    if ids.contains(&child_id) {
                        doomed.push((parent_id, child_id));
                    }
                }
            }
        }

        let mut severed = 0;
        for (parent_id, child_id) in doomed {
            if matches!(self.unlink(parent_id, child_id), Ok(true)) {
                severed += 1;
            }
        }
        severed
    }

    /// Clears and repopulates the id→slot index from the node list. Must
    /// run after any structural change that shifts slots.
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for (slot, node) in self.nodes.iter().enumerate() {
            let previous = self.index.insert(node.id(), slot);
            debug_assert!(previous.is_none(), "duplicate node id {}", node.id());
        }
    }
}
