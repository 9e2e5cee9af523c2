// src/session/session.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::catalog::RoomTypeId;
use crate::graph::{GraphError, NodeId, RoomGraph, NODE_HEIGHT, NODE_WIDTH};
use crate::utils::geometry::{Point2D, Rect, Vector2D};

use super::intent::{DragTarget, Intent};

/// The interactive editing layer over one room graph.
///
/// Holds transient UI state only: selection, the pending link being
/// dragged out, accumulated drag distance, and user-facing feedback.
/// Everything persistent lives in the graph; a session can be dropped
/// and recreated without losing authored structure.
pub struct EditSession {
    graph: Arc<RwLock<RoomGraph>>,
    selected: BTreeSet<NodeId>,
    pending_link: Option<NodeId>,
    pending_line_end: Option<Point2D>,
    drag_accumulator: Vector2D,

    /// Messages or status for UI.
    pub status_message: String,
    pub last_error: Option<String>,
}

impl EditSession {
    pub fn new(graph: Arc<RwLock<RoomGraph>>) -> Self {
        Self {
            graph,
            selected: BTreeSet::new(),
            pending_link: None,
            pending_line_end: None,
            drag_accumulator: Vector2D::default(),
            status_message: String::new(),
            last_error: None,
        }
    }

    pub fn graph(&self) -> Arc<RwLock<RoomGraph>> {
        Arc::clone(&self.graph)
    }

    pub fn selected(&self) -> &BTreeSet<NodeId> {
        &self.selected
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn pending_link(&self) -> Option<NodeId> {
        self.pending_link
    }

    /// Free endpoint of the connection line being dragged out, if any.
    pub fn pending_line_end(&self) -> Option<Point2D> {
        self.pending_line_end
    }

    pub fn drag_accumulator(&self) -> Vector2D {
        self.drag_accumulator
    }

    /// Dispatches one intent. Failures never abort the session; they are
    /// recorded in `last_error` for the UI to surface.
    pub fn apply(&mut self, intent: Intent) {
        debug!("intent: {intent:?}");
        match intent {
            Intent::CreateNode {
                position,
                room_type,
            } => {
                self.create_node(position, room_type);
            }
            Intent::RequestLink { from, to } => {
                self.request_link(from, to);
            }
            Intent::DeleteSelected => {
                self.delete_selected();
            }
            Intent::DeleteLinkBetweenSelected => {
                self.delete_links_between_selected();
            }
            Intent::Drag { target, delta } => self.drag(target, delta),
            Intent::Select { id } => self.toggle_select(id),
            Intent::SelectAll => self.select_all(),
            Intent::ClearSelection => self.clear_selection(),
            Intent::Retype { id, room_type } => {
                self.retype(id, room_type);
            }
        }
    }

    // --- Node creation ---

    pub fn create_node(&mut self, position: Point2D, room_type: RoomTypeId) -> Option<NodeId> {
        let bounds = Rect::new(position.x, position.y, NODE_WIDTH, NODE_HEIGHT);
        let result = self.graph.write().create_node(room_type, bounds);
        match result {
            Ok(id) => {
                self.status_message = format!("Created room node {id}");
                Some(id)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Creates a placeholder node at the given position, the context-menu
    /// default.
    pub fn create_placeholder_at(&mut self, position: Point2D) -> NodeId {
        let id = self.graph.write().create_node_at(position);
        self.status_message = format!("Created room node {id}");
        id
    }

    // --- Linking ---

    /// Starts dragging a connection line out of `from`. The line's free
    /// end begins at `at` and follows subsequent drag deltas.
    pub fn begin_link(&mut self, from: NodeId, at: Point2D) {
        if !self.graph.read().contains(from) {
            self.report(GraphError::NodeNotFound(from));
            return;
        }
        self.pending_link = Some(from);
        self.pending_line_end = Some(at);
    }

    /// Moves the free end of the pending connection line.
    pub fn drag_pending_line(&mut self, delta: Vector2D) {
        if let Some(end) = self.pending_line_end {
            self.pending_line_end = Some(end.translated(&delta));
        }
    }

    /// Tries to complete the pending link onto `to`. The pending source
    /// is cleared regardless of the outcome. Returns whether an edge was
    /// created.
    pub fn complete_link(&mut self, to: NodeId) -> bool {
        let Some(from) = self.pending_link.take() else {
            debug!("complete_link with no pending source");
            return false;
        };
        self.pending_line_end = None;

        let result = self.graph.write().link(from, to);
        match result {
            Ok(()) => {
                self.status_message = format!("Linked {from} -> {to}");
                self.last_error = None;
                true
            }
            Err(err) => {
                warn!("link {from} -> {to} rejected: {err}");
                self.report(err);
                false
            }
        }
    }

    pub fn cancel_link(&mut self) {
        self.pending_link = None;
        self.pending_line_end = None;
    }

    /// One-shot link request from the input layer: equivalent to starting
    /// a connection drag on `from` and releasing it over `to`.
    pub fn request_link(&mut self, from: NodeId, to: NodeId) -> bool {
        let start = self.graph.read().node(from).map(|n| n.center());
        match start {
            Some(at) => {
                self.begin_link(from, at);
                self.complete_link(to)
            }
            None => {
                self.report(GraphError::NodeNotFound(from));
                false
            }
        }
    }

    // --- Selection ---

    pub fn toggle_select(&mut self, id: NodeId) {
        if !self.graph.read().contains(id) {
            self.report(GraphError::NodeNotFound(id));
            return;
        }
        if !self.selected.insert(id) {
            self.selected.remove(&id);
        }
        self.drag_accumulator = Vector2D::default();
    }

    pub fn select_all(&mut self) {
        self.selected = self.graph.read().nodes().map(|n| n.id()).collect();
        self.drag_accumulator = Vector2D::default();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.drag_accumulator = Vector2D::default();
    }

    // --- Dragging ---

    /// Moves the selection (or one explicit node) by `delta`.
    pub fn drag(&mut self, target: DragTarget, delta: Vector2D) {
        {
            let mut graph = self.graph.write();
            match target {
                DragTarget::Selection => {
                    for &id in &self.selected {
                        // Selected ids always resolve; the selection is
                        // pruned on every delete.
                        let _ = graph.translate_node(id, &delta);
                    }
                }
                DragTarget::Node(id) => {
                    if let Err(err) = graph.translate_node(id, &delta) {
                        drop(graph);
                        self.report(err);
                        return;
                    }
                }
            }
        }
        self.drag_accumulator += delta;
    }

    pub fn drag_selected(&mut self, delta: Vector2D) {
        self.drag(DragTarget::Selection, delta);
    }

    // --- Deletion ---

    /// Deletes every selected node that is not type-protected. Returns
    /// how many nodes were deleted; protected nodes stay selected.
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<NodeId> = self.selected.iter().copied().collect();
        let mut deleted = 0;
        {
            let mut graph = self.graph.write();
            for id in ids {
                let protected = graph
                    .room_type_of(id)
                    .map(|t| t.is_entrance)
                    .unwrap_or(false);
                if protected {
                    debug!("skipping protected node {id}");
                    continue;
                }
                match graph.delete_node(id) {
                    Ok(()) => {
                        self.selected.remove(&id);
                        deleted += 1;
                    }
                    Err(err) => {
                        warn!("delete {id} failed: {err}");
                        self.last_error = Some(err.to_string());
                    }
                }
            }
            // The pending link source may have just been deleted.
            if let Some(source) = self.pending_link {
                if !graph.contains(source) {
                    self.pending_link = None;
                    self.pending_line_end = None;
                }
            }
        }
        self.status_message = format!("Deleted {deleted} room node(s)");
        deleted
    }

    /// Severs every edge whose both endpoints are selected. Returns how
    /// many edges were severed.
    pub fn delete_links_between_selected(&mut self) -> usize {
        let severed = self.graph.write().delete_edges_within(&self.selected);
        self.status_message = format!("Severed {severed} link(s)");
        severed
    }

    // --- Retyping ---

    /// Reassigns a node's type; reports back how many child links the
    /// retype severed, if the graph had to cascade.
    pub fn retype(&mut self, id: NodeId, room_type: RoomTypeId) -> Option<usize> {
        let result = self.graph.write().retype_node(id, room_type);
        match result {
            Ok(severed) => {
                self.status_message = if severed > 0 {
                    format!("Retyped {id}; severed {severed} link(s)")
                } else {
                    format!("Retyped {id}")
                };
                Some(severed)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    fn report(&mut self, err: GraphError) {
        self.last_error = Some(err.to_string());
    }
}
