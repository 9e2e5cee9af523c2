// src/render/mod.rs
//! Read-only scene description consumed by the drawing layer.
//!
//! The core never computes pixel geometry beyond raw rectangle bounds and
//! their centers; box styles, bezier control points and highlighting are
//! the renderer's business.

use serde::Serialize;

use crate::graph::{NodeId, RoomGraph};
use crate::session::EditSession;
use crate::utils::geometry::{Point2D, Rect};

/// One node box to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSprite {
    pub id: NodeId,
    pub bounds: Rect,
    pub label: String,
    pub selected: bool,
}

/// One parent→child connection line, from center to center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeLine {
    pub from: NodeId,
    pub to: NodeId,
    pub start: Point2D,
    pub end: Point2D,
}

/// The connection line currently being dragged out, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingLine {
    pub start: Point2D,
    pub end: Point2D,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<NodeSprite>,
    pub edges: Vec<EdgeLine>,
    pub pending: Option<PendingLine>,
}

impl Scene {
    /// Snapshots the graph plus the session's transient state into a
    /// drawable scene. Nodes appear in insertion order, edges in
    /// deterministic parent-then-link order.
    pub fn capture(graph: &RoomGraph, session: &EditSession) -> Scene {
        let nodes = graph
            .nodes()
            .map(|node| NodeSprite {
                id: node.id(),
                bounds: node.bounds(),
                label: graph
                    .room_type_of(node.id())
                    .map(|t| t.name.clone())
                    .unwrap_or_default(),
                selected: session.is_selected(node.id()),
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .filter_map(|(from, to)| {
                let start = graph.node(from)?.center();
                let end = graph.node(to)?.center();
                Some(EdgeLine {
                    from,
                    to,
                    start,
                    end,
                })
            })
            .collect();

        let pending = session.pending_link().and_then(|source| {
            Some(PendingLine {
                start: graph.node(source)?.center(),
                end: session.pending_line_end()?,
            })
        });

        Scene {
            nodes,
            edges,
            pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RoomTypeCatalog, RoomTypeDescriptor};
    use crate::utils::geometry::Vector2D;
    use parking_lot::RwLock;
    use std::sync::Arc;

    fn catalog() -> Arc<RoomTypeCatalog> {
        let descriptor = |name: &str| RoomTypeDescriptor {
            name: name.to_string(),
            is_entrance: false,
            is_corridor: false,
            is_boss_room: false,
            is_none: false,
            displayable: true,
        };
        Arc::new(
            RoomTypeCatalog::new(vec![
                RoomTypeDescriptor {
                    is_none: true,
                    ..descriptor("None")
                },
                RoomTypeDescriptor {
                    is_entrance: true,
                    ..descriptor("Entrance")
                },
                RoomTypeDescriptor {
                    is_corridor: true,
                    ..descriptor("Corridor")
                },
            ])
            .unwrap(),
        )
    }

    fn session() -> EditSession {
        EditSession::new(Arc::new(RwLock::new(RoomGraph::new(catalog()))))
    }

    #[test]
    fn test_capture_nodes_and_edges() {
        let mut s = session();
        let graph_arc = s.graph();

        let (entrance, corridor) = {
            let mut graph = graph_arc.write();
            let entrance_type = graph.catalog().entrance_type();
            let corridor_type = graph.catalog().find("Corridor").unwrap();
            let entrance = graph
                .create_node(
                    entrance_type,
                    Rect::new(0.0, 0.0, 100.0, 50.0),
                )
                .unwrap();
            let corridor = graph
                .create_node(
                    corridor_type,
                    Rect::new(200.0, 0.0, 100.0, 50.0),
                )
                .unwrap();
            graph.link(entrance, corridor).unwrap();
            (entrance, corridor)
        };
        s.toggle_select(corridor);

        let graph = graph_arc.read();
        let scene = Scene::capture(&graph, &s);

        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.nodes[0].label, "Entrance");
        assert!(!scene.nodes[0].selected);
        assert_eq!(scene.nodes[1].label, "Corridor");
        assert!(scene.nodes[1].selected);

        assert_eq!(scene.edges.len(), 1);
        let edge = &scene.edges[0];
        assert_eq!(edge.from, entrance);
        assert_eq!(edge.to, corridor);
        assert_eq!(edge.start, Point2D::new(50.0, 25.0));
        assert_eq!(edge.end, Point2D::new(250.0, 25.0));
        assert!(scene.pending.is_none());
    }

    #[test]
    fn test_capture_pending_line() {
        let mut s = session();
        let graph_arc = s.graph();
        let room = graph_arc.write().create_node_at(Point2D::new(0.0, 0.0));

        s.begin_link(room, Point2D::new(80.0, 37.5));
        s.drag_pending_line(Vector2D::new(40.0, 0.0));

        let graph = graph_arc.read();
        let scene = Scene::capture(&graph, &s);
        let pending = scene.pending.unwrap();
        assert_eq!(pending.start, graph.node(room).unwrap().center());
        assert_eq!(pending.end, Point2D::new(120.0, 37.5));
    }

    #[test]
    fn test_scene_serializes() {
        let s = session();
        let graph_arc = s.graph();
        graph_arc.write().create_node_at(Point2D::new(5.0, 5.0));

        let graph = graph_arc.read();
        let scene = Scene::capture(&graph, &s);
        let json = serde_json::to_string(&scene).unwrap();
        assert!(json.contains("\"nodes\""));
        assert!(json.contains("\"None\""));
    }
}
