// src/graph/verify.rs
//
// Structural audit of a room graph. Every finding here means some
// mutation bypassed link/unlink/delete_node: a programming error, not a
// user error. The audit is read-only and scans nodes in parallel.

use rayon::prelude::*;
use std::fmt;

use super::node::{NodeId, RoomNode};
use super::room_graph::RoomGraph;

/// One broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// `parent` lists `child` but the reverse record is missing (or the
    /// child node does not exist at all).
    DanglingChild { parent: NodeId, child: NodeId },
    /// `child` lists `parent` but the reverse record is missing (or the
    /// parent node does not exist at all).
    DanglingParent { child: NodeId, parent: NodeId },
    DuplicateChildEntry { parent: NodeId, child: NodeId },
    DuplicateParentEntry { child: NodeId, parent: NodeId },
    MultipleParents { child: NodeId, count: usize },
    /// The id→slot index disagrees with the node list.
    IndexDrift { id: NodeId },
    TooManyConnectedBosses { count: usize },
    /// An existing edge joins two corridors or two non-corridors.
    CorridorAdjacencyBroken { parent: NodeId, child: NodeId },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingChild { parent, child } => {
                write!(f, "node {parent} lists child {child} without a back reference")
            }
            Self::DanglingParent { child, parent } => {
                write!(f, "node {child} lists parent {parent} without a back reference")
            }
            Self::DuplicateChildEntry { parent, child } => {
                write!(f, "node {parent} lists child {child} more than once")
            }
            Self::DuplicateParentEntry { child, parent } => {
                write!(f, "node {child} lists parent {parent} more than once")
            }
            Self::MultipleParents { child, count } => {
                write!(f, "node {child} has {count} parents")
            }
            Self::IndexDrift { id } => {
                write!(f, "index entry for node {id} does not match the node list")
            }
            Self::TooManyConnectedBosses { count } => {
                write!(f, "{count} boss rooms are connected at once")
            }
            Self::CorridorAdjacencyBroken { parent, child } => {
                write!(f, "edge {parent} -> {child} does not alternate corridor kinds")
            }
        }
    }
}

/// Scans the whole graph and returns every broken invariant. An empty
/// report is the normal state for any graph mutated only through the
/// graph's own operations.
pub fn audit(graph: &RoomGraph) -> Vec<Inconsistency> {
    let mut findings: Vec<Inconsistency> = graph
        .nodes
        .par_iter()
        .flat_map_iter(|node| check_node(graph, node))
        .collect();

    // Index ↔ node list agreement.
    for (slot, node) in graph.nodes.iter().enumerate() {
        if graph.index.get(&node.id()) != Some(&slot) {
            findings.push(Inconsistency::IndexDrift { id: node.id() });
        }
    }
    for (&id, &slot) in &graph.index {
        if graph.nodes.get(slot).map(RoomNode::id) != Some(id) {
            findings.push(Inconsistency::IndexDrift { id });
        }
    }

    let connected_bosses = graph
        .nodes
        .iter()
        .filter(|n| {
            graph
                .room_type_of(n.id())
                .map(|t| t.is_boss_room)
                .unwrap_or(false)
                && n.has_parent()
        })
        .count();
    if connected_bosses > 1 {
        findings.push(Inconsistency::TooManyConnectedBosses {
            count: connected_bosses,
        });
    }

    findings
}

/// Panics if the graph holds any broken invariant. For tests and
/// debugging; desynchronized adjacency is not a recoverable condition.
pub fn assert_consistent(graph: &RoomGraph) {
    let findings = audit(graph);
    assert!(
        findings.is_empty(),
        "room graph is structurally inconsistent: {:?}",
        findings
    );
}

fn check_node(graph: &RoomGraph, node: &RoomNode) -> Vec<Inconsistency> {
    let mut findings = Vec::new();
    let corridor = |id: NodeId| {
        graph
            .room_type_of(id)
            .map(|t| t.is_corridor)
            .unwrap_or(false)
    };

    for (i, &child) in node.child_ids().iter().enumerate() {
        if node.child_ids()[..i].contains(&child) {
            findings.push(Inconsistency::DuplicateChildEntry {
                parent: node.id(),
                child,
            });
            continue;
        }
        match graph.node(child) {
            Some(child_node) if child_node.parent_ids().contains(&node.id()) => {
                if corridor(node.id()) == corridor(child) {
                    findings.push(Inconsistency::CorridorAdjacencyBroken {
                        parent: node.id(),
                        child,
                    });
                }
            }
            _ => findings.push(Inconsistency::DanglingChild {
                parent: node.id(),
                child,
            }),
        }
    }

    for (i, &parent) in node.parent_ids().iter().enumerate() {
        if node.parent_ids()[..i].contains(&parent) {
            findings.push(Inconsistency::DuplicateParentEntry {
                child: node.id(),
                parent,
            });
            continue;
        }
        let linked_back = graph
            .node(parent)
            .map(|p| p.child_ids().contains(&node.id()))
            .unwrap_or(false);
        if !linked_back {
            findings.push(Inconsistency::DanglingParent {
                child: node.id(),
                parent,
            });
        }
    }

    if node.parent_ids().len() > 1 {
        findings.push(Inconsistency::MultipleParents {
            child: node.id(),
            count: node.parent_ids().len(),
        });
    }

    findings
}
