// src/session/intent.rs

use crate::catalog::RoomTypeId;
use crate::graph::NodeId;
use crate::utils::geometry::{Point2D, Vector2D};

/// What a drag intent applies to: the current selection, or one
/// explicitly targeted node when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    Selection,
    Node(NodeId),
}

/// The closed set of editing intents the session accepts. The input
/// layer produces these; no other mutation path exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    CreateNode {
        position: Point2D,
        room_type: RoomTypeId,
    },
    RequestLink {
        from: NodeId,
        to: NodeId,
    },
    DeleteSelected,
    DeleteLinkBetweenSelected,
    Drag {
        target: DragTarget,
        delta: Vector2D,
    },
    Select {
        id: NodeId,
    },
    SelectAll,
    ClearSelection,
    Retype {
        id: NodeId,
        room_type: RoomTypeId,
    },
}
