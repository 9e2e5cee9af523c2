// src/graph/error.rs

use thiserror::Error;

use super::node::NodeId;
use crate::catalog::RoomTypeId;

/// Why a proposed parent→child link was rejected. One variant per
/// connectivity rule, so the edit session can surface the precise reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("a room cannot be linked to itself")]
    SelfLoop,
    #[error("the target room still has the placeholder type")]
    TargetIsPlaceholder,
    #[error("an entrance can never be a child room")]
    TargetIsEntrance,
    #[error("the target room already has a parent")]
    TargetAlreadyHasParent,
    #[error("a boss room is already connected elsewhere in the graph")]
    DuplicateBossRoom,
    #[error("these rooms are already linked")]
    DuplicateEdge,
    #[error("the target room is already a parent of the source room")]
    BackEdge,
    #[error("a link must join a corridor to a non-corridor room")]
    CorridorAdjacency,
    #[error("the parent room cannot accept another child of this kind")]
    FanOutExceeded,
}

/// Failures of graph-level operations. All recoverable; the edit session
/// reports them as user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("no room node {0} exists in this graph")]
    NodeNotFound(NodeId),
    #[error("room node {0} is an entrance and cannot be deleted")]
    ProtectedNode(NodeId),
    #[error("room type {0} does not exist in the catalog")]
    UnknownRoomType(RoomTypeId),
    #[error(transparent)]
    Link(#[from] LinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_error_messages_are_distinct() {
        let all = [
            LinkError::SelfLoop,
            LinkError::TargetIsPlaceholder,
            LinkError::TargetIsEntrance,
            LinkError::TargetAlreadyHasParent,
            LinkError::DuplicateBossRoom,
            LinkError::DuplicateEdge,
            LinkError::BackEdge,
            LinkError::CorridorAdjacency,
            LinkError::FanOutExceeded,
        ];
        let mut seen = std::collections::HashSet::new();
        for err in all {
            assert!(seen.insert(err.to_string()), "duplicate message: {err}");
        }
    }

    #[test]
    fn test_link_error_converts_to_graph_error() {
        let err: GraphError = LinkError::SelfLoop.into();
        assert_eq!(err, GraphError::Link(LinkError::SelfLoop));
        assert_eq!(err.to_string(), LinkError::SelfLoop.to_string());
    }
}
