//! Track (graph edge) record

use serde::Serialize;
use crate::types::{EdgeId, LineId, NodeId, TrackKind};

/// A typed connection between two stations.
///
/// `from`/`to` record construction direction only; every track is
/// traversable both ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// Unique track identifier
    pub id: EdgeId,
    /// Endpoint the track was built from
    pub from: NodeId,
    /// Endpoint the track was built to
    pub to: NodeId,
    /// Track kind
    pub kind: TrackKind,
    /// Owning line; loop and transfer tracks belong to none
    pub line: Option<LineId>,
    /// Base traversal cost, fixed by kind at creation
    pub cost: u32,
}

impl Track {
    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// Whether the track joins `a` and `b`, in either direction
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// One step out of a station, as seen by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Track taken
    pub edge: EdgeId,
    /// Kind of that track
    pub kind: TrackKind,
    /// Base cost of that track
    pub cost: u32,
    /// Station reached
    pub node: NodeId,
}
