//! Search result

use serde::Serialize;
use crate::types::{EdgeId, NodeId};

/// A cheapest path between two stations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) tracks: Vec<EdgeId>,
    pub(crate) cost: u64,
}

impl Route {
    /// Stations from source to target, inclusive
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Tracks taken, one fewer than the stations
    pub fn tracks(&self) -> &[EdgeId] {
        &self.tracks
    }

    /// Total traversal cost
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Number of tracks taken
    pub fn hops(&self) -> usize {
        self.tracks.len()
    }

    /// First station
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last station
    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Drop the bookkeeping and keep the station sequence
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}
