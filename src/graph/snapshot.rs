//! Read-only serializable view of a network
//!
//! Rendering and statistics layers consume this instead of the arenas.

use serde::Serialize;
use crate::core::error::Result;
use crate::graph::edge::Track;
use crate::graph::line::Line;
use crate::graph::network::Network;
use crate::types::{LineId, NodeId, NodeKind};

/// Borrowed view of every line, track and station
#[derive(Debug, Serialize)]
pub struct NetworkSnapshot<'a, P> {
    /// Lines in creation order
    pub lines: Vec<&'a Line>,
    /// Tracks in creation order
    pub tracks: Vec<&'a Track>,
    /// Stations in creation order
    pub stations: Vec<StationView<'a, P>>,
}

/// One station as seen from outside the store
#[derive(Debug, Serialize)]
pub struct StationView<'a, P> {
    /// Station identifier
    pub id: NodeId,
    /// Stored payload
    pub payload: &'a P,
    /// Derived kind at snapshot time
    pub kind: NodeKind,
    /// (line, position) pairs ordered by line id
    pub lines: Vec<(LineId, usize)>,
}

impl<P> Network<P> {
    /// Borrow a consistent view of the whole network
    pub fn snapshot(&self) -> NetworkSnapshot<'_, P> {
        NetworkSnapshot {
            lines: self.lines().collect(),
            tracks: self.edges().collect(),
            stations: self
                .nodes()
                .map(|station| StationView {
                    id: station.id(),
                    payload: station.payload(),
                    kind: station.kind(),
                    lines: station.lines().iter().map(|(&line, &position)| (line, position)).collect(),
                })
                .collect(),
        }
    }
}

impl<P: Serialize> Network<P> {
    /// Serialize the snapshot as pretty JSON
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
