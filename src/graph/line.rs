//! Line record

use serde::Serialize;
use crate::types::{LineId, LineKind, NodeId};

/// A named ordered sequence of stations.
///
/// Branch lines hold their attachment station at position 0; express lines
/// hold their stops in travel order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// Unique line identifier
    pub id: LineId,
    /// Unique line name
    pub name: String,
    /// Line kind
    pub kind: LineKind,
    /// Opaque display label (color)
    pub label: String,
    /// Member stations in position order
    pub stations: Vec<NodeId>,
}

impl Line {
    /// Number of member stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the line has no members. Never true for a stored line.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Member at `position`
    pub fn station_at(&self, position: usize) -> Option<NodeId> {
        self.stations.get(position).copied()
    }

    /// First member
    pub fn first(&self) -> Option<NodeId> {
        self.stations.first().copied()
    }

    /// Last member
    pub fn last(&self) -> Option<NodeId> {
        self.stations.last().copied()
    }

    /// Whether `position` is a terminal position on this line.
    ///
    /// Main lines end at both sides. A branch line starts at a station it
    /// does not own, so only its far end counts. Express stops never do.
    pub fn is_terminal_position(&self, position: usize) -> bool {
        match self.kind {
            LineKind::Main => position == 0 || position + 1 == self.len(),
            LineKind::Branch => position != 0 && position + 1 == self.len(),
            LineKind::Express => false,
        }
    }

    /// Attachment station of a branch line
    pub fn attachment(&self) -> Option<NodeId> {
        match self.kind {
            LineKind::Branch => self.first(),
            _ => None,
        }
    }
}
