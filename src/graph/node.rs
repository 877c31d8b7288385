//! Station (graph node) record

use std::collections::BTreeMap;
use crate::types::{EdgeId, LineId, NodeId, NodeKind};

/// A station holding one caller-supplied payload.
///
/// Stations are owned by the network arena and only handed out by
/// reference, so the derived kind and memberships stay consistent with the
/// tracks around them.
#[derive(Debug, Clone)]
pub struct Station<P> {
    pub(crate) id: NodeId,
    pub(crate) payload: P,
    pub(crate) kind: NodeKind,
    /// Line -> ordinal position on that line
    pub(crate) lines: BTreeMap<LineId, usize>,
    /// Incident tracks in creation order
    pub(crate) tracks: Vec<EdgeId>,
}

impl<P> Station<P> {
    pub(crate) fn new(id: NodeId, payload: P) -> Self {
        Self {
            id,
            payload,
            kind: NodeKind::Regular,
            lines: BTreeMap::new(),
            tracks: Vec::new(),
        }
    }

    /// Station identifier
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Stored payload
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Current derived kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Lines this station belongs to, with its position on each
    pub fn lines(&self) -> &BTreeMap<LineId, usize> {
        &self.lines
    }

    /// Position on `line`, if the station is a member
    pub fn position_on(&self, line: LineId) -> Option<usize> {
        self.lines.get(&line).copied()
    }

    /// Incident tracks in creation order
    pub fn tracks(&self) -> &[EdgeId] {
        &self.tracks
    }
}
