//! Classification enums for stations, tracks and lines.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Derived role of a station in the network.
///
/// Never assigned by callers: the store recomputes it after every structural
/// change that touches the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Plain station on a single line
    Regular,
    /// Attachment point of at least one branch line
    Junction,
    /// End of a line
    Terminal,
    /// Endpoint of an express track
    Express,
    /// Hub shared between lines or joined by a transfer track
    Transfer,
}

impl NodeKind {
    /// All kinds, in declaration order
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Regular,
        NodeKind::Junction,
        NodeKind::Terminal,
        NodeKind::Express,
        NodeKind::Transfer,
    ];

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Regular => "regular",
            NodeKind::Junction => "junction",
            NodeKind::Terminal => "terminal",
            NodeKind::Express => "express",
            NodeKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a track. Determines its base traversal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Consecutive stations of a main line
    Main,
    /// Consecutive stations of a branch line, including the attachment hop
    Branch,
    /// Direct shortcut between two stops
    Express,
    /// Cycle-closing connection between two line ends
    Loop,
    /// Same-place connection between stations of different lines
    Transfer,
}

impl TrackKind {
    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            TrackKind::Main => "main",
            TrackKind::Branch => "branch",
            TrackKind::Express => "express",
            TrackKind::Loop => "loop",
            TrackKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Stand-alone line of freshly allocated stations
    Main,
    /// Line grafted onto an existing station
    Branch,
    /// Sequence of existing stations joined by express tracks
    Express,
}

impl LineKind {
    /// Track kind used between consecutive members of this line
    pub fn track_kind(self) -> TrackKind {
        match self {
            LineKind::Main => TrackKind::Main,
            LineKind::Branch => TrackKind::Branch,
            LineKind::Express => TrackKind::Express,
        }
    }

    /// Display label given to lines created without one
    pub fn default_label(self) -> &'static str {
        match self {
            LineKind::Main => "blue",
            LineKind::Branch => "green",
            LineKind::Express => "red",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineKind::Main => "main",
            LineKind::Branch => "branch",
            LineKind::Express => "express",
        })
    }
}
