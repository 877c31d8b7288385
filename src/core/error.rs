//! Error types and handling for the transit graph
//!
//! Topology errors come from construction calls, route errors from searches.
//! Every variant is recoverable: a failed call leaves the network unchanged.

use thiserror::Error;
use crate::types::{LineId, NodeId};

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the transit graph
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Structural errors raised while building the network
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Route search outcomes
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    /// Snapshot serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML configuration parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by construction operations on the network
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A line with this name already exists
    #[error("Line already exists: {name}")]
    DuplicateLine {
        /// Name of the existing line
        name: String,
    },

    /// A line was requested with no payloads
    #[error("Line {name} has no payloads")]
    EmptyPayload {
        /// Name of the rejected line
        name: String,
    },

    /// A referenced station does not exist
    #[error("Node not found: {id}")]
    NodeNotFound {
        /// ID of the missing node
        id: NodeId,
    },

    /// A track would connect a station to itself
    #[error("Track would connect {id} to itself")]
    SelfLoop {
        /// ID of the node used as both endpoints
        id: NodeId,
    },

    /// A referenced line does not exist
    #[error("Line not found: {name}")]
    LineNotFound {
        /// Name or id of the missing line
        name: String,
    },

    /// A line position is past the end of the line
    #[error("Position {position} out of range for line {line} (length {len})")]
    PositionOutOfRange {
        /// Line that was indexed
        line: LineId,
        /// Requested position
        position: usize,
        /// Number of members on the line
        len: usize,
    },

    /// The operation does not apply to this structure
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// The node or edge arena is full
    #[error("Network capacity exceeded")]
    CapacityExceeded,
}

/// Outcomes of a route search that yield no path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A payload does not resolve to any station
    #[error("No station holds payload {payload}")]
    PayloadNotFound {
        /// Debug rendering of the payload
        payload: String,
    },

    /// The stations are in different components
    #[error("No route from {from} to {to}")]
    NoRoute {
        /// Source node
        from: NodeId,
        /// Target node
        to: NodeId,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is an ordinary search outcome rather than a fault.
    ///
    /// Reachability probes should treat these as answers, not failures.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Error::Route(RouteError::NoRoute { .. })
                | Error::Route(RouteError::PayloadNotFound { .. })
        )
    }

    /// Check if this error reports bad input at construction time
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Error::Topology(_))
    }

    /// Borrow the topology error, if this is one
    pub fn as_topology(&self) -> Option<&TopologyError> {
        match self {
            Error::Topology(e) => Some(e),
            _ => None,
        }
    }

    /// Borrow the route error, if this is one
    pub fn as_route(&self) -> Option<&RouteError> {
        match self {
            Error::Route(e) => Some(e),
            _ => None,
        }
    }
}
