//! Graph data structures and operations
//!
//! This module contains the topology store: stations, tracks and lines,
//! the construction operations that create them, and the read-only
//! queries the router and outer layers use.

pub mod node;
pub mod edge;
pub mod line;
pub mod network;
pub mod snapshot;

// Re-export main graph types
pub use node::Station;
pub use edge::{Neighbor, Track};
pub use line::Line;
pub use network::Network;
pub use snapshot::{NetworkSnapshot, StationView};

#[cfg(test)]
mod tests;
