//! Transit Graph - typed station networks with cheapest-route search
//!
//! Data items live in stations. Stations are organised into lines, joined
//! by typed tracks (main, branch, express, loop, transfer), and searched by
//! a deterministic Dijkstra router that prefers express and transfer
//! shortcuts where they exist.
//!
//! ```
//! use transit_graph::{Network, Router};
//!
//! let mut network = Network::new();
//! let m1 = network.create_line("M1", ["A", "B", "C", "D", "E", "F"])?;
//! let a = network.node_at(m1, 0).unwrap();
//! let f = network.node_at(m1, 5).unwrap();
//! network.create_express("X1", a, f)?;
//!
//! let route = Router::new(&network).find_optimal_route("A", "F")?;
//! assert_eq!(route, vec![a, f]);
//! # Ok::<(), transit_graph::Error>(())
//! ```
#![warn(missing_docs)]

// Core foundational modules
pub mod core;
pub mod types;
pub mod constants;

// Main functional modules
pub mod graph;
pub mod routing;
pub mod shared;

// Re-export commonly used items for convenience
pub use crate::core::{Config, Error, Result, RouteError, TopologyError, TrackCosts};
pub use graph::{Line, Neighbor, Network, NetworkSnapshot, Station, Track};
pub use routing::{Route, Router};
pub use shared::SharedNetwork;
pub use types::{EdgeId, LineId, LineKind, NodeId, NodeKind, TrackKind};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install the tracing subscriber described by `config`
pub fn init(config: &Config) -> Result<()> {
    crate::core::logging::init(&config.logging)
}
