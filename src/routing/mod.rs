//! Route finding over a network
//!
//! The router reads the topology store through its adjacency view and
//! never mutates it.

pub mod router;
pub mod route;

pub use router::Router;
pub use route::Route;
