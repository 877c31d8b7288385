//! Type definitions for the transit graph
//!
//! Identifiers and the classification enums shared by the store and router.

/// Identifier types
pub mod ids;
/// Station, track and line kinds
pub mod kinds;

pub use ids::{NodeId, EdgeId, LineId};
pub use kinds::{NodeKind, TrackKind, LineKind};
