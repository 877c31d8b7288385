//! Global constants used throughout the transit graph
//!
//! Default traversal costs per track kind. Costs are integers so the router
//! can order labels exactly; only their relative order matters.

/// Default cost of an express track.
///
/// Cheapest kind: an express track spans many stops in one hop.
pub const EXPRESS_COST: u32 = 3;

/// Default cost of a transfer track between two same-place stations
pub const TRANSFER_COST: u32 = 5;

/// Default cost of a main line track
pub const MAIN_COST: u32 = 10;

/// Default cost of a branch line track
pub const BRANCH_COST: u32 = 10;

/// Default cost of a loop track
pub const LOOP_COST: u32 = 20;

/// Name of the line created by `append_to_shortest_line` on an empty network
pub const FIRST_LINE_NAME: &str = "main_0";

/// Default tracing filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";
