//! Dense identifier types for the network arenas.
//!
//! Every identifier is an index into the arena that owns the item, assigned
//! in creation order and never reused. Ordering on identifiers is therefore
//! creation order, which the router relies on for deterministic tie-breaks.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Identifier of a station (graph node).
///
/// The #[repr(transparent)] keeps the id the same size as the index
/// it wraps.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

/// Identifier of a track (graph edge).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u32);

/// Identifier of a line. Lines are also addressable by their unique name.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineId(u32);

macro_rules! arena_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Create an id from a raw arena index
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Raw arena index
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Raw value
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }
    };
}

arena_id!(NodeId, "n");
arena_id!(EdgeId, "e");
arena_id!(LineId, "l");

/// Largest number of entries an arena may hold.
pub const MAX_ARENA_LEN: usize = u32::MAX as usize;

/// Convert an arena length into the next id value.
///
/// Callers check the length against `MAX_ARENA_LEN` before allocating.
pub(crate) fn next_index(len: usize) -> u32 {
    debug_assert!(len < MAX_ARENA_LEN);
    len as u32
}
