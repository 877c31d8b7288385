//! Core system types and foundations
//!
//! Error handling, configuration and logging bootstrap shared by the
//! network and the router.

pub mod error;
pub mod config;
pub mod logging;

// Re-export commonly used items
pub use error::{Error, Result, TopologyError, RouteError};
pub use config::{Config, TrackCosts, LoggingConfig, load_config, load_config_or_default};
