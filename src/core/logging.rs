//! Tracing subscriber bootstrap
//!
//! The library itself only emits `tracing` events. Applications embedding it
//! call [`init`] once to print them.

use tracing_subscriber::EnvFilter;
use crate::core::config::LoggingConfig;
use crate::core::error::{Error, Result};

/// Build the filter: `RUST_LOG` wins, the configured level otherwise
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| Error::config(format!("Invalid log level {:?}: {}", config.level, e))),
    }
}

/// Install a global fmt subscriber.
///
/// Returns an error if the level does not parse. A subscriber installed
/// earlier (by a previous call or by the host application) is left in place.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Initialized {} v{}", crate::NAME, crate::VERSION);
    }
    Ok(())
}
