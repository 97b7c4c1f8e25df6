//! Logging bootstrap for driver processes
//!
//! Installs a `tracing-subscriber` fmt layer filtered by `RUST_LOG`, falling
//! back to the given default directive. Safe to call more than once.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ConfigError, Result};

static INIT: OnceLock<()> = OnceLock::new();

/// Initialize global logging
///
/// # Arguments
/// * `default_level` - Filter directive used when `RUST_LOG` is unset,
///   e.g. `"info"` or `"voltage_readbuf=trace"`
pub fn init_logging(default_level: &str) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    let _ = INIT.set(());
    Ok(())
}
