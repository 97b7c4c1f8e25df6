//! Configuration loading
//!
//! Priority (highest to lowest):
//! 1. Environment variables prefixed with `OPCUA_` (e.g. `OPCUA_HOST`)
//! 2. Config file (toml / yaml / json, chosen by extension)
//! 3. Built-in defaults

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::Path;
use tracing::{debug, info};

use crate::config::OpcuaConfig;
use crate::error::{ConfigError, Result};

/// Environment variable prefix for OPC UA settings
pub const ENV_PREFIX: &str = "OPCUA_";

/// Pick a file provider by extension
fn file_figment(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ConfigError::UnsupportedFormat("<none>".to_string()))?;

    match extension {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        _ => Err(ConfigError::UnsupportedFormat(extension.to_string())),
    }
}

/// Load configuration from a single file
///
/// Every required field must be present in the file.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<OpcuaConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::load(format!(
            "config file not found: {}",
            path.display()
        )));
    }

    let config: OpcuaConfig = file_figment(Figment::new(), path)?.extract()?;
    config.validate()?;

    info!("Loaded OPC UA config from {}: {}", path.display(), config);
    Ok(config)
}

/// Load configuration from defaults, an optional file and the environment
pub fn load_layered<P: AsRef<Path>>(path: Option<P>) -> Result<OpcuaConfig> {
    let mut figment = Figment::from(Serialized::defaults(OpcuaConfig::default()));

    if let Some(path) = path {
        let path = path.as_ref();
        if path.exists() {
            figment = file_figment(figment, path)?;
        } else {
            debug!("Config file {} not found, skipping", path.display());
        }
    }

    let config: OpcuaConfig = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
    config.validate()?;

    info!("Resolved OPC UA endpoint: {}", config.endpoint_url());
    Ok(config)
}
