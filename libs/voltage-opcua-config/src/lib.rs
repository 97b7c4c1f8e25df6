//! VoltageEMS OPC UA Driver Configuration
//!
//! Connection settings for the OPC UA driver and process logging setup.
//!
//! # Example
//! ```
//! use voltage_opcua_config::OpcuaConfig;
//!
//! let config = OpcuaConfig::new("tcp", "127.0.0.1", 4840, "/plc4x", "");
//! assert_eq!(config.endpoint_url(), "opc.tcp://127.0.0.1:4840/plc4x");
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;

pub use config::{OpcuaConfig, DEFAULT_PORT, DEFAULT_TRANSPORT_CODE};
pub use error::{ConfigError, Result};
pub use loader::{load_from_file, load_layered, ENV_PREFIX};
pub use logging::init_logging;
