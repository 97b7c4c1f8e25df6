//! OPC UA transport configuration
//!
//! Host, port, endpoint path and driver parameters for one OPC UA
//! connection. The endpoint URL handed to the transport layer is assembled
//! from these parts: `opc.{transport}://{host}:{port}{endpoint}`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConfigError, Result};

/// Default OPC UA server port used by the driver
pub const DEFAULT_PORT: u16 = 12687;

/// Default transport code
pub const DEFAULT_TRANSPORT_CODE: &str = "tcp";

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_transport_code() -> String {
    DEFAULT_TRANSPORT_CODE.to_string()
}

/// OPC UA connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcuaConfig {
    /// Transport code, e.g. "tcp"
    #[serde(default = "default_transport_code")]
    pub transport_code: String,

    /// Server host name or address
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Endpoint path appended after the port, e.g. "/plc4x"
    #[serde(default)]
    pub endpoint: String,

    /// Raw driver parameter string
    #[serde(default)]
    pub params: String,
}

impl Default for OpcuaConfig {
    fn default() -> Self {
        Self {
            transport_code: default_transport_code(),
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            endpoint: String::new(),
            params: String::new(),
        }
    }
}

impl OpcuaConfig {
    pub fn new(
        transport_code: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        endpoint: impl Into<String>,
        params: impl Into<String>,
    ) -> Self {
        Self {
            transport_code: transport_code.into(),
            host: host.into(),
            port,
            endpoint: endpoint.into(),
            params: params.into(),
        }
    }

    /// Port used when none is configured
    pub fn default_port() -> u16 {
        DEFAULT_PORT
    }

    /// Full endpoint URL, e.g. `opc.tcp://127.0.0.1:12687/plc4x`
    pub fn endpoint_url(&self) -> String {
        format!(
            "opc.{}://{}:{}{}",
            self.transport_code, self.host, self.port, self.endpoint
        )
    }

    /// Check that the parts form a usable endpoint
    pub fn validate(&self) -> Result<()> {
        if self.transport_code.is_empty()
            || !self
                .transport_code
                .chars()
                .all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ConfigError::invalid(format!(
                "transport code must be alphanumeric, got {:?}",
                self.transport_code
            )));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid("host must not be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::invalid("port must not be 0"));
        }
        if !self.endpoint.is_empty() && !self.endpoint.starts_with('/') {
            return Err(ConfigError::invalid(format!(
                "endpoint must start with '/', got {:?}",
                self.endpoint
            )));
        }
        Ok(())
    }
}

impl fmt::Display for OpcuaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration{{endpoint={}}}", self.endpoint_url())
    }
}
