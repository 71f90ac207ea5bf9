use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;

use demo_kit::{ConfigError, DbConfig, LoggingConfig, load_layered};
use role_guard::RoleGuardConfig;
use serde::{Deserialize, Serialize};

/// Environment variables overriding the config file, e.g. `DEMO__SERVER__BIND_ADDR`.
pub const ENV_PREFIX: &str = "DEMO__";

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Requests running longer than this are answered with 504.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DbConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub role_guard: RoleGuardConfig,
    /// Per-module sections, keyed by module name.
    #[serde(default)]
    pub modules: BTreeMap<String, serde_json::Value>,
}

impl AppConfig {
    /// Defaults, then `path` (if any), then `DEMO__*` environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is missing or a layer is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        load_layered(path, ENV_PREFIX)
    }

    #[must_use]
    pub fn module_config(&self, name: &str) -> Option<serde_json::Value> {
        self.modules.get(name).cloned()
    }

    /// # Errors
    /// Returns an error if `server.bind_addr` is not a socket address.
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address '{}': {e}", self.server.bind_addr))
    }
}
