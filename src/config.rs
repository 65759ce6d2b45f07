use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an optional YAML settings file
pub const CONFIG_FILE_ENV: &str = "UNITY_MCP_CONFIG";
/// Overrides [`GatewayConfig::unity_url`]
pub const UNITY_BRIDGE_URL_ENV: &str = "UNITY_BRIDGE_URL";
/// Overrides [`RelayConfig::port`]
pub const RELAY_PORT_ENV: &str = "COMMAND_RELAY_PORT";
/// Overrides [`RelayConfig::workspace_root`]
pub const RELAY_WORKSPACE_ENV: &str = "COMMAND_RELAY_WORKSPACE";
/// Overrides [`RelayConfig::marker_file`]
pub const RELAY_MARKER_FILE_ENV: &str = "COMMAND_RELAY_MARKER_FILE";

const DEFAULT_UNITY_URL: &str = "http://localhost:8080";
const DEFAULT_RELAY_PORT: u16 = 3001;
const DEFAULT_MARKER_FILE: &str = ".vscode/copilot-command.json";
const DEFAULT_SERVICE_NAME: &str = "copilot-command-relay";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid port '{0}'")]
    InvalidPort(String),
}

/// Settings shared by both binaries; each one reads only its own section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gateway: GatewayConfig,
    pub relay: RelayConfig,
}

/// Where the Unity Editor bridge listens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the Unity Editor HTTP bridge, e.g. `http://localhost:8080`
    pub unity_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            unity_url: DEFAULT_UNITY_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Port the relay listens on (loopback only)
    pub port: u16,
    /// Root of the IDE workspace the marker file lives in
    pub workspace_root: PathBuf,
    /// Marker file path, relative to `workspace_root` unless absolute
    pub marker_file: PathBuf,
    /// Reported by `GET /ping`
    pub service_name: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_RELAY_PORT,
            workspace_root: PathBuf::from("."),
            marker_file: PathBuf::from(DEFAULT_MARKER_FILE),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl RelayConfig {
    /// Full path of the marker file the IDE extension watches
    pub fn marker_path(&self) -> PathBuf {
        if self.marker_file.is_absolute() {
            self.marker_file.clone()
        } else {
            self.workspace_root.join(&self.marker_file)
        }
    }
}

impl Settings {
    /// Load settings from the YAML file named by `UNITY_MCP_CONFIG` (if any),
    /// then apply environment variable overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(UNITY_BRIDGE_URL_ENV) {
            self.gateway.unity_url = url;
        }
        if let Some(port) = lookup(RELAY_PORT_ENV) {
            self.relay.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(root) = lookup(RELAY_WORKSPACE_ENV) {
            self.relay.workspace_root = PathBuf::from(root);
        }
        if let Some(marker) = lookup(RELAY_MARKER_FILE_ENV) {
            self.relay.marker_file = PathBuf::from(marker);
        }
        Ok(())
    }
}
