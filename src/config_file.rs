//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{AssetConfig, ProxyConfig, ServerConfig, TunerConfig};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Tuner settings
    pub tuner: TunerSettings,
    /// Proxy settings
    pub proxy: ProxySettings,
    /// Asset settings
    pub assets: Option<AssetSettings>,
    /// Stream listing settings
    pub streams: Option<StreamSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public URL of this server
    pub external_url: Option<String>,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunerSettings {
    /// Device address
    pub address: String,
    /// Raw stream port
    pub stream_port: Option<u16>,
    /// Discovery timeout in milliseconds
    pub discover_timeout_ms: Option<u64>,
    /// Lineup timeout in milliseconds
    pub lineup_timeout_ms: Option<u64>,
    /// Remote guide service endpoint
    pub guide_url: Option<String>,
    /// Guide service timeout in milliseconds
    pub guide_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxySettings {
    /// Base URL of the transcoding proxy
    pub url: String,
    /// Proxy credential
    pub api_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSettings {
    /// Avatar service for channel logos
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Append the device-info entry
    pub device_info: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let defaults = ServerConfig::default();
        Self {
            server: ServerSettings {
                host: defaults.host,
                port: defaults.port,
                external_url: Some(defaults.external_url),
                cors_enabled: Some(defaults.cors_enabled),
            },
            tuner: TunerSettings {
                address: defaults.tuner.address,
                stream_port: Some(defaults.tuner.stream_port),
                discover_timeout_ms: Some(defaults.tuner.discover_timeout_ms),
                lineup_timeout_ms: Some(defaults.tuner.lineup_timeout_ms),
                guide_url: Some(defaults.tuner.guide_url),
                guide_timeout_ms: Some(defaults.tuner.guide_timeout_ms),
            },
            proxy: ProxySettings {
                url: defaults.proxy.base_url,
                api_password: Some(defaults.proxy.api_password),
            },
            assets: Some(AssetSettings {
                avatar_url: Some(defaults.assets.avatar_url),
            }),
            streams: Some(StreamSettings {
                device_info: Some(defaults.device_info_enabled),
            }),
            logging: Some(LoggingSettings {
                level: defaults.log_level,
                format: Some(defaults.log_format),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let tuner_defaults = defaults.tuner;

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            external_url: self.server.external_url.unwrap_or(defaults.external_url),
            tuner: TunerConfig {
                address: self.tuner.address,
                stream_port: self.tuner.stream_port.unwrap_or(tuner_defaults.stream_port),
                discover_timeout_ms: self
                    .tuner
                    .discover_timeout_ms
                    .unwrap_or(tuner_defaults.discover_timeout_ms),
                lineup_timeout_ms: self
                    .tuner
                    .lineup_timeout_ms
                    .unwrap_or(tuner_defaults.lineup_timeout_ms),
                guide_url: self.tuner.guide_url.unwrap_or(tuner_defaults.guide_url),
                guide_timeout_ms: self
                    .tuner
                    .guide_timeout_ms
                    .unwrap_or(tuner_defaults.guide_timeout_ms),
            },
            proxy: ProxyConfig {
                base_url: self.proxy.url,
                api_password: self.proxy.api_password.unwrap_or_default(),
            },
            assets: AssetConfig {
                avatar_url: self
                    .assets
                    .and_then(|a| a.avatar_url)
                    .unwrap_or(defaults.assets.avatar_url),
            },
            device_info_enabled: self
                .streams
                .and_then(|s| s.device_info)
                .unwrap_or(defaults.device_info_enabled),
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level: self
                .logging
                .as_ref()
                .map(|l| l.level.clone())
                .unwrap_or_else(|| "info".to_string()),
            log_format: self
                .logging
                .and_then(|l| l.format)
                .unwrap_or_else(|| "pretty".to_string()),
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
