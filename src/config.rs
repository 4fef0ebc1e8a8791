//! Server configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuner device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunerConfig {
    /// Device address, optionally with a port for the HTTP API (`10.0.0.5`, `10.0.0.5:80`)
    pub address: String,

    /// Port the raw MPEG-TS streams are served on
    pub stream_port: u16,

    /// Timeout for `/discover.json` in milliseconds
    pub discover_timeout_ms: u64,

    /// Timeout for `/lineup.json` in milliseconds
    pub lineup_timeout_ms: u64,

    /// Remote guide service endpoint
    pub guide_url: String,

    /// Timeout for the guide service in milliseconds
    pub guide_timeout_ms: u64,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            address: "192.168.1.100".to_string(),
            stream_port: 5004,
            discover_timeout_ms: 1000,
            lineup_timeout_ms: 3000,
            guide_url: "http://api.hdhomerun.com/api/guide".to_string(),
            guide_timeout_ms: 2000,
        }
    }
}

impl TunerConfig {
    /// Base URL of the device HTTP API
    pub fn api_base(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Device host without any API port
    pub fn host(&self) -> &str {
        match self.address.rsplit_once(':') {
            Some((host, port))
                if !port.is_empty()
                    && port.bytes().all(|b| b.is_ascii_digit())
                    && (!host.contains(':') || host.ends_with(']')) =>
            {
                host
            }
            _ => &self.address,
        }
    }

    pub fn discover_timeout(&self) -> Duration {
        Duration::from_millis(self.discover_timeout_ms)
    }

    pub fn lineup_timeout(&self) -> Duration {
        Duration::from_millis(self.lineup_timeout_ms)
    }

    pub fn guide_timeout(&self) -> Duration {
        Duration::from_millis(self.guide_timeout_ms)
    }
}

/// Transcoding proxy configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Base URL of the proxy service
    pub base_url: String,

    /// Credential passed through as `api_password`
    pub api_password: String,
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("base_url", &self.base_url)
            .field("api_password", &"<redacted>")
            .finish()
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888".to_string(),
            api_password: String::new(),
        }
    }
}

/// Channel art configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Avatar service used to render channel logos
    pub avatar_url: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            avatar_url: "https://ui-avatars.com/api/".to_string(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public URL of this server, used for asset links
    pub external_url: String,

    /// Tuner configuration
    pub tuner: TunerConfig,

    /// Proxy configuration
    pub proxy: ProxyConfig,

    /// Asset configuration
    pub assets: AssetConfig,

    /// Append the device-info entry to stream listings
    pub device_info_enabled: bool,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7000,
            external_url: "http://stremioota.lan".to_string(),
            tuner: TunerConfig::default(),
            proxy: ProxyConfig::default(),
            assets: AssetConfig::default(),
            device_info_enabled: true,
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply the environment variables the addon has always honoured.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ip) = lookup("HDHOMERUN_IP") {
            self.tuner.address = ip;
        }
        if let Some(url) = lookup("MEDIAFLOW_URL") {
            self.proxy.base_url = url;
        }
        if let Some(pass) = lookup("MEDIAFLOW_PASS") {
            self.proxy.api_password = pass;
        }
        if let Some(url) = lookup("EXTERNAL_URL") {
            self.external_url = url;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .map_err(|_| format!("Invalid PORT value {:?}", port))?;
        }
        if lookup("DEBUG_LOGGING").as_deref() == Some("true") {
            self.log_level = "debug".to_string();
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.tuner.address.trim().is_empty() {
            return Err("Tuner address must not be empty".to_string());
        }

        for (name, url) in [
            ("Proxy URL", &self.proxy.base_url),
            ("External URL", &self.external_url),
            ("Guide URL", &self.tuner.guide_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{} must start with http:// or https://", name));
            }
        }

        Ok(())
    }

    /// Public URL without a trailing slash
    pub fn external_base(&self) -> &str {
        self.external_url.trim_end_matches('/')
    }
}
