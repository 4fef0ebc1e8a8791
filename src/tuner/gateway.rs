//! HTTP client for the tuner's discovery and lineup endpoints.

use reqwest::Client;
use std::sync::Arc;

use crate::config::TunerConfig;
use crate::error::{BridgeError, Result};

use super::types::{Channel, DeviceIdentity, DeviceInfo, DiscoverResponse, LineupEntry};

/// Tuner HTTP gateway.
#[derive(Clone)]
pub struct TunerGateway {
    inner: Arc<TunerGatewayInner>,
}

struct TunerGatewayInner {
    config: TunerConfig,
    http_client: Client,
}

impl TunerGateway {
    /// Create a gateway sharing `http_client`.
    pub fn new(config: TunerConfig, http_client: Client) -> Self {
        Self {
            inner: Arc::new(TunerGatewayInner {
                config,
                http_client,
            }),
        }
    }

    pub fn config(&self) -> &TunerConfig {
        &self.inner.config
    }

    pub fn http_client(&self) -> &Client {
        &self.inner.http_client
    }

    /// Build a URL for a device API endpoint.
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.config.api_base(), path)
    }

    async fn fetch_discover(&self) -> Result<DiscoverResponse> {
        let url = self.build_url("/discover.json");
        let response: DiscoverResponse = self
            .inner
            .http_client
            .get(&url)
            .timeout(self.inner.config.discover_timeout())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(BridgeError::from_tuner)?
            .json()
            .await
            .map_err(BridgeError::from_tuner)?;

        tracing::debug!(
            device_id = response.device_id.as_deref().unwrap_or("unknown"),
            "Discovered tuner at {}",
            self.inner.config.address
        );

        Ok(response)
    }

    /// Query `/discover.json` for the device identity alone.
    ///
    /// Succeeds for any device that answers, with or without a guide token.
    pub async fn identify(&self) -> Result<DeviceIdentity> {
        self.fetch_discover().await.map(DeviceIdentity::from)
    }

    /// Query `/discover.json`.
    ///
    /// A device that answers without a `DeviceAuth` token is reported as
    /// [`BridgeError::AuthMissing`].
    pub async fn discover(&self) -> Result<DeviceInfo> {
        let mut response = self.fetch_discover().await?;

        let device_auth = match response.device_auth.take() {
            Some(token) if !token.is_empty() => token,
            _ => return Err(BridgeError::AuthMissing),
        };

        Ok(DeviceInfo {
            identity: DeviceIdentity::from(response),
            device_auth,
        })
    }

    /// Query `/lineup.json`.
    pub async fn lineup(&self) -> Result<Vec<Channel>> {
        let url = self.build_url("/lineup.json");
        let entries: Vec<LineupEntry> = self
            .inner
            .http_client
            .get(&url)
            .timeout(self.inner.config.lineup_timeout())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(BridgeError::from_tuner)?
            .json()
            .await
            .map_err(BridgeError::from_tuner)?;

        tracing::debug!("Tuner lineup has {} channels", entries.len());

        Ok(entries.into_iter().map(Channel::from).collect())
    }

    /// Find one channel in a fresh lineup.
    pub async fn channel(&self, guide_number: &str) -> Result<Channel> {
        self.lineup()
            .await?
            .into_iter()
            .find(|c| c.guide_number == guide_number)
            .ok_or_else(|| BridgeError::NotFound(guide_number.to_string()))
    }

    /// Raw MPEG-TS URL for a channel. Never touches the network.
    pub fn stream_url(&self, guide_number: &str) -> String {
        format!(
            "http://{}:{}/auto/v{}",
            self.inner.config.host(),
            self.inner.config.stream_port,
            guide_number
        )
    }
}
