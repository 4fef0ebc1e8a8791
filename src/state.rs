//! Application state
//!
//! Holds the immutable configuration and the components built from it.
//! Nothing here is mutated after startup; every request resolves against
//! the tuner afresh.

use reqwest::Client;

use crate::addon::Addon;
use crate::config::ServerConfig;
use crate::error::{BridgeError, Result};
use crate::guide::ProgramResolver;
use crate::stream::StreamComposer;
use crate::tuner::TunerGateway;

pub struct AppState {
    pub config: ServerConfig,
    pub gateway: TunerGateway,
    pub addon: Addon,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("hdhr-bridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BridgeError::Config(format!("HTTP client: {}", e)))?;

        let gateway = TunerGateway::new(config.tuner.clone(), http_client);
        let resolver = ProgramResolver::new(gateway.clone());
        let composer = StreamComposer::new(
            gateway.clone(),
            resolver.clone(),
            config.proxy.clone(),
            config.external_base(),
            config.device_info_enabled,
        );
        let addon = Addon::new(gateway.clone(), resolver, composer, config.external_base());

        Ok(Self {
            config,
            gateway,
            addon,
        })
    }
}
