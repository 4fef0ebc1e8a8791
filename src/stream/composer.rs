//! Stream listing composition.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::error::{BridgeError, Result};
use crate::guide::{Program, ProgramResolver};
use crate::tuner::{Channel, DeviceIdentity, TunerGateway};

/// Label used when no program is known to be airing.
pub const LIVE_LABEL: &str = "(Live)";

/// Which slot of the listing a descriptor fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Through the transcoding proxy. Preferred.
    Proxied,
    /// Raw MPEG-TS from the tuner.
    Direct,
    /// Device health; not playable.
    DeviceInfo,
}

/// One playback option offered to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    pub kind: StreamKind,
    pub label: String,
    /// Absolute URL, including any proxy query parameters
    pub url: String,
    /// Playable by a web client without further repackaging
    pub is_direct_playable: bool,
}

/// `(News)` or `(Live)`
pub fn show_title(program: Option<&Program>) -> String {
    match program {
        Some(program) => format!("({})", program.title),
        None => LIVE_LABEL.to_string(),
    }
}

/// Explanatory text for a device-info slot that could not be filled.
pub fn device_info_placeholder(err: &BridgeError) -> String {
    match err {
        BridgeError::DeviceUnreachable(_) => {
            "Unavailable - Could not reach HDHomeRun API".to_string()
        }
        BridgeError::NotFound(guide_number) => {
            format!("Unavailable - Channel {} is not in the lineup", guide_number)
        }
        _ => "Unavailable - Unexpected response from HDHomeRun API".to_string(),
    }
}

/// Three-line device summary shown in the device-info slot.
pub fn device_info_text(device: &DeviceIdentity, channel: &Channel) -> String {
    format!(
        "{}\n{}\n{}",
        device.summary(),
        channel.signal_summary(),
        channel.codec_summary()
    )
}

/// Builds the ordered stream listing for a channel.
#[derive(Clone)]
pub struct StreamComposer {
    inner: Arc<StreamComposerInner>,
}

struct StreamComposerInner {
    gateway: TunerGateway,
    resolver: ProgramResolver,
    proxy: ProxyConfig,
    icon_url: String,
    device_info_enabled: bool,
}

impl StreamComposer {
    pub fn new(
        gateway: TunerGateway,
        resolver: ProgramResolver,
        proxy: ProxyConfig,
        external_base: &str,
        device_info_enabled: bool,
    ) -> Self {
        Self {
            inner: Arc::new(StreamComposerInner {
                gateway,
                resolver,
                proxy,
                icon_url: format!("{}/assets/hdhomerun_icon.png", external_base),
                device_info_enabled,
            }),
        }
    }

    /// Raw tuner URL for a channel.
    pub fn direct_url(&self, guide_number: &str) -> String {
        self.inner.gateway.stream_url(guide_number)
    }

    /// HLS manifest URL on the transcoding proxy wrapping the raw tuner URL.
    pub fn proxied_url(&self, guide_number: &str) -> String {
        format!(
            "{}/proxy/hls/manifest.m3u8?d={}&api_password={}",
            self.inner.proxy.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.direct_url(guide_number)),
            urlencoding::encode(&self.inner.proxy.api_password)
        )
    }

    /// Device identity and lineup, issued concurrently, narrowed to one
    /// channel. A missing guide token does not matter here.
    pub async fn device_status(&self, guide_number: &str) -> Result<(DeviceIdentity, Channel)> {
        let (device, lineup) =
            tokio::join!(self.inner.gateway.identify(), self.inner.gateway.lineup());

        let device = device?;
        let channel = lineup?
            .into_iter()
            .find(|c| c.guide_number == guide_number)
            .ok_or_else(|| BridgeError::NotFound(guide_number.to_string()))?;

        Ok((device, channel))
    }

    /// Assemble the listing from already-resolved parts.
    ///
    /// `status` is `None` when the device-info slot is disabled.
    pub fn compose(
        &self,
        guide_number: &str,
        program: Option<&Program>,
        status: Option<Result<(DeviceIdentity, Channel)>>,
    ) -> Vec<StreamDescriptor> {
        let title = show_title(program);

        let mut streams = vec![
            StreamDescriptor {
                kind: StreamKind::Proxied,
                label: format!("🌀 Mediaflow {}", title),
                url: self.proxied_url(guide_number),
                is_direct_playable: true,
            },
            StreamDescriptor {
                kind: StreamKind::Direct,
                label: format!("📡 Direct {}", title),
                url: self.direct_url(guide_number),
                is_direct_playable: false,
            },
        ];

        if let Some(status) = status {
            let label = match status {
                Ok((device, channel)) => device_info_text(&device, &channel),
                Err(e) => {
                    tracing::debug!("Device info for Ch {} unavailable: {}", guide_number, e);
                    device_info_placeholder(&e)
                }
            };
            streams.push(StreamDescriptor {
                kind: StreamKind::DeviceInfo,
                label,
                url: self.inner.icon_url.clone(),
                is_direct_playable: false,
            });
        }

        streams
    }

    /// Ordered stream listing for `guide_number`: proxied, direct, then
    /// device info when enabled. Never empty.
    pub async fn build_streams(&self, guide_number: &str) -> Vec<StreamDescriptor> {
        let status = async {
            if self.inner.device_info_enabled {
                Some(self.device_status(guide_number).await)
            } else {
                None
            }
        };

        let (program, status) = tokio::join!(
            self.inner.resolver.current_program(guide_number),
            status
        );

        self.compose(guide_number, program.as_ref(), status)
    }
}
