//! Tuner API types.
//!
//! Wire schemas mirror the PascalCase JSON the device serves; the domain
//! types are what the rest of the crate works with.

use serde::Deserialize;

/// `/discover.json` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiscoverResponse {
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub model_number: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default, rename = "DeviceID")]
    pub device_id: Option<String>,
    #[serde(default)]
    pub device_auth: Option<String>,
}

/// One `/lineup.json` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineupEntry {
    pub guide_number: String,
    pub guide_name: String,
    #[serde(default)]
    pub video_codec: Option<String>,
    #[serde(default)]
    pub audio_codec: Option<String>,
    /// `1` for HD channels; absent otherwise.
    #[serde(default, rename = "HD")]
    pub hd: Option<u8>,
    #[serde(default)]
    pub signal_strength: Option<u32>,
    #[serde(default)]
    pub signal_quality: Option<u32>,
}

/// Name, model and firmware reported by a tuner.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceIdentity {
    pub friendly_name: String,
    pub model_number: String,
    pub firmware_version: String,
}

impl DeviceIdentity {
    /// `HDHomeRun PRIME (HDHR3-CC) FW:20230713`
    pub fn summary(&self) -> String {
        format!(
            "{} ({}) FW:{}",
            self.friendly_name, self.model_number, self.firmware_version
        )
    }
}

impl From<DiscoverResponse> for DeviceIdentity {
    fn from(response: DiscoverResponse) -> Self {
        Self {
            friendly_name: response
                .friendly_name
                .unwrap_or_else(|| "HDHomeRun".to_string()),
            model_number: response.model_number.unwrap_or_else(|| "unknown".to_string()),
            firmware_version: response
                .firmware_version
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// Identity and guide authorization of a tuner.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub identity: DeviceIdentity,
    /// Opaque token the guide service is keyed by.
    pub device_auth: String,
}

/// A configured channel on the tuner.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub guide_number: String,
    pub guide_name: String,
    pub signal_strength: Option<u32>,
    pub signal_quality: Option<u32>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub is_hd: bool,
}

impl From<LineupEntry> for Channel {
    fn from(entry: LineupEntry) -> Self {
        Self {
            guide_number: entry.guide_number,
            guide_name: entry.guide_name,
            signal_strength: entry.signal_strength,
            signal_quality: entry.signal_quality,
            video_codec: entry.video_codec,
            audio_codec: entry.audio_codec,
            is_hd: entry.hd == Some(1),
        }
    }
}

// helper.
fn percent_or_unknown(value: Option<u32>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

impl Channel {
    /// `Signal: 92% / Qual: 100%`
    pub fn signal_summary(&self) -> String {
        format!(
            "Signal: {}% / Qual: {}%",
            percent_or_unknown(self.signal_strength),
            percent_or_unknown(self.signal_quality)
        )
    }

    /// `MPEG2/AC3 (HD)`
    pub fn codec_summary(&self) -> String {
        format!(
            "{}/{} ({})",
            self.video_codec.as_deref().unwrap_or("?"),
            self.audio_codec.as_deref().unwrap_or("?"),
            if self.is_hd { "HD" } else { "SD" }
        )
    }
}
