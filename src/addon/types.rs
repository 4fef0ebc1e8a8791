//! Addon protocol types.
//!
//! Serialized in the camelCase shape playback clients expect.

use serde::Serialize;

use crate::stream::{StreamDescriptor, StreamKind};

/// Name shown for the device-info entry.
pub const DEVICE_INFO_NAME: &str = "ℹ️ DEVICE INFO";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub description: String,
    pub resources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub catalogs: Vec<CatalogEntry>,
    pub id_prefixes: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'static str,
    pub name: &'static str,
}

/// Catalog item.
#[derive(Debug, Clone, Serialize)]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub poster: String,
    pub logo: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaBehaviorHints {
    pub is_live: bool,
    pub default_video_id: String,
}

/// Full channel metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub poster: String,
    pub logo: String,
    pub background: String,
    pub description: String,
    pub runtime: &'static str,
    pub behavior_hints: MetaBehaviorHints,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamBehaviorHints {
    pub not_web_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binge_group: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_hints: Option<StreamBehaviorHints>,
}

impl From<StreamDescriptor> for Stream {
    fn from(descriptor: StreamDescriptor) -> Self {
        let (name, behavior_hints) = match descriptor.kind {
            StreamKind::Proxied => (
                None,
                Some(StreamBehaviorHints {
                    not_web_ready: !descriptor.is_direct_playable,
                    binge_group: Some("tv"),
                }),
            ),
            StreamKind::Direct => (
                None,
                Some(StreamBehaviorHints {
                    not_web_ready: !descriptor.is_direct_playable,
                    binge_group: None,
                }),
            ),
            StreamKind::DeviceInfo => (Some(DEVICE_INFO_NAME), None),
        };

        Self {
            name,
            title: descriptor.label,
            url: descriptor.url,
            behavior_hints,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogResponse {
    pub metas: Vec<MetaPreview>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetaResponse {
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StreamResponse {
    pub streams: Vec<Stream>,
}
