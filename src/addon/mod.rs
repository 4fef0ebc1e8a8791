//! Addon module
//!
//! The catalog/meta/stream surface a playback client consumes:
//! - manifest describing the addon
//! - catalog of lineup channels
//! - per-channel metadata with the program on air
//! - stream listings from the stream composer
//! - channel art URLs

pub mod assets;
pub mod service;
pub mod types;

pub use service::Addon;

use types::{CatalogEntry, Manifest};

pub const ADDON_ID: &str = "org.titleos.hdhomerun";
pub const CATALOG_ID: &str = "hdhr_ota";

/// Prefix of every channel id handed to clients.
pub const ID_PREFIX: &str = "hdhr_";

/// Content types this addon answers for.
pub fn is_supported_type(kind: &str) -> bool {
    kind == "tv" || kind == "channel"
}

/// `5.1` -> `hdhr_5.1`
pub fn channel_id(guide_number: &str) -> String {
    format!("{}{}", ID_PREFIX, guide_number)
}

/// `hdhr_5.1` -> `5.1`
pub fn parse_channel_id(id: &str) -> Option<&str> {
    id.strip_prefix(ID_PREFIX).filter(|n| !n.is_empty())
}

pub fn manifest(tuner_address: &str) -> Manifest {
    Manifest {
        id: ADDON_ID,
        version: env!("CARGO_PKG_VERSION"),
        name: "HDHomerun Live",
        description: format!("OTA via {}", tuner_address),
        resources: vec!["catalog", "meta", "stream"],
        types: vec!["channel", "tv"],
        catalogs: vec![CatalogEntry {
            kind: "channel",
            id: CATALOG_ID,
            name: "HDHomerun",
        }],
        id_prefixes: vec![ID_PREFIX],
    }
}
