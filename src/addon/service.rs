//! Catalog, meta and stream resolution for the addon routes.
//!
//! Upstream failures never reach the client: the catalog degrades to empty,
//! names to `Channel <n>` and titles to the channel name.

use crate::guide::ProgramResolver;
use crate::stream::StreamComposer;
use crate::tuner::TunerGateway;

use super::assets::asset_url;
use super::types::{
    CatalogResponse, Meta, MetaBehaviorHints, MetaPreview, MetaResponse, Stream, StreamResponse,
};
use super::{channel_id, is_supported_type, parse_channel_id};

#[derive(Clone)]
pub struct Addon {
    gateway: TunerGateway,
    resolver: ProgramResolver,
    composer: StreamComposer,
    external_base: String,
}

impl Addon {
    pub fn new(
        gateway: TunerGateway,
        resolver: ProgramResolver,
        composer: StreamComposer,
        external_base: &str,
    ) -> Self {
        Self {
            gateway,
            resolver,
            composer,
            external_base: external_base.to_string(),
        }
    }

    /// All lineup channels as catalog items.
    pub async fn catalog(&self, kind: &str) -> CatalogResponse {
        if !is_supported_type(kind) {
            return CatalogResponse::default();
        }

        let channels = match self.gateway.lineup().await {
            Ok(channels) => channels,
            Err(e) => {
                tracing::warn!("Catalog unavailable: {}", e);
                return CatalogResponse::default();
            }
        };

        let metas = channels
            .into_iter()
            .map(|c| {
                let art = asset_url(&self.external_base, &c.guide_name);
                MetaPreview {
                    id: channel_id(&c.guide_number),
                    kind: kind.to_string(),
                    name: c.guide_name,
                    poster: art.clone(),
                    logo: art,
                    description: format!("Channel {}", c.guide_number),
                }
            })
            .collect();

        CatalogResponse { metas }
    }

    /// Metadata for one channel, described by the program on air.
    pub async fn meta(&self, kind: &str, id: &str) -> MetaResponse {
        let guide_number = match parse_channel_id(id) {
            Some(n) if is_supported_type(kind) => n,
            _ => return MetaResponse::default(),
        };

        let (channel, program) = tokio::join!(
            self.gateway.channel(guide_number),
            self.resolver.current_program(guide_number)
        );

        let name = match channel {
            Ok(channel) => channel.guide_name,
            Err(e) => {
                tracing::debug!("No lineup name for Ch {}: {}", guide_number, e);
                format!("Channel {}", guide_number)
            }
        };
        let description = match program {
            Some(program) => format!("Live on {}", program.title),
            None => format!("Live on {}", name),
        };
        let art = asset_url(&self.external_base, &name);

        MetaResponse {
            meta: Some(Meta {
                id: id.to_string(),
                kind: kind.to_string(),
                name,
                poster: art.clone(),
                logo: art.clone(),
                background: art,
                description,
                runtime: "LIVE",
                behavior_hints: MetaBehaviorHints {
                    is_live: true,
                    default_video_id: id.to_string(),
                },
            }),
        }
    }

    /// Stream listing for one channel.
    pub async fn streams(&self, kind: &str, id: &str) -> StreamResponse {
        let guide_number = match parse_channel_id(id) {
            Some(n) if is_supported_type(kind) => n,
            _ => return StreamResponse::default(),
        };

        let streams = self
            .composer
            .build_streams(guide_number)
            .await
            .into_iter()
            .map(Stream::from)
            .collect();

        StreamResponse { streams }
    }
}
