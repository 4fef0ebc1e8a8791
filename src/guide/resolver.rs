//! Now-playing resolution against the remote guide service.

use std::sync::Arc;

use crate::error::{BridgeError, Result};
use crate::tuner::TunerGateway;

use super::types::{GuideChannel, GuideResponse, Program};

/// Pick the program airing at `now`.
///
/// Guide order is authoritative: if malformed data has overlapping
/// intervals, the first one containing `now` wins. The slice is not assumed
/// to be sorted.
pub fn select_current(programs: &[Program], now: i64) -> Option<&Program> {
    programs.iter().find(|p| p.is_airing_at(now))
}

/// Resolves the program currently airing on a channel.
#[derive(Clone)]
pub struct ProgramResolver {
    inner: Arc<ProgramResolverInner>,
}

struct ProgramResolverInner {
    gateway: TunerGateway,
}

impl ProgramResolver {
    pub fn new(gateway: TunerGateway) -> Self {
        Self {
            inner: Arc::new(ProgramResolverInner { gateway }),
        }
    }

    /// Fetch the guide for every channel the device is authorized for.
    ///
    /// Malformed blocks and programs are skipped; only a body that is not a
    /// guide array at all fails the whole call.
    pub async fn guide(&self, device_auth: &str) -> Result<Vec<GuideChannel>> {
        let config = self.inner.gateway.config();
        self.inner
            .gateway
            .http_client()
            .get(&config.guide_url)
            .query(&[("DeviceAuth", device_auth)])
            .timeout(config.guide_timeout())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(BridgeError::from_guide)?
            .json::<GuideResponse>()
            .await
            .map(|response| response.channels)
            .map_err(BridgeError::from_guide)
    }

    /// Scheduled programs for one channel, in guide order.
    pub async fn schedule(&self, guide_number: &str) -> Result<Vec<Program>> {
        let device = self.inner.gateway.discover().await?;
        let guide = self.guide(&device.device_auth).await?;

        let block = guide
            .into_iter()
            .find(|c| c.guide_number == guide_number)
            .ok_or_else(|| BridgeError::NotFound(guide_number.to_string()))?;

        Ok(block
            .guide
            .into_iter()
            .map(|entry| Program::from_entry(entry, guide_number))
            .collect())
    }

    /// Resolve the program airing at `now`, keeping the failure reason.
    ///
    /// `Ok(None)` means the channel has guide data but nothing covers `now`.
    pub async fn lookup(&self, guide_number: &str, now: i64) -> Result<Option<Program>> {
        let schedule = self.schedule(guide_number).await?;
        Ok(select_current(&schedule, now).cloned())
    }

    /// Program airing at `now`; every failure collapses to `None`.
    pub async fn current_program_at(&self, guide_number: &str, now: i64) -> Option<Program> {
        match self.lookup(guide_number, now).await {
            Ok(Some(program)) => {
                tracing::debug!("[EPG] Ch {} is playing: {}", guide_number, program.title);
                Some(program)
            }
            Ok(None) => {
                tracing::debug!("[EPG] Nothing scheduled on Ch {} at {}", guide_number, now);
                None
            }
            Err(BridgeError::NotFound(_)) => {
                tracing::debug!("[EPG] No guide data found for Ch {}", guide_number);
                None
            }
            Err(e) => {
                tracing::debug!("[EPG] Ch {}: {}", guide_number, e);
                None
            }
        }
    }

    /// Program airing right now on `guide_number`.
    ///
    /// The clock is read once, at call start.
    pub async fn current_program(&self, guide_number: &str) -> Option<Program> {
        let now = chrono::Utc::now().timestamp();
        self.current_program_at(guide_number, now).await
    }
}
