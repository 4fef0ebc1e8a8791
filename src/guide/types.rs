//! Guide service types.

use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;

/// Guide service response.
///
/// Blocks and entries that do not parse are dropped one by one, so a bad
/// program only costs its own channel the title.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct GuideResponse {
    #[serde(deserialize_with = "skip_invalid")]
    pub channels: Vec<GuideChannel>,
}

/// One per-channel block of the guide service response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GuideChannel {
    pub guide_number: String,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub guide: Vec<GuideEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

/// Array of `T`, keeping the elements that parse. `null` reads as empty.
fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Lenient<T>>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match item {
            Lenient::Valid(value) => Some(value),
            Lenient::Invalid(_) => None,
        })
        .collect())
}

/// One program in a guide block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GuideEntry {
    pub title: String,
    /// Epoch seconds
    pub start_time: i64,
    /// Epoch seconds, exclusive
    pub end_time: i64,
}

/// A scheduled program on one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub title: String,
    pub start_time: i64,
    pub end_time: i64,
    /// Channel this program airs on
    pub guide_number: String,
}

impl Program {
    pub fn from_entry(entry: GuideEntry, guide_number: &str) -> Self {
        Self {
            title: entry.title,
            start_time: entry.start_time,
            end_time: entry.end_time,
            guide_number: guide_number.to_string(),
        }
    }

    /// Whether `now` falls in `[start_time, end_time)`.
    pub fn is_airing_at(&self, now: i64) -> bool {
        self.start_time <= now && now < self.end_time
    }
}
