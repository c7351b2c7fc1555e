//! Data types for the spotlight feed pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Refresh hint written to the channel `ttl`, in minutes.
pub const FEED_TTL_MINUTES: u32 = 15;

/// Title used when a record carries no usable text at all.
pub const FALLBACK_TITLE: &str = "Update";

/// MIME type assumed for images whose extension is not recognized.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Identifier as sent by the upstream API: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(serde_json::Number),
    Text(String),
}

impl Identifier {
    /// Whether the identifier is usable: non-zero numbers and non-empty strings.
    pub fn is_present(&self) -> bool {
        match self {
            Identifier::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
            Identifier::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{n}"),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

/// One platform event as returned by the upstream API.
///
/// Unknown keys are ignored and `null` is the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRecord {
    #[serde(default)]
    pub display_title: Option<String>,
    /// Event-type code. Anything that is not an integral number reads as absent.
    #[serde(default, rename = "type", deserialize_with = "lenient_code")]
    pub event_type: Option<i64>,
    #[serde(default)]
    pub display_text: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub display_image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, rename = "platformEventID")]
    pub platform_event_id: Option<Identifier>,
    #[serde(default, rename = "projectID")]
    pub project_id: Option<Identifier>,
}

fn lenient_code<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_i64().or_else(|| {
            v.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }))
}

/// Media attached to an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: String,
}

/// A single RSS item derived from an [`UpstreamRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    /// Never empty.
    pub title: String,
    /// Absolute URL.
    pub link: String,
    /// Opaque identity; written with `isPermaLink="false"`.
    pub guid: String,
    pub publication_date: DateTime<Utc>,
    /// Display text verbatim, empty when the record has none.
    pub description: String,
    pub enclosure: Option<Enclosure>,
}

/// Channel-level metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMeta {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// A complete feed, built once per run and serialized immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub description: String,
    pub last_build_date: DateTime<Utc>,
    pub ttl: u32,
    /// Same order as the upstream payload.
    pub items: Vec<FeedItem>,
}
