//! Mapping of upstream records to feed items.

use url::Url;

use super::enclosure::classify_enclosure;
use super::link::resolve_link;
use super::title::compose_title;
use super::types::{FeedItem, UpstreamRecord};
use crate::datetime::normalize_timestamp;
use crate::{FeedError, Result};

/// Map one upstream record to a feed item.
///
/// Fails only when `createdAt` is missing or cannot be parsed.
pub fn map_record(record: &UpstreamRecord, base: &Url) -> Result<FeedItem> {
    let title = compose_title(
        record.display_title.as_deref(),
        record.event_type,
        record.display_text.as_deref(),
    );

    let link = resolve_link(base, record.target_url.as_deref());

    let guid = record
        .platform_event_id
        .iter()
        .chain(record.project_id.iter())
        .find(|id| id.is_present())
        .map(|id| id.to_string())
        .unwrap_or_else(|| link.clone());

    let created_at = record
        .created_at
        .as_deref()
        .ok_or_else(|| FeedError::MalformedTimestamp {
            value: String::new(),
            reason: "createdAt is missing".to_string(),
        })?;
    let publication_date = normalize_timestamp(created_at)?;

    let description = record.display_text.clone().unwrap_or_default();
    let enclosure = classify_enclosure(record.display_image_url.as_deref());

    Ok(FeedItem {
        title,
        link,
        guid,
        publication_date,
        description,
        enclosure,
    })
}

/// Map every record, preserving order.
///
/// All-or-nothing: the first record that fails aborts the whole mapping.
pub fn map_records(records: &[UpstreamRecord], base: &Url) -> Result<Vec<FeedItem>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            map_record(record, base).inspect_err(|e| {
                tracing::error!(index, error = %e, "Failed to map upstream record");
            })
        })
        .collect()
}
