//! RSS 2.0 document assembly and rendering.

use chrono::{DateTime, Utc};
use rss::{Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, Item, ItemBuilder};

use super::types::{ChannelMeta, FeedDocument, FeedItem, FEED_TTL_MINUTES};
use crate::datetime::to_rss_date;
use crate::{FeedError, Result};

/// Enclosure size written when the real length is unknown.
const UNKNOWN_LENGTH: &str = "0";

/// Indent width of the rendered document.
const INDENT_SIZE: usize = 2;

impl FeedDocument {
    /// Assemble a document stamped with the current time.
    pub fn build(channel: &ChannelMeta, items: Vec<FeedItem>) -> Self {
        Self::build_at(channel, items, Utc::now())
    }

    /// Assemble a document with an explicit build time.
    pub fn build_at(channel: &ChannelMeta, items: Vec<FeedItem>, built_at: DateTime<Utc>) -> Self {
        Self {
            title: channel.title.clone(),
            link: channel.link.clone(),
            description: channel.description.clone(),
            last_build_date: built_at,
            ttl: FEED_TTL_MINUTES,
            items,
        }
    }

    /// Convert to an `rss` channel.
    pub fn to_channel(&self) -> Channel {
        let items: Vec<Item> = self.items.iter().map(to_rss_item).collect();

        ChannelBuilder::default()
            .title(self.title.clone())
            .link(self.link.clone())
            .description(self.description.clone())
            .last_build_date(Some(to_rss_date(&self.last_build_date)))
            .ttl(Some(self.ttl.to_string()))
            .items(items)
            .build()
    }

    /// Render as indented, UTF-8 RSS 2.0 XML with an XML declaration.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        self.to_channel()
            .pretty_write_to(Vec::new(), b' ', INDENT_SIZE)
            .map_err(|e| FeedError::Render(e.to_string()))
    }
}

fn to_rss_item(item: &FeedItem) -> Item {
    let guid = GuidBuilder::default()
        .value(item.guid.clone())
        .permalink(false)
        .build();

    let enclosure = item.enclosure.as_ref().map(|enclosure| {
        EnclosureBuilder::default()
            .url(enclosure.url.clone())
            .length(UNKNOWN_LENGTH)
            .mime_type(enclosure.mime_type.clone())
            .build()
    });

    ItemBuilder::default()
        .title(Some(item.title.clone()))
        .link(Some(item.link.clone()))
        .guid(Some(guid))
        .pub_date(Some(to_rss_date(&item.publication_date)))
        .description(Some(item.description.clone()))
        .enclosure(enclosure)
        .build()
}
