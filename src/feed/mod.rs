//! Spotlight feed module.
//!
//! Turns upstream platform events into an RSS 2.0 document.

pub mod builder;
pub mod enclosure;
pub mod fetcher;
pub mod link;
pub mod mapper;
pub mod title;
pub mod types;
pub mod writer;

pub use enclosure::{classify_enclosure, guess_mime};
pub use fetcher::{decode_payload, FeedFetcher, USER_AGENT};
pub use link::resolve_link;
pub use mapper::{map_record, map_records};
pub use title::{compose_title, event_label};
pub use types::{
    ChannelMeta, Enclosure, FeedDocument, FeedItem, Identifier, UpstreamRecord,
    DEFAULT_IMAGE_MIME, FALLBACK_TITLE, FEED_TTL_MINUTES,
};
pub use writer::write_atomic;
