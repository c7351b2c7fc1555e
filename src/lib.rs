//! spotlight-feed
//!
//! Converts the Gamefound spotlight events API into an RSS 2.0 feed, either
//! once from the command line or on demand through a token-gated HTTP trigger.

pub mod config;
pub mod datetime;
pub mod error;
pub mod feed;
pub mod logging;
pub mod pipeline;
pub mod web;

pub use config::Config;
pub use error::{FeedError, Result};
pub use feed::{FeedDocument, FeedItem, UpstreamRecord};
pub use pipeline::{FeedPipeline, RunSummary};
pub use web::WebServer;
