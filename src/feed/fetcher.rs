//! Upstream events fetcher.
//!
//! Performs a single bounded GET against the events API and decodes the body
//! into [`UpstreamRecord`]s. There is no retry: the external scheduler
//! re-triggers periodically.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::{FeedError, Result};
use crate::feed::types::UpstreamRecord;

/// User agent string sent to the upstream API.
pub const USER_AGENT: &str = "rss-maker/1.0";

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Upstream API fetcher.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
    max_payload_bytes: u64,
}

impl FeedFetcher {
    /// Create a new fetcher from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_payload_bytes: config.max_payload_bytes,
        })
    }

    /// Fetch and decode the event list from `url`.
    pub async fn fetch(&self, url: &str) -> Result<Vec<UpstreamRecord>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::FetchFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FeedError::FetchFailed(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_payload_bytes {
                return Err(FeedError::FetchFailed(format!(
                    "payload too large: {} bytes (max {} bytes)",
                    content_length, self.max_payload_bytes
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedError::FetchFailed(format!("failed to read response: {}", e)))?;

        if bytes.len() as u64 > self.max_payload_bytes {
            return Err(FeedError::FetchFailed(format!(
                "payload too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_payload_bytes
            )));
        }

        let records = decode_payload(&bytes)?;
        tracing::debug!(url, count = records.len(), "Fetched upstream records");
        Ok(records)
    }
}

/// Decode a response body into records.
///
/// Invalid JSON is a fetch failure; valid JSON that is not a list of record
/// objects is a payload-shape failure.
pub fn decode_payload(bytes: &[u8]) -> Result<Vec<UpstreamRecord>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| FeedError::FetchFailed(format!("malformed JSON body: {}", e)))?;

    let Value::Array(elements) = value else {
        return Err(FeedError::UnexpectedPayloadShape(format!(
            "expected list, got {}",
            json_kind(&value)
        )));
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            if !element.is_object() {
                return Err(FeedError::UnexpectedPayloadShape(format!(
                    "record {} is {}, expected object",
                    index,
                    json_kind(&element)
                )));
            }
            serde_json::from_value(element).map_err(|e| {
                FeedError::UnexpectedPayloadShape(format!("record {}: {}", index, e))
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
