//! Error types for spotlight-feed.

use thiserror::Error;

/// Common error type for a feed run.
///
/// Every variant is fatal to the run it occurs in. Callers recover only at the
/// outermost boundary (the trigger handler or the `run` command).
#[derive(Error, Debug)]
pub enum FeedError {
    /// Upstream unreachable, non-2xx response, oversize body, or malformed JSON.
    #[error("failed to fetch API: {0}")]
    FetchFailed(String),

    /// Decoded JSON is not a list of records.
    #[error("unexpected API payload: {0}")]
    UnexpectedPayloadShape(String),

    /// A record's `createdAt` could not be parsed.
    #[error("malformed timestamp {value:?}: {reason}")]
    MalformedTimestamp { value: String, reason: String },

    /// I/O error, usually while writing the artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The RSS document could not be rendered.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// Process exit status reported for this error.
    ///
    /// Fetch and payload-shape failures keep the codes operators already
    /// alert on (1 and 2).
    pub fn exit_code(&self) -> i32 {
        match self {
            FeedError::FetchFailed(_) => 1,
            FeedError::UnexpectedPayloadShape(_) => 2,
            FeedError::MalformedTimestamp { .. } => 3,
            FeedError::Io(_) => 4,
            FeedError::Render(_) => 5,
            FeedError::Config(_) => 6,
        }
    }

    /// Stable machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::FetchFailed(_) => "FETCH_FAILED",
            FeedError::UnexpectedPayloadShape(_) => "UNEXPECTED_PAYLOAD_SHAPE",
            FeedError::MalformedTimestamp { .. } => "MALFORMED_TIMESTAMP",
            FeedError::Io(_) => "IO_ERROR",
            FeedError::Render(_) => "RENDER_FAILED",
            FeedError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
