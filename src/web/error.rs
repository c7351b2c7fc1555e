//! API error handling for the trigger service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::FeedError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or wrong cron token (403).
    Forbidden,
    /// The pipeline ran and failed (500).
    PipelineFailed,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::PipelineFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Short error marker.
    pub error: &'static str,
    /// Failure class of the pipeline error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    /// Exit status the `run` command would have returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    /// Human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    kind: Option<&'static str>,
    exit_code: Option<i32>,
    message: Option<String>,
}

impl ApiError {
    /// Create a forbidden error.
    pub fn forbidden() -> Self {
        Self {
            code: ErrorCode::Forbidden,
            kind: None,
            exit_code: None,
            message: None,
        }
    }

    /// Wrap a pipeline failure.
    pub fn pipeline_failed(err: &FeedError) -> Self {
        Self {
            code: ErrorCode::PipelineFailed,
            kind: Some(err.kind()),
            exit_code: Some(err.exit_code()),
            message: Some(err.to_string()),
        }
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let error = match self.code {
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::PipelineFailed => "script failed",
        };
        let body = ErrorBody {
            error,
            kind: self.kind,
            code: self.exit_code,
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{:?}: {}", self.code, message),
            None => write!(f, "{:?}", self.code),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        tracing::error!(kind = err.kind(), "Feed run failed: {}", err);
        ApiError::pipeline_failed(&err)
    }
}
