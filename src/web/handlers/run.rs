//! Run trigger handler.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CronAuth;

/// Successful run response.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Number of items written.
    pub items: usize,
    /// Path of the written artifact.
    pub output: String,
}

/// POST /run - Execute the pipeline once, synchronously.
///
/// Requires the cron token via `?token=` or the `X-CRON-TOKEN` header.
pub async fn trigger_run(
    State(state): State<Arc<AppState>>,
    _auth: CronAuth,
) -> Result<Json<RunResponse>, ApiError> {
    tracing::info!("Run triggered");

    let summary = state.pipeline.run().await?;

    Ok(Json(RunResponse {
        status: "ok",
        items: summary.item_count,
        output: summary.output_path.display().to_string(),
    }))
}
