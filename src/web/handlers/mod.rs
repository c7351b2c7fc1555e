//! Handlers for the trigger service.

pub mod health;
pub mod run;

pub use health::health_check;
pub use run::{trigger_run, RunResponse};

use crate::pipeline::FeedPipeline;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Pipeline executed by the run trigger.
    pub pipeline: FeedPipeline,
    /// Secret the scheduler must present.
    pub cron_token: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(pipeline: FeedPipeline, cron_token: impl Into<String>) -> Self {
        Self {
            pipeline,
            cron_token: cron_token.into(),
        }
    }
}
