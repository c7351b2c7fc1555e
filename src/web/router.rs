//! Router configuration for the trigger service.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use super::handlers::{health_check, trigger_run, AppState};

/// Content type of the served artifact.
const RSS_MIME: &str = "application/rss+xml";

/// Create the main router.
///
/// `serve_feed` adds `GET /feed.xml` returning the current artifact.
pub fn create_router(app_state: Arc<AppState>, serve_feed: bool) -> Router {
    let mut router = Router::new()
        .route("/run", post(trigger_run))
        .merge(create_health_router());

    if serve_feed {
        let path = app_state.pipeline.output_path().to_path_buf();
        let service = match RSS_MIME.parse::<mime_guess::mime::Mime>() {
            Ok(mime) => ServeFile::new_with_mime(path, &mime),
            Err(_) => ServeFile::new(path),
        };
        router = router.route_service("/feed.xml", service);
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
}
