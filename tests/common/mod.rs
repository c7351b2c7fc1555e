//! Test helpers for integration tests.
//!
//! Provides a mock upstream events API and configuration builders.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use spotlight_feed::Config;

/// Token used by the trigger tests.
pub const TEST_TOKEN: &str = "s3cret";

/// Three events covering a labelled type, an unknown type and a text fallback.
pub const SAMPLE_EVENTS: &str = r#"[
    {
        "displayTitle": "Alpha Quest",
        "type": 6,
        "displayText": "Only one day to go",
        "targetUrl": "/en/projects/alpha-quest",
        "displayImageUrl": "https://cdn.example.com/alpha.png?w=600",
        "createdAt": "2024-03-01T10:00:00Z",
        "platformEventID": 101,
        "projectID": 7
    },
    {
        "displayTitle": "Beta Dungeon",
        "type": 2,
        "targetUrl": "https://gamefound.com/en/projects/beta",
        "createdAt": "2024-03-02T08:30:00+02:00",
        "projectID": 8
    },
    {
        "displayText": "Something happened",
        "createdAt": "2024-03-03"
    }
]"#;

#[derive(Clone)]
struct UpstreamState {
    hits: Arc<AtomicUsize>,
    response: Arc<Mutex<(StatusCode, String)>>,
}

/// Mock of the upstream events API, counting requests.
pub struct MockUpstream {
    /// Full URL of the events endpoint.
    pub url: String,
    hits: Arc<AtomicUsize>,
    response: Arc<Mutex<(StatusCode, String)>>,
}

impl MockUpstream {
    /// Start the mock on an ephemeral port, answering 200 with `body`.
    pub async fn start(body: &str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = Arc::new(Mutex::new((StatusCode::OK, body.to_string())));

        let state = UpstreamState {
            hits: hits.clone(),
            response: response.clone(),
        };
        let router = Router::new()
            .route("/api/events", get(serve_events))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock upstream should bind");
        let addr = listener.local_addr().expect("local addr should exist");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock upstream should run");
        });

        Self {
            url: format!("http://{addr}/api/events"),
            hits,
            response,
        }
    }

    /// Replace the canned response.
    pub fn respond_with(&self, status: StatusCode, body: &str) {
        let mut response = self.response.lock().expect("response lock");
        *response = (status, body.to_string());
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn serve_events(State(state): State<UpstreamState>) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.response.lock().expect("response lock").clone()
}

/// Create a test configuration pointing at `api_url` and writing to `out`.
pub fn create_test_config(api_url: &str, out: &Path) -> Config {
    let mut config = Config::default();
    config.upstream.api_url = api_url.to_string();
    config.upstream.timeout_secs = 5;
    config.output.path = out.display().to_string();
    config.feed.title = "Test Spotlight".to_string();
    config.feed.link = "https://example.com/spotlight".to_string();
    config.feed.description = "Spotlight under test".to_string();
    config.web.host = "127.0.0.1".to_string();
    config.web.port = 0;
    config.web.cron_token = TEST_TOKEN.to_string();
    config
}
