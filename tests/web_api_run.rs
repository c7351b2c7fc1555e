//! Web API Run Tests
//!
//! Integration tests for the health and token-gated run endpoints.

mod common;

use std::path::Path;
use std::sync::Arc;

use axum::http::{HeaderName, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use spotlight_feed::web::handlers::AppState;
use spotlight_feed::web::router::create_router;
use spotlight_feed::FeedPipeline;

use common::{create_test_config, MockUpstream, SAMPLE_EVENTS, TEST_TOKEN};

const CRON_HEADER: HeaderName = HeaderName::from_static("x-cron-token");

/// Create a test server backed by `upstream`, writing to `out`.
fn create_test_server(upstream: &MockUpstream, out: &Path) -> TestServer {
    let config = create_test_config(&upstream.url, out);
    let pipeline = FeedPipeline::from_config(&config).expect("pipeline should build");
    let app_state = Arc::new(AppState::new(pipeline, config.web.cron_token.clone()));

    let router = create_router(app_state, config.web.serve_feed);
    TestServer::new(router).expect("Failed to create test server")
}

#[tokio::test]
async fn test_health_check() {
    let upstream = MockUpstream::start(SAMPLE_EVENTS).await;
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&upstream, &dir.path().join("feed.xml"));

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("OK");

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");

    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_run_without_token_is_forbidden() {
    let upstream = MockUpstream::start(SAMPLE_EVENTS).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("feed.xml");
    let server = create_test_server(&upstream, &out);

    let response = server.post("/run").await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "forbidden");
    assert_eq!(upstream.hits(), 0);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_run_with_wrong_token_is_forbidden() {
    let upstream = MockUpstream::start(SAMPLE_EVENTS).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("feed.xml");
    let server = create_test_server(&upstream, &out);

    let response = server
        .post("/run")
        .add_query_param("token", "wrong")
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post("/run")
        .add_header(CRON_HEADER, "wrong".to_string())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    assert_eq!(upstream.hits(), 0);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_run_with_query_token() {
    let upstream = MockUpstream::start(SAMPLE_EVENTS).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dist").join("feed.xml");
    let server = create_test_server(&upstream, &out);

    let response = server
        .post("/run")
        .add_query_param("token", TEST_TOKEN)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["items"], 3);
    assert_eq!(upstream.hits(), 1);

    let xml = std::fs::read(&out).expect("artifact should exist");
    let channel = rss::Channel::read_from(&xml[..]).expect("artifact should parse");
    assert_eq!(channel.title(), "Test Spotlight");
    assert_eq!(channel.link(), "https://example.com/spotlight");
    assert_eq!(channel.items().len(), 3);
}

#[tokio::test]
async fn test_run_with_header_token() {
    let upstream = MockUpstream::start(SAMPLE_EVENTS).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("feed.xml");
    let server = create_test_server(&upstream, &out);

    let response = server
        .post("/run")
        .add_header(CRON_HEADER, TEST_TOKEN.to_string())
        .await;

    response.assert_status_ok();
    assert_eq!(upstream.hits(), 1);
    assert!(out.exists());
}

#[tokio::test]
async fn test_run_non_list_payload_keeps_artifact() {
    let upstream = MockUpstream::start(r#"{"events": []}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("feed.xml");
    std::fs::write(&out, "previous feed").unwrap();
    let server = create_test_server(&upstream, &out);

    let response = server
        .post("/run")
        .add_query_param("token", TEST_TOKEN)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "script failed");
    assert_eq!(body["code"], 2);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous feed");
}

#[tokio::test]
async fn test_run_malformed_timestamp() {
    let upstream =
        MockUpstream::start(r#"[{"displayTitle": "Broken", "createdAt": "yesterday"}]"#).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("feed.xml");
    let server = create_test_server(&upstream, &out);

    let response = server
        .post("/run")
        .add_query_param("token", TEST_TOKEN)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], 3);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_run_upstream_failure() {
    let upstream = MockUpstream::start(SAMPLE_EVENTS).await;
    upstream.respond_with(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("feed.xml");
    let server = create_test_server(&upstream, &out);

    let response = server
        .post("/run")
        .add_query_param("token", TEST_TOKEN)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "script failed");
    assert_eq!(body["code"], 1);
    assert_eq!(upstream.hits(), 1);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_feed_served_after_run() {
    let upstream = MockUpstream::start(SAMPLE_EVENTS).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("feed.xml");
    let server = create_test_server(&upstream, &out);

    server.get("/feed.xml").await.assert_status_not_found();

    server
        .post("/run")
        .add_query_param("token", TEST_TOKEN)
        .await
        .assert_status_ok();

    let response = server.get("/feed.xml").await;
    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert_eq!(content_type.to_str().unwrap(), "application/rss+xml");
    assert_eq!(response.as_bytes().as_ref(), std::fs::read(&out).unwrap());
}

#[tokio::test]
async fn test_repeated_runs_replace_artifact() {
    let upstream = MockUpstream::start(SAMPLE_EVENTS).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("feed.xml");
    let server = create_test_server(&upstream, &out);

    for _ in 0..2 {
        server
            .post("/run")
            .add_query_param("token", TEST_TOKEN)
            .await
            .assert_status_ok();
    }

    assert_eq!(upstream.hits(), 2);
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("feed.xml")]);
}
