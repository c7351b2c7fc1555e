//! Web server for the run trigger.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::pipeline::FeedPipeline;
use crate::{FeedError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Trigger web server.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Whether `/feed.xml` is served.
    serve_feed: bool,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Fails when the configuration is invalid or no cron token is set.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate_for_serve()?;

        let addr = format!("{}:{}", config.web.host, config.web.port)
            .parse()
            .map_err(|e| FeedError::Config(format!("invalid web server address: {e}")))?;

        let pipeline = FeedPipeline::from_config(config)?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(pipeline, config.web.cron_token.clone())),
            serve_feed: config.web.serve_feed,
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = create_router(self.app_state, self.serve_feed);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = create_router(self.app_state, self.serve_feed);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
