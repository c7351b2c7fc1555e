//! Trigger service module.
//!
//! Exposes a liveness check and a token-gated endpoint that runs the feed
//! pipeline once per request, for use by an external scheduler.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
