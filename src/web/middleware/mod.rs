//! Middleware for the trigger service.

pub mod auth;

pub use auth::{CronAuth, CRON_TOKEN_HEADER, CRON_TOKEN_PARAM};
