//! Cron token authentication.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Header carrying the cron token.
pub const CRON_TOKEN_HEADER: &str = "x-cron-token";

/// Query parameter carrying the cron token.
pub const CRON_TOKEN_PARAM: &str = "token";

/// Proof that the request presented the configured cron token.
///
/// Put this extractor in a handler's arguments to gate it: the handler body
/// never runs when the token is missing or wrong.
#[derive(Debug, Clone, Copy)]
pub struct CronAuth;

impl FromRequestParts<Arc<AppState>> for CronAuth {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let presented = presented_token(parts);

            match presented {
                Some(token) if token_matches(&token, &state.cron_token) => Ok(CronAuth),
                Some(_) => {
                    tracing::warn!("Rejected run trigger: wrong token");
                    Err(ApiError::forbidden())
                }
                None => {
                    tracing::warn!("Rejected run trigger: missing token");
                    Err(ApiError::forbidden())
                }
            }
        })
    }
}

/// Token from the query string, falling back to the header.
///
/// The query value is form-decoded: `+` is a space and `%2B` a literal plus.
fn presented_token(parts: &Parts) -> Option<String> {
    let from_query = parts.uri.query().and_then(|query| {
        query.split('&').find_map(|pair| {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next()?;
            let value = kv.next()?;
            if key == CRON_TOKEN_PARAM {
                urlencoding::decode(&value.replace('+', " "))
                    .ok()
                    .map(|s| s.into_owned())
            } else {
                None
            }
        })
    });

    from_query.filter(|t| !t.is_empty()).or_else(|| {
        parts
            .headers
            .get(CRON_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
    })
}

/// Compare without short-circuiting on the first differing byte.
fn token_matches(presented: &str, expected: &str) -> bool {
    if expected.is_empty() || presented.len() != expected.len() {
        return false;
    }
    presented
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
