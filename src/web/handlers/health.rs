//! Liveness handler.

/// GET / - Liveness marker. No auth, no side effects.
pub async fn health_check() -> &'static str {
    "OK"
}
