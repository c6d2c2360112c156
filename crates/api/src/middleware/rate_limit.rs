//! Per-caller rate limiting over the injected [`RateLimiter`].
//!
//! The key is the bearer token when present, falling back to
//! `x-forwarded-for`, then a shared bucket for anonymous callers.
//!
//! [`RateLimiter`]: timebank_core::rate_limit::RateLimiter

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

fn caller_key(request: &Request) -> &str {
    let headers = request.headers();
    headers
        .get("authorization")
        .or_else(|| headers.get("x-forwarded-for"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous")
}

pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = caller_key(&request);
    if !state.public_limiter.check(key) {
        tracing::warn!(key, "rate limit exceeded");
        return AppError::RateLimited.into_response();
    }
    next.run(request).await
}
