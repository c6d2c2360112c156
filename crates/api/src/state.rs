use std::sync::Arc;

use timebank_core::rate_limit::RateLimiter;

use crate::auth::AuthProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: timebank_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bearer-token principal resolution (the external auth seam).
    pub auth: Arc<dyn AuthProvider>,
    /// Rate limiter for the public surface. Injected so tests own and reset
    /// their own instance.
    pub public_limiter: Arc<RateLimiter>,
}
