//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use timebank_core::error::CoreError;
use timebank_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal extracted from a Bearer token in the
/// `Authorization` header via the configured [`AuthProvider`].
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user_id, role = %auth.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// [`AuthProvider`]: crate::auth::AuthProvider
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's account id.
    pub user_id: DbId,
    /// The caller's role name (`member`, `moderator`, `admin`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let principal = state.auth.resolve_token(token).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or revoked token".into()))
        })?;

        Ok(AuthUser {
            user_id: principal.user_id,
            role: principal.role,
        })
    }
}
