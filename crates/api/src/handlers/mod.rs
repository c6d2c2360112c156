//! HTTP handlers, grouped by domain area.
//!
//! Every handler returns `AppResult<Json<serde_json::Value>>` with the
//! payload under a `"data"` key; errors flow through [`AppError`] into the
//! shared `{"error", "code"}` envelope.
//!
//! [`AppError`]: crate::error::AppError

pub mod members;
pub mod moderation;
pub mod notifications;
pub mod time_bank;

use validator::Validate;

use crate::error::AppError;

/// Run `validator` checks on a deserialized request body, mapping failures
/// to a 400 with the field errors flattened into the message.
pub(crate) fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
