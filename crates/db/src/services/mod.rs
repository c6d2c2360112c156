//! Transactional service layer.
//!
//! Each public operation opens one transaction, performs all of its reads and
//! writes through it, and commits; any error rolls the whole operation back.
//! There is no partial success and no internal retry.

pub mod members;
pub mod moderation;
pub mod outbox;
pub mod time_bank;

use timebank_core::error::CoreError;

/// Error surface of the service layer: a domain error or a storage error.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;
