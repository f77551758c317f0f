use async_trait::async_trait;
use thiserror::Error;

use super::models::UserRecord;

/// Errors from user store backends
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Read access to identity records. Stores hold credential digests, never plaintext.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by the identifier carried in token subjects (the e-mail address).
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserRecord>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
