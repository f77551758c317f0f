use thiserror::Error;

use crate::database::DatabaseError;

/// Outcomes of token, credential and ownership checks.
///
/// `InvalidCredentials` deliberately covers bad signatures, malformed tokens,
/// unknown subjects and wrong passwords alike. Only expiry is distinguishable.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    InvalidCredentials,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Not enough permission")]
    Forbidden,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}
