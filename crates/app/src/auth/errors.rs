//! Auth service errors.

use thiserror::Error;

use crate::auth::token::AccessTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Covers every verification failure (bad format, bad signature, expired)
    /// so callers cannot distinguish why a token was rejected.
    #[error("access token rejected")]
    Invalid,

    #[error("token expiry out of range")]
    ExpiryOutOfRange,

    #[error("token processing error")]
    Token(#[source] AccessTokenError),
}
