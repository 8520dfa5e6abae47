//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::AuthServiceError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("email is already registered")]
    EmailTaken,

    /// Unknown email and wrong password collapse into this one variant so the
    /// response cannot be used to probe which addresses are registered.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password hashing failed")]
    Password(#[source] argon2::password_hash::Error),

    #[error("token issuance failed")]
    Token(#[source] AuthServiceError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::EmailTaken,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
