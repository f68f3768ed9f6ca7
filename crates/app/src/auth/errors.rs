//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{PasswordError, SessionTokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid session token")]
    InvalidToken(#[source] SessionTokenError),

    #[error("admin user already exists")]
    AlreadyExists,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("password hashing error")]
    Password(#[from] PasswordError),

    #[error("failed to issue session token")]
    Token(#[source] SessionTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            _ => Self::Sql(error),
        }
    }
}
