//! Invite requests service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::mail::MailError;

#[derive(Debug, Error)]
pub enum InvitesServiceError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("invite request already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("failed to send confirmation mail")]
    Mail(#[from] MailError),
}

impl From<Error> for InvitesServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_a_storage_error() {
        let error = InvitesServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, InvitesServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }
}
