//! Errors

use invites_app::auth::AuthServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Please enter a valid email address.")
        }
        AuthServiceError::InvalidToken(_) => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::AlreadyExists => StatusError::conflict().brief("Admin already exists"),
        AuthServiceError::Password(source) => {
            error!("password verification failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to issue session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("admin user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
