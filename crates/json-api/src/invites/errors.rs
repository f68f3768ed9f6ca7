//! Errors

use invites_app::domain::invites::InvitesServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: InvitesServiceError) -> StatusError {
    match error {
        InvitesServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Please enter a valid email address.")
        }
        InvitesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email already registered")
        }
        InvitesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid invite request payload")
        }
        InvitesServiceError::Mail(source) => {
            error!("failed to send confirmation mail: {source}");

            StatusError::bad_gateway().brief("Failed to send confirmation email")
        }
        InvitesServiceError::Sql(source) => {
            error!("invite request storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
