//! Invite Request Index Handler

use std::{string::ToString, sync::Arc};

use invites_app::domain::invites::InviteRequestRecord;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{extensions::*, invites::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct InviteRequestResponse {
    /// Invite request identifier
    id: i64,

    /// Name given at signup
    full_name: Option<String>,

    /// Signup email address
    email: String,

    /// Where the signup came from
    source: Option<String>,

    /// Invitation status
    status: String,

    /// Internal note
    note: Option<String>,

    /// The date and time the request was created
    created_at: String,

    /// The date and time the request was last updated
    updated_at: String,

    /// The date and time the confirmation mail was sent
    last_email_at: Option<String>,

    /// The date and time the invitation was issued
    invited_at: Option<String>,
}

impl From<InviteRequestRecord> for InviteRequestResponse {
    fn from(record: InviteRequestRecord) -> Self {
        InviteRequestResponse {
            id: record.id,
            full_name: record.full_name,
            email: record.email,
            source: record.source,
            status: record.status,
            note: record.note,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
            last_email_at: record.last_email_at.as_ref().map(ToString::to_string),
            invited_at: record.invited_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InviteRequestsResponse {
    /// Invite requests, newest first
    pub invite_requests: Vec<InviteRequestResponse>,
}

/// Invite Request Index Handler
///
/// Returns every invite request. Requires an `Admin` session token.
#[endpoint(
    tags("invites"),
    summary = "List Invite Requests",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Invite requests"),
        (status_code = 401, description = "Missing, invalid or expired token"),
        (status_code = 403, description = "Token lacks the Admin role"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<InviteRequestsResponse>, StatusError> {
    let claims = depot.session_claims_or_401()?;

    debug!(admin = %claims.sub, "listing invite requests");

    let records = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .invites
        .list_invite_requests()
        .await
        .map_err(into_status_error)?;

    Ok(Json(InviteRequestsResponse {
        invite_requests: records.into_iter().map(Into::into).collect(),
    }))
}
