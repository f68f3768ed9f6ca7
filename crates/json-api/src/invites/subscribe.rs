//! Subscribe Handler

use std::sync::Arc;

use invites_app::domain::invites::{NewSubscription, SubscribeOutcome};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    extensions::*,
    invites::errors::into_status_error,
    observability::{SubscriptionResult, record_subscription},
    state::State,
};

/// Message returned when the email is already on the list.
pub(crate) const ALREADY_REGISTERED_MESSAGE: &str = "Email already registered";

/// Message returned for a fresh signup.
pub(crate) const SUBSCRIBED_MESSAGE: &str =
    "Thank you! Your invitation request has been received.";

/// Subscribe Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscribeRequest {
    /// Email address to add to the invitation list
    pub email: String,

    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
}

impl From<SubscribeRequest> for NewSubscription {
    fn from(request: SubscribeRequest) -> Self {
        NewSubscription {
            email: request.email,
            name: request.name,
        }
    }
}

/// Subscribe Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscribeResponse {
    /// Set when a confirmation mail was sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,

    /// Message id of the confirmation mail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_id: Option<String>,

    /// Human readable outcome
    pub message: String,
}

impl From<SubscribeOutcome> for SubscribeResponse {
    fn from(outcome: SubscribeOutcome) -> Self {
        match outcome {
            SubscribeOutcome::Subscribed { mail_id, .. } => SubscribeResponse {
                ok: Some(true),
                mail_id: Some(mail_id),
                message: SUBSCRIBED_MESSAGE.to_string(),
            },
            SubscribeOutcome::AlreadyRegistered => SubscribeResponse {
                ok: None,
                mail_id: None,
                message: ALREADY_REGISTERED_MESSAGE.to_string(),
            },
        }
    }
}

/// Subscribe Handler
///
/// Records the email and sends a confirmation mail.
#[endpoint(
    tags("invites"),
    summary = "Request an invitation",
    responses(
        (status_code = 200, description = "Subscribed, or already registered"),
        (status_code = 400, description = "Invalid email address"),
        (status_code = 502, description = "Confirmation mail could not be sent"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SubscribeRequest>,
    depot: &mut Depot,
) -> Result<Json<SubscribeResponse>, StatusError> {
    let result = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .invites
        .subscribe(json.into_inner().into())
        .await;

    record_subscription(SubscriptionResult::of(&result));

    let outcome = result.map_err(into_status_error)?;

    if let SubscribeOutcome::Subscribed { invite_id, .. } = &outcome {
        info!(invite_id, "invitation request received");
    }

    Ok(Json(outcome.into()))
}
