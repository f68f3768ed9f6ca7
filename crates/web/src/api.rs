//! HTTP client for the public API.

use reqwest::{Client, RequestBuilder, header::ACCEPT};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;

use crate::listing::InviteRequest;

/// API origin used when `INVITES_API_BASE` is not set at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Failed API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// Non-2xx status, or `ok: false` in the body.
    #[error("{message}")]
    Server {
        /// HTTP status
        status: u16,

        /// Message taken from the body, or a generic one
        message: String,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response from server")]
    InvalidResponse(String),
}

/// Body of a successful subscribe call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeReply {
    /// `true` when a confirmation mail was sent
    #[serde(default)]
    pub ok: Option<bool>,

    /// Message id of the confirmation mail
    #[serde(default)]
    pub mail_id: Option<String>,

    /// Human readable outcome
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InviteRequestsReply {
    invite_requests: Vec<InviteRequest>,
}

/// The three public endpoints.
pub trait InvitesApi {
    /// `POST /api/public/subscribe`
    async fn subscribe(&self, email: &str, name: &str) -> Result<SubscribeReply, ApiError>;

    /// `POST /api/public/login`, returning the session token.
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// `GET /api/public/invite`
    async fn list_invite_requests(&self, token: &str) -> Result<Vec<InviteRequest>, ApiError>;
}

/// [`InvitesApi`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client rooted at the build-time `INVITES_API_BASE`.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("INVITES_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;

        decode_reply(interpret(status, &body)?)
    }
}

impl InvitesApi for HttpApi {
    async fn subscribe(&self, email: &str, name: &str) -> Result<SubscribeReply, ApiError> {
        let request = self
            .client
            .post(self.url("/api/public/subscribe"))
            .json(&json!({ "email": email, "name": name }));

        self.send(request).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = self
            .client
            .post(self.url("/api/public/login"))
            .json(&json!({ "Email": email, "Password": password }));

        let reply: LoginReply = self.send(request).await?;

        Ok(reply.token)
    }

    async fn list_invite_requests(&self, token: &str) -> Result<Vec<InviteRequest>, ApiError> {
        let request = self
            .client
            .get(self.url("/api/public/invite"))
            .bearer_auth(token);

        let reply: InviteRequestsReply = self.send(request).await?;

        Ok(reply.invite_requests)
    }
}

/// Classify a response by status and body.
///
/// An unparseable body counts as an empty object. The failure message is the
/// body's `error` string, then `error.brief` (the server's error envelope),
/// then `Request failed (<status>)`.
///
/// # Errors
///
/// Returns [`ApiError::Server`] for a non-2xx status or a body with `ok: false`.
pub fn interpret(status: u16, body: &str) -> Result<Value, ApiError> {
    let value = serde_json::from_str::<Value>(body).unwrap_or_else(|_| json!({}));

    let failed = !(200..300).contains(&status) || value.get("ok") == Some(&Value::Bool(false));

    if !failed {
        return Ok(value);
    }

    let message = error_message(&value).unwrap_or_else(|| format!("Request failed ({status})"));

    Err(ApiError::Server { status, message })
}

/// Shape a successful body into `T`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidResponse`] carrying the decode error.
pub fn decode_reply<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|error| ApiError::InvalidResponse(error.to_string()))
}

fn error_message(value: &Value) -> Option<String> {
    let error = value.get("error")?;

    error
        .as_str()
        .or_else(|| error.get("brief").and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}
