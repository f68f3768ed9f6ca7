//! Admin session gate.
//!
//! The session token is decoded locally (no signature check, the server does
//! that on every request) and only accepted when it is unexpired and carries
//! the `Admin` role.

use std::{fmt, sync::Arc};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jiff::Timestamp;
use leptos::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::storage::TokenStore;

/// Role required to see the admin view.
pub const ADMIN_ROLE: &str = "Admin";

/// Storage key holding the session token.
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// Claims the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,

    /// Role claim
    #[serde(default)]
    pub role: Option<String>,
}

/// Reasons a session token is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Expiry is at or before the current time.
    #[error("Session has expired")]
    Expired,

    /// Token payload could not be decoded.
    #[error("Login failed. Please try again.")]
    Malformed,

    /// Token does not carry the admin role.
    #[error("Access denied: Admin role required")]
    RoleMismatch,
}

/// Where the admin session currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No token; login form shown.
    #[default]
    Anonymous,

    /// Login request in flight.
    Authenticating,

    /// Valid admin token held.
    Authenticated,

    /// Last login attempt failed.
    Error(String),
}

/// Decode the payload segment of a JWT without verifying it.
///
/// # Errors
///
/// Returns [`SessionError::Malformed`] if the payload is missing, is not
/// base64url, or is not a JSON object.
pub fn decode_claims(token: &str) -> Result<TokenClaims, SessionError> {
    let payload = token.split('.').nth(1).ok_or(SessionError::Malformed)?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_decode_error| SessionError::Malformed)?;

    serde_json::from_slice(&bytes).map_err(|_json_error| SessionError::Malformed)
}

/// Decode and validate a token at `now`.
///
/// Expiry is checked before the role. A token without `exp` counts as expired.
///
/// # Errors
///
/// Returns the first [`SessionError`] that applies.
pub fn validate_token(token: &str, now: Timestamp) -> Result<TokenClaims, SessionError> {
    let claims = decode_claims(token)?;

    match claims.exp {
        Some(exp) if exp > now.as_second() => {}
        _ => return Err(SessionError::Expired),
    }

    if claims.role.as_deref() != Some(ADMIN_ROLE) {
        return Err(SessionError::RoleMismatch);
    }

    Ok(claims)
}

/// Explicit session context handed to the admin components.
#[derive(Clone)]
pub struct SessionContext {
    state: RwSignal<SessionState>,
    store: Arc<dyn TokenStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &self.state.get_untracked())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// New anonymous session over `store`.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: RwSignal::new(SessionState::Anonymous),
            store,
        }
    }

    /// Reactive view of the session state.
    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    /// The persisted token, if any.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_STORAGE_KEY)
    }

    /// Re-validate the persisted token.
    ///
    /// Returns `true` only on the transition into [`SessionState::Authenticated`].
    /// Any failure clears the token and falls back to anonymous, silently.
    pub fn restore(&self, now: Timestamp) -> bool {
        let valid = self
            .token()
            .is_some_and(|token| validate_token(&token, now).is_ok());

        if valid {
            return self.enter_authenticated();
        }

        self.store.remove(TOKEN_STORAGE_KEY);
        self.state.set(SessionState::Anonymous);

        false
    }

    /// Move into [`SessionState::Authenticating`].
    ///
    /// Returns `false` when a login is already in flight or the session is
    /// already authenticated.
    pub fn begin_login(&self) -> bool {
        let ready = matches!(
            self.state.get_untracked(),
            SessionState::Anonymous | SessionState::Error(_)
        );

        if ready {
            self.state.set(SessionState::Authenticating);
        }

        ready
    }

    /// Accept a token returned by the login endpoint.
    ///
    /// The token is validated before it is stored; a rejected token is never
    /// persisted and the rejection becomes the login error. Returns `true` on
    /// the transition into [`SessionState::Authenticated`].
    pub fn complete_login(&self, token: &str, now: Timestamp) -> bool {
        if self.state.get_untracked() != SessionState::Authenticating {
            return false;
        }

        match validate_token(token, now) {
            Ok(_) => {
                self.store.set(TOKEN_STORAGE_KEY, token);
                self.enter_authenticated()
            }
            Err(error) => {
                self.state.set(SessionState::Error(error.to_string()));
                false
            }
        }
    }

    /// Record a failed login request.
    pub fn fail_login(&self, message: impl Into<String>) {
        if self.state.get_untracked() == SessionState::Authenticating {
            self.state.set(SessionState::Error(message.into()));
        }
    }

    /// Drop the token and return to anonymous.
    pub fn logout(&self) {
        self.store.remove(TOKEN_STORAGE_KEY);
        self.state.set(SessionState::Anonymous);
    }

    fn enter_authenticated(&self) -> bool {
        if self.state.get_untracked() == SessionState::Authenticated {
            return false;
        }

        self.state.set(SessionState::Authenticated);

        true
    }
}
