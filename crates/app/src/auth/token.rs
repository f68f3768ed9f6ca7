//! HS256 session tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::{AdminUser, Role};

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_mins(60);

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin user uuid.
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Issued at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Session token and the claims it encodes.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("failed to sign session token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("session token is invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("session token has expired")]
    Expired,
}

/// HMAC signing secret, wiped on drop.
#[derive(Clone)]
pub struct JwtSecret {
    bytes: Vec<u8>,
}

impl JwtSecret {
    /// Wrap a configured secret.
    ///
    /// # Errors
    ///
    /// Returns [`SessionTokenError::EmptySecret`] when the secret is empty.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SessionTokenError> {
        let bytes = secret.into();

        if bytes.is_empty() {
            return Err(SessionTokenError::EmptySecret);
        }

        Ok(Self { bytes })
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(**redacted**)")
    }
}

impl Drop for JwtSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Issues and verifies session tokens.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    secret: JwtSecret,
    ttl: SignedDuration,
}

impl SessionTokens {
    #[must_use]
    pub const fn new(secret: JwtSecret, ttl: SignedDuration) -> Self {
        Self { secret, ttl }
    }

    #[must_use]
    pub const fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Sign a token for `user`, valid from `now` for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns [`SessionTokenError::Encode`] when signing fails.
    pub fn issue(&self, user: &AdminUser, now: Timestamp) -> Result<IssuedSession, SessionTokenError> {
        let iat = now.as_second();

        let claims = SessionClaims {
            sub: user.uuid.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat,
            exp: iat.saturating_add(self.ttl.as_secs()),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(SessionTokenError::Encode)?;

        Ok(IssuedSession { token, claims })
    }

    /// Verify the signature and check expiry against `now`.
    ///
    /// A token whose `exp` is at or before `now` is expired.
    ///
    /// # Errors
    ///
    /// Returns [`SessionTokenError::Invalid`] for a bad signature or shape and
    /// [`SessionTokenError::Expired`] once the token has lapsed.
    pub fn verify(&self, token: &str, now: Timestamp) -> Result<SessionClaims, SessionTokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;

        let claims = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(SessionTokenError::Invalid)?
        .claims;

        if claims.exp <= now.as_second() {
            return Err(SessionTokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::auth::AdminUserUuid;

    fn tokens(secret: &str) -> TestResult<SessionTokens> {
        Ok(SessionTokens::new(JwtSecret::new(secret)?, DEFAULT_SESSION_TTL))
    }

    fn user(role: Role) -> AdminUser {
        AdminUser {
            uuid: AdminUserUuid::new(),
            email: "admin@example.com".to_string(),
            password_hash: String::new(),
            role,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn issued_token_verifies() -> TestResult {
        let tokens = tokens("secret")?;
        let now = Timestamp::from_second(1_700_000_000)?;
        let user = user(Role::Admin);

        let issued = tokens.issue(&user, now)?;
        let claims = tokens.verify(&issued.token, now)?;

        assert_eq!(claims, issued.claims);
        assert_eq!(claims.sub, user.uuid.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(claims.is_admin());

        Ok(())
    }

    #[test]
    fn token_expires_exactly_at_exp() -> TestResult {
        let tokens = tokens("secret")?;
        let now = Timestamp::from_second(1_700_000_000)?;
        let issued = tokens.issue(&user(Role::Admin), now)?;

        let at_expiry = Timestamp::from_second(issued.claims.exp)?;
        let just_before = Timestamp::from_second(issued.claims.exp - 1)?;

        assert!(matches!(
            tokens.verify(&issued.token, at_expiry),
            Err(SessionTokenError::Expired)
        ));
        assert!(tokens.verify(&issued.token, just_before).is_ok());

        Ok(())
    }

    #[test]
    fn wrong_secret_is_rejected() -> TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;
        let issued = tokens("secret")?.issue(&user(Role::Admin), now)?;

        assert!(matches!(
            tokens("other")?.verify(&issued.token, now),
            Err(SessionTokenError::Invalid(_))
        ));

        Ok(())
    }

    #[test]
    fn garbage_is_rejected() -> TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;

        assert!(matches!(
            tokens("secret")?.verify("not.a.token", now),
            Err(SessionTokenError::Invalid(_))
        ));

        Ok(())
    }

    #[test]
    fn viewer_tokens_carry_their_role() -> TestResult {
        let tokens = tokens("secret")?;
        let now = Timestamp::from_second(1_700_000_000)?;
        let issued = tokens.issue(&user(Role::Viewer), now)?;

        assert!(!tokens.verify(&issued.token, now)?.is_admin());

        Ok(())
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(JwtSecret::new(""), Err(SessionTokenError::EmptySecret)));
    }

    #[test]
    fn secret_debug_is_redacted() -> TestResult {
        assert_eq!(format!("{:?}", JwtSecret::new("secret")?), "JwtSecret(**redacted**)");

        Ok(())
    }
}
