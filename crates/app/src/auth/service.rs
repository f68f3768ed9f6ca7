//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::{
    auth::{
        AdminUser, AdminUserUuid, AuthServiceError, Credentials, IssuedSession, NewAdminUser,
        NewAdminUserRecord, SessionClaims, SessionTokens, hash_password,
        repository::{AdminsRepository, PgAdminsRepository},
        verify_password,
    },
    domain::invites::email::{is_valid_email, normalise_email},
};

#[derive(Clone)]
pub struct PgAuthService {
    repository: Arc<dyn AdminsRepository>,
    tokens: SessionTokens,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, tokens: SessionTokens) -> Self {
        Self::with_repository(Arc::new(PgAdminsRepository::new(pool)), tokens)
    }

    #[must_use]
    pub fn with_repository(repository: Arc<dyn AdminsRepository>, tokens: SessionTokens) -> Self {
        Self { repository, tokens }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let email = normalise_email(&credentials.email);

        let Some(user) = self.repository.find_by_email(&email).await? else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(&credentials.password, &user.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let session = self
            .tokens
            .issue(&user, Timestamp::now())
            .map_err(AuthServiceError::Token)?;

        info!(admin = %user.uuid, role = %user.role, "admin session issued");

        Ok(session)
    }

    async fn authenticate_bearer(&self, token: &str) -> Result<SessionClaims, AuthServiceError> {
        self.tokens
            .verify(token, Timestamp::now())
            .map_err(AuthServiceError::InvalidToken)
    }

    async fn create_admin(&self, user: NewAdminUser) -> Result<AdminUser, AuthServiceError> {
        create_admin(self.repository.as_ref(), user).await
    }
}

/// Hash the password and persist a new admin user.
///
/// # Errors
///
/// Returns [`AuthServiceError::InvalidEmail`] for a malformed email,
/// [`AuthServiceError::AlreadyExists`] when the email is taken, or a hashing or
/// storage error.
pub async fn create_admin(
    repository: &dyn AdminsRepository,
    user: NewAdminUser,
) -> Result<AdminUser, AuthServiceError> {
    let email = normalise_email(&user.email);

    if !is_valid_email(&email) {
        return Err(AuthServiceError::InvalidEmail);
    }

    let password_hash = hash_password(&user.password)?;

    let created = repository
        .create_admin_user(NewAdminUserRecord {
            uuid: AdminUserUuid::new(),
            email,
            password_hash,
            role: user.role,
        })
        .await?;

    info!(admin = %created.uuid, role = %created.role, "admin user created");

    Ok(created)
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges admin credentials for a signed session token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Verifies a bearer token and returns its claims.
    async fn authenticate_bearer(&self, token: &str) -> Result<SessionClaims, AuthServiceError>;

    /// Hashes the password and stores a new admin user.
    async fn create_admin(&self, user: NewAdminUser) -> Result<AdminUser, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::auth::{
        DEFAULT_SESSION_TTL, JwtSecret, MockAdminsRepository, Role, SessionTokenError,
    };

    use super::*;

    fn tokens() -> TestResult<SessionTokens> {
        Ok(SessionTokens::new(JwtSecret::new("test-secret")?, DEFAULT_SESSION_TTL))
    }

    fn stored_user(password: &str, role: Role) -> TestResult<AdminUser> {
        Ok(AdminUser {
            uuid: AdminUserUuid::new(),
            email: "admin@example.com".to_string(),
            password_hash: hash_password(password)?,
            role,
            created_at: Timestamp::now(),
        })
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() -> TestResult {
        let user = stored_user("hunter2", Role::Admin)?;
        let expected_sub = user.uuid.to_string();

        let mut repository = MockAdminsRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "admin@example.com")
            .once()
            .returning(move |_| Ok(Some(user.clone())));

        let service = PgAuthService::with_repository(Arc::new(repository), tokens()?);

        let session = service
            .login(credentials(" Admin@Example.com ", "hunter2"))
            .await?;
        let claims = service.authenticate_bearer(&session.token).await?;

        assert_eq!(claims.sub, expected_sub);
        assert_eq!(claims.role, Role::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() -> TestResult {
        let user = stored_user("hunter2", Role::Admin)?;

        let mut repository = MockAdminsRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = PgAuthService::with_repository(Arc::new(repository), tokens()?);
        let result = service.login(credentials("admin@example.com", "nope")).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() -> TestResult {
        let mut repository = MockAdminsRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));

        let service = PgAuthService::with_repository(Arc::new(repository), tokens()?);
        let result = service.login(credentials("ghost@example.com", "x")).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn viewer_still_receives_token() -> TestResult {
        let user = stored_user("pw", Role::Viewer)?;

        let mut repository = MockAdminsRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = PgAuthService::with_repository(Arc::new(repository), tokens()?);
        let session = service.login(credentials("admin@example.com", "pw")).await?;

        assert_eq!(session.claims.role, Role::Viewer);

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_bearer_rejects_garbage() -> TestResult {
        let service =
            PgAuthService::with_repository(Arc::new(MockAdminsRepository::new()), tokens()?);

        let result = service.authenticate_bearer("garbage").await;

        assert!(
            matches!(
                result,
                Err(AuthServiceError::InvalidToken(SessionTokenError::Invalid(_)))
            ),
            "expected InvalidToken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_admin_stores_hashed_password() -> TestResult {
        let mut repository = MockAdminsRepository::new();
        repository
            .expect_create_admin_user()
            .withf(|record| {
                record.email == "admin@example.com"
                    && record.role == Role::Admin
                    && record.password_hash.starts_with("$argon2")
            })
            .once()
            .returning(|record| {
                Ok(AdminUser {
                    uuid: record.uuid,
                    email: record.email,
                    password_hash: record.password_hash,
                    role: record.role,
                    created_at: Timestamp::now(),
                })
            });

        let service = PgAuthService::with_repository(Arc::new(repository), tokens()?);

        let created = service
            .create_admin(NewAdminUser {
                email: "Admin@Example.com".to_string(),
                password: "hunter2".to_string(),
                role: Role::Admin,
            })
            .await?;

        assert!(verify_password("hunter2", &created.password_hash)?);

        Ok(())
    }
}
