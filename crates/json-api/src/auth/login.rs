//! Login Handler

use std::{fmt, sync::Arc};

use invites_app::auth::Credentials;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LoginRequest {
    /// Admin email
    pub email: String,

    /// Admin password
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Outcome message
    pub message: String,

    /// Signed session token
    pub token: String,
}

/// Login Handler
///
/// Exchanges admin credentials for a session token.
#[endpoint(
    tags("auth"),
    summary = "Admin login",
    responses(
        (status_code = 200, description = "Session token issued"),
        (status_code = 401, description = "Invalid email or password"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let session = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: session.token,
    }))
}

#[cfg(test)]
mod tests {
    use invites_app::auth::{AuthServiceError, IssuedSession, MockAuthService, Role};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{claims_with_role, service, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        service(
            state_with_auth(auth),
            Router::with_path("api/public/login").post(handler),
        )
    }

    #[tokio::test]
    async fn test_login_returns_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "admin@example.com" && credentials.password == "hunter2"
            })
            .return_once(|_| {
                Ok(IssuedSession {
                    token: "signed.jwt.token".to_string(),
                    claims: claims_with_role(Role::Admin),
                })
            });

        let response: LoginResponse = TestClient::post("http://example.com/api/public/login")
            .json(&json!({ "Email": "admin@example.com", "Password": "hunter2" }))
            .send(&make_service(auth))
            .await
            .take_json()
            .await?;

        assert_eq!(response.token, "signed.jwt.token");
        assert_eq!(response.message, "Login successful");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_wrong_password_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/api/public/login")
            .json(&json!({ "Email": "admin@example.com", "Password": "nope" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_with_lowercase_keys_is_rejected() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/api/public/login")
            .json(&json!({ "email": "admin@example.com", "password": "hunter2" }))
            .send(&make_service(auth))
            .await;

        assert_ne!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
