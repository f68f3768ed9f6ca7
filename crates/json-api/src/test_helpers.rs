//! Test helpers.

use std::sync::Arc;

use invites_app::{
    auth::{MockAuthService, Role, SessionClaims},
    context::AppContext,
    domain::invites::MockInvitesService,
};
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_create_admin().never();

    auth
}

fn strict_invites_mock() -> MockInvitesService {
    let mut invites = MockInvitesService::new();

    invites.expect_subscribe().never();
    invites.expect_list_invite_requests().never();

    invites
}

pub(crate) fn state_with(invites: MockInvitesService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        invites: Arc::new(invites),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_invites(invites: MockInvitesService) -> Arc<State> {
    state_with(invites, strict_auth_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(strict_invites_mock(), auth)
}

pub(crate) fn claims_with_role(role: Role) -> SessionClaims {
    SessionClaims {
        sub: "0190f3a4-0000-7000-8000-000000000001".to_string(),
        email: "admin@example.com".to_string(),
        role,
        iat: 1_700_000_000,
        exp: 1_700_003_600,
    }
}

pub(crate) fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}
