//! Auth middleware.

use std::sync::Arc;

use invites_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{error, warn};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let claims = match state.app.auth.authenticate_bearer(token).await {
        Ok(claims) => claims,
        Err(AuthServiceError::InvalidToken(source)) => {
            warn!("rejected session token: {source}");

            res.render(StatusError::unauthorized().brief("Invalid or expired token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate session token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    if !claims.is_admin() {
        res.render(StatusError::forbidden().brief("Admin role required"));
        ctrl.skip_rest();

        return;
    }

    depot.insert_session_claims(claims);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
