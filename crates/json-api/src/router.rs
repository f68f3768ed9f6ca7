//! App Router

use salvo::Router;

use crate::{auth, invites};

/// Public API routes under `/api/public`.
pub fn app_router() -> Router {
    Router::with_path("api/public")
        .push(Router::with_path("subscribe").post(invites::subscribe::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::with_path("invite")
                .hoop(auth::middleware::handler)
                .get(invites::index::handler),
        )
}
