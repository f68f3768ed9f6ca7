//! Depot helper extensions.

use std::any::Any;

use invites_app::auth::SessionClaims;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session_claims(&mut self, claims: SessionClaims);

    fn session_claims_or_401(&self) -> Result<&SessionClaims, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session_claims(&mut self, claims: SessionClaims) {
        self.inject(claims);
    }

    fn session_claims_or_401(&self) -> Result<&SessionClaims, StatusError> {
        self.obtain::<SessionClaims>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
