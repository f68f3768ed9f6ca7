//! Invite request handlers

mod errors;
pub(crate) mod index;
pub(crate) mod subscribe;
