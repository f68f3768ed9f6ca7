//! Invitation list domain, persistence, authentication and mail delivery.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod mail;

mod uuids;
