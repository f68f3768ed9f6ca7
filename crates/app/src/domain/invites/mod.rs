//! Invite Requests

pub mod data;
pub mod email;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use data::{NewSubscription, SubscribeOutcome};
pub use errors::InvitesServiceError;
pub use records::{InviteRequestId, InviteRequestRecord};
pub use repository::{InvitesRepository, MockInvitesRepository, PgInvitesRepository};
pub use service::*;
