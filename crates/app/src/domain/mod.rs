//! Invitation List Domain Concerns

pub mod invites;
