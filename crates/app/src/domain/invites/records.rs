//! Invite Request Records

use jiff::Timestamp;

/// Invite request identifier.
pub type InviteRequestId = i64;

/// Invite Request Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRequestRecord {
    pub id: InviteRequestId,
    pub full_name: Option<String>,
    pub email: String,
    pub source: Option<String>,
    pub status: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_email_at: Option<Timestamp>,
    pub invited_at: Option<Timestamp>,
}
