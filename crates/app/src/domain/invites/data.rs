//! Invite Requests Data

use validator::Validate;

use crate::domain::invites::records::InviteRequestId;

/// Source recorded for signups captured by the public form.
pub const WEBSITE_SOURCE: &str = "website";

/// Status given to freshly captured signups.
pub const PENDING_STATUS: &str = "Pending";

/// Subscription submitted through the public form.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewSubscription {
    #[validate(email, length(max = 255))]
    pub email: String,
    pub name: Option<String>,
}

/// New Invite Request Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInviteRequest {
    pub email: String,
    pub full_name: Option<String>,
    pub source: String,
    pub status: String,
}

/// Result of a subscription attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// The signup was stored and the confirmation mail was accepted.
    Subscribed {
        invite_id: InviteRequestId,
        mail_id: String,
    },

    /// An invite request already exists for this email.
    AlreadyRegistered,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(email: &str) -> NewSubscription {
        NewSubscription {
            email: email.to_string(),
            name: None,
        }
    }

    #[test]
    fn validates_email_field() {
        assert!(subscription("guest@example.com").validate().is_ok());
        assert!(subscription("guest@").validate().is_err());
        assert!(subscription("not an email").validate().is_err());
    }

    #[test]
    fn rejects_overlong_email() {
        let email = format!("{}@example.com", "a".repeat(250));

        assert!(subscription(&email).validate().is_err());
    }
}
