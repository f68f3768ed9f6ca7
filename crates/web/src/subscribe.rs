//! Invitation form submission.

use leptos::prelude::*;

use crate::{
    api::InvitesApi,
    notifications::{Notifications, ToastKind},
    popup::Popup,
};

/// Shown when the email fails the syntax check.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// Server message for an email that is already on the list.
pub const ALREADY_REGISTERED_MESSAGE: &str = "Email already registered";

/// Success text when the server sends none.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you! Your invitation request has been received.";

/// Failure text when the error carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Oops! Something went wrong. Please try again later.";

/// Syntactic `local@domain.tld` check.
///
/// No whitespace, exactly one `@`, a non-empty local part, and a domain with a
/// dot that has text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

/// What a submission ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Another submission is still in flight; nothing was sent.
    Suppressed,

    /// Failed the syntax check; nothing was sent.
    Invalid,

    /// Email was already on the list.
    AlreadyRegistered(String),

    /// Signup recorded and confirmation mail sent.
    Subscribed(String),

    /// Network or server failure.
    Failed(String),
}

impl SubmissionOutcome {
    /// Toast to show for this outcome, if any.
    pub fn toast(&self) -> Option<(ToastKind, &str)> {
        match self {
            SubmissionOutcome::Suppressed => None,
            SubmissionOutcome::Invalid => Some((ToastKind::Error, INVALID_EMAIL_MESSAGE)),
            SubmissionOutcome::AlreadyRegistered(message) => Some((ToastKind::Warning, message.as_str())),
            SubmissionOutcome::Subscribed(message) => Some((ToastKind::Success, message.as_str())),
            SubmissionOutcome::Failed(message) => Some((ToastKind::Error, message.as_str())),
        }
    }

    /// Only a fresh signup shows the confirmation popup.
    pub fn shows_popup(&self) -> bool {
        matches!(self, SubmissionOutcome::Subscribed(_))
    }

    /// Surface the outcome through toasts and the popup.
    pub fn present(&self, notifications: Notifications, popup: Popup) {
        if let Some((kind, message)) = self.toast() {
            notifications.notify(kind, message);
        }

        if self.shows_popup() {
            popup.show_and_schedule();
        }
    }
}

/// Form state shared with the landing page.
#[derive(Debug, Clone, Copy)]
pub struct SubscribeForm {
    /// Email input
    pub email: RwSignal<String>,

    /// A request is in flight
    pub pending: RwSignal<bool>,
}

impl Default for SubscribeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscribeForm {
    /// Empty, idle form.
    pub fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            pending: RwSignal::new(false),
        }
    }
}

/// Validate and send the form's email.
///
/// At most one request is in flight per form. The input is cleared on a
/// recorded or already-registered email and left as typed on failure.
pub async fn submit<A: InvitesApi>(api: &A, form: SubscribeForm) -> SubmissionOutcome {
    if form.pending.get_untracked() {
        return SubmissionOutcome::Suppressed;
    }

    let email = form.email.get_untracked().trim().to_string();

    if !is_valid_email(&email) {
        return SubmissionOutcome::Invalid;
    }

    form.pending.set(true);

    let result = api.subscribe(&email, "").await;

    form.pending.set(false);

    match result {
        Ok(reply) if reply.message.as_deref() == Some(ALREADY_REGISTERED_MESSAGE) => {
            form.email.set(String::new());

            SubmissionOutcome::AlreadyRegistered(ALREADY_REGISTERED_MESSAGE.to_string())
        }
        Ok(reply) => {
            form.email.set(String::new());

            SubmissionOutcome::Subscribed(
                reply
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            )
        }
        Err(error) => {
            let message = error.to_string();

            SubmissionOutcome::Failed(if message.is_empty() {
                DEFAULT_FAILURE_MESSAGE.to_string()
            } else {
                message
            })
        }
    }
}
