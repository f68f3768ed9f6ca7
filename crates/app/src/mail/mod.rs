//! Outbound mail delivery.
//!
//! The subscription flow only needs one message, the invitation-request
//! confirmation. [`Mailer`] is the seam services depend on; [`SmtpMailer`]
//! delivers through any SMTP relay (Gmail app passwords included).

mod smtp;
mod templates;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub use smtp::{SmtpConfig, SmtpMailer};
pub use templates::ConfirmationEmailContent;

/// Confirmation mail addressed to a new signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationMail {
    /// Recipient address.
    pub to: String,

    /// Recipient display name, when one was supplied.
    pub name: Option<String>,
}

/// Mail delivery errors.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("failed to send message: {0}")]
    SendFailed(String),
}

/// Sends transactional mail.
#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the confirmation mail and returns its message id.
    async fn send_confirmation(&self, mail: ConfirmationMail) -> Result<String, MailError>;
}
