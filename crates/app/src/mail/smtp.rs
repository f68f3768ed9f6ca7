//! SMTP delivery through lettre.

use std::fmt;

use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use tracing::debug;
use uuid::Uuid;

use super::{ConfirmationEmailContent, ConfirmationMail, Mailer, MailError};

const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP connection and sender settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
    pub from_name: Option<String>,
    pub use_tls: bool,
}

/// [`Mailer`] backed by an async SMTP transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build the transport and parse the sender mailbox.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidConfig`] when TLS setup or the relay host
    /// is rejected and [`MailError::InvalidAddress`] for a bad sender.
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let address = config
            .from_address
            .parse::<Address>()
            .map_err(|error| MailError::InvalidAddress(format!("from address: {error}")))?;

        let from = Mailbox::new(config.from_name.clone(), address);

        let mut builder = if config.use_tls {
            let tls = TlsParameters::new(config.host.clone())
                .map_err(|error| MailError::InvalidConfig(format!("TLS: {error}")))?;

            if config.port == IMPLICIT_TLS_PORT {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                    .map_err(|error| MailError::InvalidConfig(format!("SMTP relay: {error}")))?
                    .port(config.port)
                    .tls(Tls::Wrapper(tls))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|error| MailError::InvalidConfig(format!("SMTP relay: {error}")))?
                    .port(config.port)
                    .tls(Tls::Required(tls))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).port(config.port)
        };

        if let (Some(username), Some(password)) = (config.username, config.password) {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn next_message_id(&self) -> String {
        format!("<{}@{}>", Uuid::now_v7(), self.from.email.domain())
    }

    fn build_confirmation(
        &self,
        mail: &ConfirmationMail,
        message_id: &str,
    ) -> Result<Message, MailError> {
        let address = mail
            .to
            .parse::<Address>()
            .map_err(|error| MailError::InvalidAddress(format!("{}: {error}", mail.to)))?;

        let to = Mailbox::new(mail.name.clone(), address);
        let content = ConfirmationEmailContent::new(mail.name.as_deref());

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .message_id(Some(message_id.to_string()))
            .subject(content.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(content.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(content.html),
                    ),
            )
            .map_err(|error| MailError::Build(error.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_confirmation(&self, mail: ConfirmationMail) -> Result<String, MailError> {
        let message_id = self.next_message_id();
        let message = self.build_confirmation(&mail, &message_id)?;

        self.transport
            .send(message)
            .await
            .map_err(|error| MailError::SendFailed(error.to_string()))?;

        debug!(message_id = %message_id, "confirmation mail sent");

        Ok(message_id)
    }
}
