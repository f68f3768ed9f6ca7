//! Mail Config

use clap::Args;
use invites_app::mail::SmtpConfig;

/// Outbound SMTP settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP relay port (465 uses implicit TLS, anything else STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 465_u16)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "EMAIL_USER")]
    pub email_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "EMAIL_PASS", hide_env_values = true)]
    pub email_pass: Option<String>,

    /// Sender address, `EMAIL_USER` when unset
    #[arg(long, env = "FROM_EMAIL")]
    pub from_email: Option<String>,

    /// Sender display name
    #[arg(long, env = "FROM_NAME")]
    pub from_name: Option<String>,

    /// Disable TLS (local relays only)
    #[arg(long, env = "SMTP_INSECURE", default_value_t = false)]
    pub smtp_insecure: bool,
}

impl MailConfig {
    /// SMTP transport settings.
    ///
    /// Without `FROM_EMAIL` or `EMAIL_USER` the sender is empty and the mailer
    /// refuses to start.
    #[must_use]
    pub fn smtp_config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username: self.email_user.clone(),
            password: self.email_pass.clone(),
            from_address: self
                .from_email
                .clone()
                .or_else(|| self.email_user.clone())
                .unwrap_or_default(),
            from_name: self.from_name.clone(),
            use_tls: !self.smtp_insecure,
        }
    }
}
