//! Invite requests service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    domain::invites::{
        data::{NewInviteRequest, NewSubscription, PENDING_STATUS, SubscribeOutcome, WEBSITE_SOURCE},
        email::{has_dotted_domain, normalise_email},
        errors::InvitesServiceError,
        records::InviteRequestRecord,
        repository::{InvitesRepository, PgInvitesRepository},
    },
    mail::{ConfirmationMail, Mailer},
};

#[derive(Clone)]
pub struct PgInvitesService {
    repository: Arc<dyn InvitesRepository>,
    mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for PgInvitesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgInvitesService").finish_non_exhaustive()
    }
}

impl PgInvitesService {
    #[must_use]
    pub fn new(pool: PgPool, mailer: Arc<dyn Mailer>) -> Self {
        Self::with_repository(Arc::new(PgInvitesRepository::new(pool)), mailer)
    }

    #[must_use]
    pub fn with_repository(repository: Arc<dyn InvitesRepository>, mailer: Arc<dyn Mailer>) -> Self {
        Self { repository, mailer }
    }

    /// Mails the confirmation for a stored signup and stamps `last_email_at`.
    async fn send_and_stamp(
        &self,
        record: &InviteRequestRecord,
        name: Option<String>,
    ) -> Result<SubscribeOutcome, InvitesServiceError> {
        let mail_id = self
            .mailer
            .send_confirmation(ConfirmationMail {
                to: record.email.clone(),
                name,
            })
            .await?;

        if let Err(error) = self.repository.mark_emailed(record.id, Timestamp::now()).await {
            warn!(invite_id = record.id, error = %error, "failed to stamp last_email_at");
        }

        info!(invite_id = record.id, mail_id = %mail_id, "invite request confirmed");

        Ok(SubscribeOutcome::Subscribed {
            invite_id: record.id,
            mail_id,
        })
    }
}

#[async_trait]
impl InvitesService for PgInvitesService {
    async fn subscribe(
        &self,
        subscription: NewSubscription,
    ) -> Result<SubscribeOutcome, InvitesServiceError> {
        let subscription = NewSubscription {
            email: normalise_email(&subscription.email),
            name: subscription
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        };

        if subscription.validate().is_err() || !has_dotted_domain(&subscription.email) {
            return Err(InvitesServiceError::InvalidEmail);
        }

        if let Some(existing) = self.repository.find_by_email(&subscription.email).await? {
            if existing.last_email_at.is_some() {
                return Ok(SubscribeOutcome::AlreadyRegistered);
            }

            // A previous attempt stored the signup but never got the mail out.
            let name = existing.full_name.clone().or(subscription.name);

            return self.send_and_stamp(&existing, name).await;
        }

        let created = self
            .repository
            .create_invite_request(NewInviteRequest {
                email: subscription.email,
                full_name: subscription.name.clone(),
                source: WEBSITE_SOURCE.to_string(),
                status: PENDING_STATUS.to_string(),
            })
            .await
            .map_err(InvitesServiceError::from);

        let created = match created {
            Ok(created) => created,
            Err(InvitesServiceError::AlreadyExists) => return Ok(SubscribeOutcome::AlreadyRegistered),
            Err(error) => return Err(error),
        };

        self.send_and_stamp(&created, subscription.name).await
    }

    async fn list_invite_requests(&self) -> Result<Vec<InviteRequestRecord>, InvitesServiceError> {
        Ok(self.repository.list_invite_requests().await?)
    }
}

#[automock]
#[async_trait]
pub trait InvitesService: Send + Sync {
    /// Records a signup and sends its confirmation mail.
    async fn subscribe(
        &self,
        subscription: NewSubscription,
    ) -> Result<SubscribeOutcome, InvitesServiceError>;

    /// Lists every invite request, newest first.
    async fn list_invite_requests(&self) -> Result<Vec<InviteRequestRecord>, InvitesServiceError>;
}
