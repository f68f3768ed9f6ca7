//! Invite Requests Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::invites::{
    data::NewInviteRequest,
    records::{InviteRequestId, InviteRequestRecord},
};

const FIND_INVITE_REQUEST_BY_EMAIL_SQL: &str = include_str!("sql/find_invite_request_by_email.sql");
const CREATE_INVITE_REQUEST_SQL: &str = include_str!("sql/create_invite_request.sql");
const MARK_INVITE_REQUEST_EMAILED_SQL: &str = include_str!("sql/mark_invite_request_emailed.sql");
const LIST_INVITE_REQUESTS_SQL: &str = include_str!("sql/list_invite_requests.sql");

#[derive(Debug, Clone)]
pub struct PgInvitesRepository {
    pool: PgPool,
}

impl PgInvitesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitesRepository for PgInvitesRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<InviteRequestRecord>, sqlx::Error> {
        query_as::<Postgres, InviteRequestRecord>(FIND_INVITE_REQUEST_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_invite_request(
        &self,
        invite: NewInviteRequest,
    ) -> Result<InviteRequestRecord, sqlx::Error> {
        query_as::<Postgres, InviteRequestRecord>(CREATE_INVITE_REQUEST_SQL)
            .bind(invite.email)
            .bind(invite.full_name)
            .bind(invite.source)
            .bind(invite.status)
            .fetch_one(&self.pool)
            .await
    }

    async fn mark_emailed(&self, id: InviteRequestId, at: Timestamp) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_INVITE_REQUEST_EMAILED_SQL)
            .bind(id)
            .bind(SqlxTimestamp::from(at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn list_invite_requests(&self) -> Result<Vec<InviteRequestRecord>, sqlx::Error> {
        query_as::<Postgres, InviteRequestRecord>(LIST_INVITE_REQUESTS_SQL)
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for InviteRequestRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            source: row.try_get("source")?,
            status: row.try_get("status")?,
            note: row.try_get("note")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            last_email_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_email_at")?
                .map(SqlxTimestamp::to_jiff),
            invited_at: row
                .try_get::<Option<SqlxTimestamp>, _>("invited_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

/// Invite request persistence operations.
#[automock]
#[async_trait]
pub trait InvitesRepository: Send + Sync {
    /// Finds the invite request registered for `email`, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<InviteRequestRecord>, sqlx::Error>;

    /// Inserts a new invite request.
    async fn create_invite_request(
        &self,
        invite: NewInviteRequest,
    ) -> Result<InviteRequestRecord, sqlx::Error>;

    /// Stamps the time the confirmation mail was sent; returns rows affected.
    async fn mark_emailed(&self, id: InviteRequestId, at: Timestamp) -> Result<u64, sqlx::Error>;

    /// Lists every invite request, newest first.
    async fn list_invite_requests(&self) -> Result<Vec<InviteRequestRecord>, sqlx::Error>;
}
