//! Admin Users Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::auth::{AdminUser, AdminUserUuid, NewAdminUserRecord, Role};

const FIND_ADMIN_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_admin_user_by_email.sql");
const CREATE_ADMIN_USER_SQL: &str = include_str!("sql/create_admin_user.sql");

#[derive(Debug, Clone)]
pub struct PgAdminsRepository {
    pool: PgPool,
}

impl PgAdminsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminsRepository for PgAdminsRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, sqlx::Error> {
        query_as::<Postgres, AdminUser>(FIND_ADMIN_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_admin_user(&self, user: NewAdminUserRecord) -> Result<AdminUser, sqlx::Error> {
        query_as::<Postgres, AdminUser>(CREATE_ADMIN_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
    }
}

#[automock]
#[async_trait]
pub trait AdminsRepository: Send + Sync {
    /// Finds an admin user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, sqlx::Error>;

    /// Inserts an admin user.
    async fn create_admin_user(&self, user: NewAdminUserRecord) -> Result<AdminUser, sqlx::Error>;
}

impl<'r> FromRow<'r, PgRow> for AdminUser {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            uuid: AdminUserUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: role.parse::<Role>().map_err(|error| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(error),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
