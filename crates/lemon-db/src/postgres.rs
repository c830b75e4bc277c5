//! SQLx-backed stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lemon_core::StoreError;
use lemon_models::{Account, CreateFeedbackDto, Feedback, Role};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use crate::accounts::AccountRepository;
use crate::feedback::FeedbackRepository;

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict,
        other => StoreError::backend(other),
    }
}

fn expect_affected(rows: u64) -> Result<(), StoreError> {
    if rows == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

#[derive(FromRow)]
struct AccountRow {
    id: String,
    username: String,
    hash: String,
    role: String,
    save_state: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(StoreError::backend)?;
        Ok(Account {
            id: row.id,
            username: row.username,
            hash: row.hash,
            role,
            save_state: row.save_state,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn lookup_account_by_username(&self, username: &str) -> Result<Account, StoreError> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, hash, role, save_state FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .try_into()
    }

    #[instrument(skip(self))]
    async fn lookup_account_by_id(&self, id: &str) -> Result<Account, StoreError> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, hash, role, save_state FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .try_into()
    }

    #[instrument(skip(self, account), fields(account.id = %account.id))]
    async fn persist_account(&self, account: &Account) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO accounts (id, username, hash, role, save_state)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&account.id)
        .bind(&account.username)
        .bind(&account.hash)
        .bind(account.role.as_str())
        .bind(&account.save_state)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self, account), fields(account.id = %account.id))]
    async fn update_account(&self, account: &Account) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE accounts SET hash = $2, save_state = $3 WHERE id = $1")
            .bind(&account.id)
            .bind(&account.hash)
            .bind(&account.save_state)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        expect_affected(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn update_account_role(&self, id: &str, role: Role) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE accounts SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        expect_affected(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        expect_affected(result.rows_affected())
    }
}

#[derive(FromRow)]
struct FeedbackRow {
    id: i64,
    rating: i64,
    description: String,
    kind: String,
    submitted: DateTime<Utc>,
    read: bool,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Feedback {
            id: row.id,
            rating: row.rating,
            description: row.description,
            kind: row.kind,
            submitted: row.submitted,
            read: row.read,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    #[instrument(skip(self, dto))]
    async fn insert_feedback(&self, dto: &CreateFeedbackDto) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO feedback (rating, description, type, submitted)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(dto.rating)
        .bind(&dto.description)
        .bind(&dto.kind)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    #[instrument(skip(self))]
    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            "SELECT id, rating, description, type AS kind, submitted, read
             FROM feedback
             ORDER BY submitted DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Feedback::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_feedback(&self, id: i64) -> Result<Feedback, StoreError> {
        sqlx::query_as::<_, FeedbackRow>(
            "SELECT id, rating, description, type AS kind, submitted, read
             FROM feedback
             WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map(Feedback::from)
        .map_err(map_sqlx_error)
    }

    #[instrument(skip(self))]
    async fn mark_feedback_read(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE feedback SET read = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        expect_affected(result.rows_affected())
    }
}
