//! PostgreSQL implementation of the account repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;

const USER_COLUMNS: &str = "user_id, username, email, password_hash, created_at";

/// Constraint backing the one-account-per-email rule.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL repository for account storage and retrieval.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_user_row(row: &PgRow) -> Result<User, AppError> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

fn map_insert_error(e: sqlx::Error) -> AppError {
    if is_unique_violation_on(&e, EMAIL_UNIQUE_CONSTRAINT) {
        return AppError::conflict("Email already exists");
    }
    e.into()
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<i64, AppError> {
        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING user_id",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_insert_error)?;

        Ok(user_id)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");

        let row = sqlx::query(&sql)
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");

        let rows = sqlx::query(&sql).fetch_all(self.pool.as_ref()).await?;

        rows.iter().map(map_user_row).collect()
    }

    async fn update(&self, user_id: i64, patch: UserPatch) -> Result<bool, AppError> {
        // The credential column is only touched when a new hash is
        // supplied; the two statements keep that explicit.
        let result = match &patch.password_hash {
            Some(hash) => {
                sqlx::query(
                    "UPDATE users SET username = $1, email = $2, password_hash = $3 \
                     WHERE user_id = $4",
                )
                .bind(&patch.username)
                .bind(&patch.email)
                .bind(hash)
                .bind(user_id)
                .execute(self.pool.as_ref())
                .await
            }
            None => {
                sqlx::query("UPDATE users SET username = $1, email = $2 WHERE user_id = $3")
                    .bind(&patch.username)
                    .bind(&patch.email)
                    .bind(user_id)
                    .execute(self.pool.as_ref())
                    .await
            }
        }
        .map_err(map_insert_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
