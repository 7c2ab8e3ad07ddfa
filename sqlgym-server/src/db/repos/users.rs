//! User repository
//!
//! Users are created or refreshed from claimed identity attributes on every
//! authenticated request (upsert-on-read): one `INSERT ... ON CONFLICT`
//! with last-writer-wins semantics, never a check-then-insert.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::ClaimedIdentity;

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub problems_solved: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the user if absent, otherwise overwrite the mutable profile
    /// fields with the claimed values. Returns the stored row either way.
    ///
    /// Concurrent upserts for the same id are last-commit-wins; the
    /// `problems_solved` counter is never touched here.
    pub async fn upsert(&self, identity: &ClaimedIdentity) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name, profile_image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                profile_image_url = EXCLUDED.profile_image_url,
                updated_at = NOW()
            RETURNING id, username, email, first_name, last_name, profile_image_url,
                      problems_solved, created_at, updated_at
            "#,
        )
        .bind(&identity.id)
        .bind(&identity.username)
        .bind(&identity.email)
        .bind(identity.first_name.as_deref())
        .bind(identity.last_name.as_deref())
        .bind(identity.profile_image_url.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by id.
    pub async fn get(&self, id: &str) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, profile_image_url,
                   problems_solved, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_owned(),
        })
    }

    /// Top users by solved-problem count, descending. Ties break by id for
    /// deterministic output.
    pub async fn leaderboard(&self, limit: i64) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, profile_image_url,
                   problems_solved, created_at, updated_at
            FROM users
            ORDER BY problems_solved DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}
