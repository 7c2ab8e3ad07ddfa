//! Submission repository
//!
//! Submissions are append-only: a user may submit to the same problem any
//! number of times and existing rows are never modified. Recording a correct
//! submission also bumps the author's solved counter, in one transaction.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;

/// Submission record from database
#[derive(Debug, Clone, FromRow)]
pub struct Submission {
    pub id: i64,
    pub problem_id: i64,
    pub user_id: String,
    pub query: String,
    pub is_correct: bool,
    pub execution_time_ms: Option<i64>,
    pub submitted_at: DateTime<Utc>,
}

/// Submission repository
pub struct SubmissionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one submission row.
    ///
    /// Fails fast with NotFound when the problem does not exist - orphaned
    /// submissions are never persisted. When the verdict is correct the
    /// user's `problems_solved` counter is incremented in the same
    /// transaction, so the counter cannot drift from the rows.
    pub async fn create(
        &self,
        problem_id: i64,
        user_id: &str,
        query: &str,
        is_correct: bool,
        execution_time_ms: i64,
    ) -> Result<Submission, DbError> {
        let problem_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM problems WHERE id = $1)")
                .bind(problem_id)
                .fetch_one(self.pool)
                .await?;

        if !problem_exists.0 {
            return Err(DbError::NotFound {
                resource: "problem",
                id: problem_id.to_string(),
            });
        }

        let mut tx = self.pool.begin().await?;

        let submission: Submission = sqlx::query_as(
            r#"
            INSERT INTO submissions (problem_id, user_id, query, is_correct, execution_time_ms)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, problem_id, user_id, query, is_correct, execution_time_ms, submitted_at
            "#,
        )
        .bind(problem_id)
        .bind(user_id)
        .bind(query)
        .bind(is_correct)
        .bind(execution_time_ms)
        .fetch_one(&mut *tx)
        .await?;

        if is_correct {
            sqlx::query(
                r#"
                UPDATE users
                SET problems_solved = problems_solved + 1, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(submission)
    }

    /// List a user's submissions, newest first, optionally narrowed to one
    /// problem.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>, DbError> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, problem_id, user_id, query, is_correct, execution_time_ms, submitted_at
            FROM submissions
            WHERE user_id = $1
              AND ($2::bigint IS NULL OR problem_id = $2)
            ORDER BY submitted_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }
}
