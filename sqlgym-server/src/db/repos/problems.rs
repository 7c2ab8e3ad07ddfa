//! Problem repository
//!
//! The listing query is the heart of the service: one LEFT JOIN aggregation
//! that yields every problem exactly once together with its distinct-solver
//! count and, when a viewer is supplied, whether that viewer solved it.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Row};

use sqlgym_core::{Difficulty, ProblemSeed};

use super::DbError;

/// Problem record from database
#[derive(Debug, Clone, FromRow)]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub starter_code: String,
    pub tags: Json<Vec<String>>,
    pub companies: Json<Vec<String>>,
    pub hints: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Problem with per-viewer solve statistics for list display
#[derive(Debug, Clone)]
pub struct ProblemWithStats {
    pub problem: Problem,
    /// Distinct users with at least one correct submission.
    pub solved_count: i64,
    /// True iff a viewer was supplied and has a correct submission.
    pub is_user_solved: bool,
}

/// Problem repository
pub struct ProblemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProblemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all problems with solve statistics in a single query.
    ///
    /// `viewer` is the requesting user's id, if any. A NULL viewer makes the
    /// `is_user_solved` CASE arm unreachable, so the flag is false on every
    /// row without a second query shape. `difficulty` filters when present.
    ///
    /// Counting uses `COUNT(DISTINCT CASE WHEN is_correct THEN user_id END)`:
    /// distinct solving users, not correct submissions. Problems with no
    /// submissions survive the LEFT JOIN with a count of 0. Ordered by id
    /// for stable output.
    pub async fn list(
        &self,
        viewer: Option<&str>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<ProblemWithStats>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                p.id, p.title, p.description, p.difficulty, p.starter_code,
                p.tags, p.companies, p.hints, p.created_at,
                COUNT(DISTINCT CASE WHEN s.is_correct THEN s.user_id END) AS solved_count,
                COALESCE(MAX(CASE WHEN s.user_id = $1 AND s.is_correct THEN 1 ELSE 0 END), 0) = 1
                    AS is_user_solved
            FROM problems p
            LEFT JOIN submissions s ON s.problem_id = p.id
            WHERE $2::text IS NULL OR p.difficulty = $2
            GROUP BY p.id
            ORDER BY p.id ASC
            "#,
        )
        .bind(viewer)
        .bind(difficulty.map(|d| d.as_str()))
        .fetch_all(self.pool)
        .await?;

        let problems = rows
            .into_iter()
            .map(|r| ProblemWithStats {
                problem: Problem {
                    id: r.get("id"),
                    title: r.get("title"),
                    description: r.get("description"),
                    difficulty: r.get("difficulty"),
                    starter_code: r.get("starter_code"),
                    tags: r.get("tags"),
                    companies: r.get("companies"),
                    hints: r.get("hints"),
                    created_at: r.get("created_at"),
                },
                solved_count: r.get("solved_count"),
                is_user_solved: r.get("is_user_solved"),
            })
            .collect();

        Ok(problems)
    }

    /// Get a single problem by id.
    pub async fn get(&self, id: i64) -> Result<Problem, DbError> {
        sqlx::query_as::<_, Problem>(
            r#"
            SELECT id, title, description, difficulty, starter_code,
                   tags, companies, hints, created_at
            FROM problems
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "problem",
            id: id.to_string(),
        })
    }

    /// Insert or refresh a seeded problem. Used by the seed CLI, not the API.
    ///
    /// Titles are the natural key: reseeding an existing title overwrites its
    /// fields in place and keeps the id, so submissions stay attached and
    /// rerunning the seeder never duplicates the catalog.
    pub async fn insert(&self, seed: &ProblemSeed) -> Result<Problem, DbError> {
        let problem: Problem = sqlx::query_as(
            r#"
            INSERT INTO problems (title, description, difficulty, starter_code, tags, companies, hints)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (title) DO UPDATE SET
                description = EXCLUDED.description,
                difficulty = EXCLUDED.difficulty,
                starter_code = EXCLUDED.starter_code,
                tags = EXCLUDED.tags,
                companies = EXCLUDED.companies,
                hints = EXCLUDED.hints
            RETURNING id, title, description, difficulty, starter_code,
                      tags, companies, hints, created_at
            "#,
        )
        .bind(&seed.title)
        .bind(&seed.description)
        .bind(seed.difficulty.as_str())
        .bind(&seed.starter_code)
        .bind(Json(&seed.tags))
        .bind(Json(&seed.companies))
        .bind(Json(&seed.hints))
        .fetch_one(self.pool)
        .await?;

        Ok(problem)
    }
}
