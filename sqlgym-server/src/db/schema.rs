//! Schema bootstrap for sqlgym tables
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS` statements run at startup.
//! There is no versioned migration history; additive changes only.

use sqlx::PgPool;

/// Create all sqlgym tables and indexes if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring sqlgym schema...");

    // Users: identity string primary key, upserted from claimed identity.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username VARCHAR(50) NOT NULL UNIQUE,
            email VARCHAR(255) NOT NULL UNIQUE,
            first_name VARCHAR(50),
            last_name VARCHAR(50),
            profile_image_url TEXT,
            problems_solved BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Problems: read-only from the API, populated by `sqlgym seed`.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS problems (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(200) NOT NULL,
            description TEXT NOT NULL,
            difficulty VARCHAR(20) NOT NULL,
            starter_code TEXT NOT NULL DEFAULT '',
            tags JSONB NOT NULL DEFAULT '[]',
            companies JSONB NOT NULL DEFAULT '[]',
            hints JSONB NOT NULL DEFAULT '[]',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Submissions: append-only; no uniqueness on (user, problem).
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS submissions (
            id BIGSERIAL PRIMARY KEY,
            problem_id BIGINT NOT NULL REFERENCES problems(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            query TEXT NOT NULL,
            is_correct BOOLEAN NOT NULL,
            execution_time_ms BIGINT,
            submitted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Community posts with denormalized like/comment counters.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS community_posts (
            id BIGSERIAL PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            code_snippet TEXT,
            likes BIGINT NOT NULL DEFAULT 0,
            comments BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One like per (user, post); inserts use ON CONFLICT DO NOTHING.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS post_likes (
            id BIGSERIAL PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            post_id BIGINT NOT NULL REFERENCES community_posts(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (user_id, post_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS post_comments (
            id BIGSERIAL PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            post_id BIGINT NOT NULL REFERENCES community_posts(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("sqlgym schema ready");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Submission indexes: problem listing aggregates over (problem_id, is_correct).
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_submissions_problem ON submissions(problem_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_submissions_user ON submissions(user_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_submissions_correct ON submissions(problem_id, user_id) WHERE is_correct",
    )
    .execute(pool)
    .await?;

    // Problem listing filter
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_problems_difficulty ON problems(difficulty)")
        .execute(pool)
        .await?;

    // Titles are the natural key for seeding; reseeding must not duplicate.
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_problems_title ON problems(title)")
        .execute(pool)
        .await?;

    // Community indexes
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_community_posts_created ON community_posts(created_at DESC)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_post_comments_post ON post_comments(post_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_post_likes_post ON post_likes(post_id)")
        .execute(pool)
        .await?;

    Ok(())
}
