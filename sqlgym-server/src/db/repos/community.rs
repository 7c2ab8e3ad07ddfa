//! Community repository - posts, likes, and comments
//!
//! The like/comment counters on posts are denormalized; every mutation that
//! touches them runs the row change and the counter update in one
//! transaction. Author fields come from a single INNER JOIN, never a
//! per-row lookup.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use super::DbError;

/// Community post record from database
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: String,
    pub content: String,
    pub code_snippet: Option<String>,
    pub likes: i64,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
}

/// Post joined with its author's public profile
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author_username: String,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_profile_image_url: Option<String>,
}

/// Comment record from database
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub user_id: String,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's public profile
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_username: String,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_profile_image_url: Option<String>,
}

/// Community repository
pub struct CommunityRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommunityRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all posts with author, newest first.
    pub async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                p.id, p.user_id, p.content, p.code_snippet, p.likes, p.comments, p.created_at,
                u.username, u.first_name, u.last_name, u.profile_image_url
            FROM community_posts p
            INNER JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let posts = rows
            .into_iter()
            .map(|r| PostWithAuthor {
                post: Post {
                    id: r.get("id"),
                    user_id: r.get("user_id"),
                    content: r.get("content"),
                    code_snippet: r.get("code_snippet"),
                    likes: r.get("likes"),
                    comments: r.get("comments"),
                    created_at: r.get("created_at"),
                },
                author_username: r.get("username"),
                author_first_name: r.get("first_name"),
                author_last_name: r.get("last_name"),
                author_profile_image_url: r.get("profile_image_url"),
            })
            .collect();

        Ok(posts)
    }

    /// Create a post.
    pub async fn create_post(
        &self,
        user_id: &str,
        content: &str,
        code_snippet: Option<&str>,
    ) -> Result<Post, DbError> {
        let post: Post = sqlx::query_as(
            r#"
            INSERT INTO community_posts (user_id, content, code_snippet)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, content, code_snippet, likes, comments, created_at
            "#,
        )
        .bind(user_id)
        .bind(content)
        .bind(code_snippet)
        .fetch_one(self.pool)
        .await?;

        Ok(post)
    }

    /// Like a post. Liking twice is a no-op: the unique (user, post)
    /// constraint absorbs the duplicate and the counter is only bumped
    /// when a like row was actually inserted.
    pub async fn like_post(&self, user_id: &str, post_id: i64) -> Result<(), DbError> {
        self.ensure_post_exists(post_id).await?;

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO post_likes (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, post_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 1 {
            sqlx::query("UPDATE community_posts SET likes = likes + 1 WHERE id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Remove a like. Unliking a post the user never liked is a no-op.
    pub async fn unlike_post(&self, user_id: &str, post_id: i64) -> Result<(), DbError> {
        self.ensure_post_exists(post_id).await?;

        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(
            "DELETE FROM post_likes WHERE user_id = $1 AND post_id = $2",
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        if deleted.rows_affected() == 1 {
            sqlx::query("UPDATE community_posts SET likes = likes - 1 WHERE id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// List a post's comments with author, oldest first.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>, DbError> {
        self.ensure_post_exists(post_id).await?;

        let rows = sqlx::query(
            r#"
            SELECT
                c.id, c.user_id, c.post_id, c.content, c.created_at,
                u.username, u.first_name, u.last_name, u.profile_image_url
            FROM post_comments c
            INNER JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;

        let comments = rows
            .into_iter()
            .map(|r| CommentWithAuthor {
                comment: Comment {
                    id: r.get("id"),
                    user_id: r.get("user_id"),
                    post_id: r.get("post_id"),
                    content: r.get("content"),
                    created_at: r.get("created_at"),
                },
                author_username: r.get("username"),
                author_first_name: r.get("first_name"),
                author_last_name: r.get("last_name"),
                author_profile_image_url: r.get("profile_image_url"),
            })
            .collect();

        Ok(comments)
    }

    /// Add a comment and bump the post's comment counter transactionally.
    pub async fn create_comment(
        &self,
        user_id: &str,
        post_id: i64,
        content: &str,
    ) -> Result<Comment, DbError> {
        self.ensure_post_exists(post_id).await?;

        let mut tx = self.pool.begin().await?;

        let comment: Comment = sqlx::query_as(
            r#"
            INSERT INTO post_comments (user_id, post_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, post_id, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE community_posts SET comments = comments + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(comment)
    }

    async fn ensure_post_exists(&self, post_id: i64) -> Result<(), DbError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM community_posts WHERE id = $1)")
                .bind(post_id)
                .fetch_one(self.pool)
                .await?;

        if !exists.0 {
            return Err(DbError::NotFound {
                resource: "post",
                id: post_id.to_string(),
            });
        }
        Ok(())
    }
}
