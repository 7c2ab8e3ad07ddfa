//! Community endpoints - posts, likes, comments

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::repos::{Comment, CommentWithAuthor, CommunityRepo, Post, PostWithAuthor, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::PostContent;

/// Public author projection embedded in posts and comments
#[derive(Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Create post request
#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub code_snippet: Option<String>,
}

/// Post response
#[derive(Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: String,
    pub content: String,
    pub code_snippet: Option<String>,
    pub likes: i64,
    pub comments: i64,
    pub created_at: String,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            content: p.content,
            code_snippet: p.code_snippet,
            likes: p.likes,
            comments: p.comments,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Post with author response
#[derive(Serialize)]
pub struct PostWithAuthorResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub user: AuthorResponse,
}

impl From<PostWithAuthor> for PostWithAuthorResponse {
    fn from(p: PostWithAuthor) -> Self {
        let user = AuthorResponse {
            id: p.post.user_id.clone(),
            username: p.author_username,
            first_name: p.author_first_name,
            last_name: p.author_last_name,
            profile_image_url: p.author_profile_image_url,
        };
        Self {
            post: PostResponse::from(p.post),
            user,
        }
    }
}

/// Create comment request
#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Comment response
#[derive(Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub user_id: String,
    pub post_id: i64,
    pub content: String,
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            post_id: c.post_id,
            content: c.content,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Comment with author response
#[derive(Serialize)]
pub struct CommentWithAuthorResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub user: AuthorResponse,
}

impl From<CommentWithAuthor> for CommentWithAuthorResponse {
    fn from(c: CommentWithAuthor) -> Self {
        let user = AuthorResponse {
            id: c.comment.user_id.clone(),
            username: c.author_username,
            first_name: c.author_first_name,
            last_name: c.author_last_name,
            profile_image_url: c.author_profile_image_url,
        };
        Self {
            comment: CommentResponse::from(c.comment),
            user,
        }
    }
}

/// GET /api/community/posts - all posts with authors
async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PostWithAuthorResponse>>, ApiError> {
    let posts = CommunityRepo::new(&state.pool).list_posts().await?;
    Ok(Json(
        posts.into_iter().map(PostWithAuthorResponse::from).collect(),
    ))
}

/// POST /api/community/posts - create a post
async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let claims = state.identity.claims().ok_or(ApiError::Unauthorized)?;
    let content = PostContent::new(&req.content)?;

    UserRepo::new(&state.pool).upsert(&claims).await?;

    let post = CommunityRepo::new(&state.pool)
        .create_post(&claims.id, content.as_str(), req.code_snippet.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// POST /api/community/posts/{id}/like - like a post
async fn like_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let claims = state.identity.claims().ok_or(ApiError::Unauthorized)?;

    UserRepo::new(&state.pool).upsert(&claims).await?;
    CommunityRepo::new(&state.pool)
        .like_post(&claims.id, post_id)
        .await?;

    Ok(Json(json!({ "message": "post liked" })))
}

/// DELETE /api/community/posts/{id}/like - remove a like
async fn unlike_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let claims = state.identity.claims().ok_or(ApiError::Unauthorized)?;

    CommunityRepo::new(&state.pool)
        .unlike_post(&claims.id, post_id)
        .await?;

    Ok(Json(json!({ "message": "post unliked" })))
}

/// GET /api/community/posts/{id}/comments - a post's comments with authors
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentWithAuthorResponse>>, ApiError> {
    let comments = CommunityRepo::new(&state.pool).list_comments(post_id).await?;
    Ok(Json(
        comments
            .into_iter()
            .map(CommentWithAuthorResponse::from)
            .collect(),
    ))
}

/// POST /api/community/posts/{id}/comments - add a comment
async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let claims = state.identity.claims().ok_or(ApiError::Unauthorized)?;
    let content = PostContent::new(&req.content)?;

    UserRepo::new(&state.pool).upsert(&claims).await?;

    let comment = CommunityRepo::new(&state.pool)
        .create_comment(&claims.id, post_id, content.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// Community routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/community/posts", get(list_posts).post(create_post))
        .route(
            "/api/community/posts/{id}/like",
            post(like_post).delete(unlike_post),
        )
        .route(
            "/api/community/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
}
