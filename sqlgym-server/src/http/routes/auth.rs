//! Identity endpoint - upsert-on-read
//!
//! `GET /api/auth/user` resolves the (mocked) caller, creates the user row
//! if absent, refreshes its profile fields otherwise, and returns it.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Full user response (own profile)
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub problems_solved: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            profile_image_url: u.profile_image_url,
            problems_solved: u.problems_solved,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
        }
    }
}

/// GET /api/auth/user - upsert the caller and return the stored user
async fn current_user(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserResponse>, ApiError> {
    let claims = state.identity.claims().ok_or(ApiError::Unauthorized)?;
    let user = UserRepo::new(&state.pool).upsert(&claims).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Auth routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/user", get(current_user))
}
