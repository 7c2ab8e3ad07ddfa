//! Leaderboard endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Default number of leaderboard entries
const DEFAULT_LIMIT: i64 = 50;

/// Leaderboard query parameters
#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<i64>,
}

/// Public user projection - no email
#[derive(Serialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub problems_solved: i64,
}

impl From<User> for LeaderboardEntry {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
            profile_image_url: u.profile_image_url,
            problems_solved: u.problems_solved,
        }
    }
}

/// GET /api/leaderboard - top users by problems solved
async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 500);
    let users = UserRepo::new(&state.pool).leaderboard(limit).await?;
    Ok(Json(users.into_iter().map(LeaderboardEntry::from).collect()))
}

/// Leaderboard routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/leaderboard", get(leaderboard))
}
