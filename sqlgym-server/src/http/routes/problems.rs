//! Problem endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use sqlgym_core::Difficulty;

use crate::db::repos::{Problem, ProblemRepo, ProblemWithStats};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Problem list query parameters
#[derive(Deserialize)]
pub struct ProblemListParams {
    pub difficulty: Option<String>,
}

/// Problem base response
#[derive(Serialize)]
pub struct ProblemResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub starter_code: String,
    pub tags: Vec<String>,
    pub companies: Vec<String>,
    pub hints: Vec<String>,
    pub created_at: String,
}

impl From<Problem> for ProblemResponse {
    fn from(p: Problem) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            difficulty: p.difficulty,
            starter_code: p.starter_code,
            tags: p.tags.0,
            companies: p.companies.0,
            hints: p.hints.0,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Problem list item: base fields plus derived solve statistics
#[derive(Serialize)]
pub struct ProblemListItem {
    #[serde(flatten)]
    pub problem: ProblemResponse,
    pub solved_count: i64,
    pub is_user_solved: bool,
}

impl From<ProblemWithStats> for ProblemListItem {
    fn from(p: ProblemWithStats) -> Self {
        Self {
            problem: ProblemResponse::from(p.problem),
            solved_count: p.solved_count,
            is_user_solved: p.is_user_solved,
        }
    }
}

/// GET /api/problems - list problems with solve statistics
///
/// The viewer is the mocked identity when one resolves; anonymous callers
/// get `is_user_solved: false` on every row.
async fn list_problems(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProblemListParams>,
) -> Result<Json<Vec<ProblemListItem>>, ApiError> {
    let difficulty = params
        .difficulty
        .as_deref()
        .map(|d| {
            d.parse::<Difficulty>().map_err(|_| {
                ValidationError::InvalidVariant {
                    field: "difficulty",
                    value: d.to_owned(),
                }
            })
        })
        .transpose()?;

    let claims = state.identity.claims();
    let viewer = claims.as_ref().map(|c| c.id.as_str());

    let problems = ProblemRepo::new(&state.pool).list(viewer, difficulty).await?;
    Ok(Json(problems.into_iter().map(ProblemListItem::from).collect()))
}

/// GET /api/problems/{id} - get a single problem's base fields
async fn get_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProblemResponse>, ApiError> {
    let problem = ProblemRepo::new(&state.pool).get(id).await?;
    Ok(Json(ProblemResponse::from(problem)))
}

/// Problem routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/problems", get(list_problems))
        .route("/api/problems/{id}", get(get_problem))
}
