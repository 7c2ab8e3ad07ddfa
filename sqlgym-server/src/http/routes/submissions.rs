//! Submission endpoints
//!
//! Submitting grades the query with the placeholder heuristic (no SQL is
//! ever executed) and appends one immutable submission row.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use sqlgym_core::evaluate_query;

use crate::db::repos::{Submission, SubmissionRepo, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::SubmittedQuery;

/// Create submission request
#[derive(Deserialize)]
pub struct CreateSubmissionRequest {
    pub problem_id: i64,
    pub user_code: String,
}

/// Submission response
#[derive(Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub problem_id: i64,
    pub user_id: String,
    pub query: String,
    pub is_correct: bool,
    pub execution_time_ms: Option<i64>,
    pub submitted_at: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            problem_id: s.problem_id,
            user_id: s.user_id,
            query: s.query,
            is_correct: s.is_correct,
            execution_time_ms: s.execution_time_ms,
            submitted_at: s.submitted_at.to_rfc3339(),
        }
    }
}

/// Submission list query parameters
#[derive(Deserialize)]
pub struct SubmissionListParams {
    pub problem_id: Option<i64>,
}

/// POST /api/submissions - grade and record a submission
async fn create_submission(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    let claims = state.identity.claims().ok_or(ApiError::Unauthorized)?;
    let query = SubmittedQuery::new(&req.user_code)?;

    // The user row must exist before the submission FK references it;
    // upsert-on-read covers callers that never hit /api/auth/user.
    UserRepo::new(&state.pool).upsert(&claims).await?;

    let is_correct = evaluate_query(query.as_str());
    // Simulated execution time stands in for a sandbox run.
    let execution_time_ms = rand::thread_rng().gen_range(50..550);

    let submission = SubmissionRepo::new(&state.pool)
        .create(
            req.problem_id,
            &claims.id,
            query.as_str(),
            is_correct,
            execution_time_ms,
        )
        .await?;

    tracing::info!(
        user = %claims.id,
        problem = req.problem_id,
        is_correct,
        "submission recorded"
    );

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(submission))))
}

/// GET /api/user/submissions - the caller's submission history
async fn list_user_submissions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SubmissionListParams>,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    let claims = state.identity.claims().ok_or(ApiError::Unauthorized)?;

    let submissions = SubmissionRepo::new(&state.pool)
        .list_for_user(&claims.id, params.problem_id)
        .await?;

    Ok(Json(
        submissions.into_iter().map(SubmissionResponse::from).collect(),
    ))
}

/// Submission routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/submissions", post(create_submission))
        .route("/api/user/submissions", get(list_user_submissions))
}
