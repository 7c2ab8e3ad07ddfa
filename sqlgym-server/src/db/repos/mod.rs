//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - Uses transactions for multi-step operations

pub mod community;
pub mod problems;
pub mod submissions;
pub mod users;

pub use community::{Comment, CommentWithAuthor, CommunityRepo, Post, PostWithAuthor};
pub use problems::{Problem, ProblemRepo, ProblemWithStats};
pub use submissions::{Submission, SubmissionRepo};
pub use users::{User, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
