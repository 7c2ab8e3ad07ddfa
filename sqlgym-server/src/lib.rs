//! sqlgym-server: HTTP backend for a SQL practice platform
//!
//! Stores users, practice problems, and submissions in PostgreSQL and
//! exposes a JSON API for problem listings with per-user solve status,
//! submission recording, a leaderboard, and community discussion.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
