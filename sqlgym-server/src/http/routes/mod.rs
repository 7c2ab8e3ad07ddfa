//! Route handlers organized by resource

pub mod auth;
pub mod community;
pub mod health;
pub mod leaderboard;
pub mod problems;
pub mod submissions;
