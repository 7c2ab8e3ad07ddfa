//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses
//! - Mocked identity resolution at the edge

pub mod error;
pub mod identity;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use identity::MockIdentityProvider;
pub use server::{build_router, run_server, AppState, ServerConfig};
