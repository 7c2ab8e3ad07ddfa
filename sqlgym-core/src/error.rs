/// Structured error types for sqlgym-core.
///
/// Uses `thiserror` for better API surface and error composition.
/// Binary crates (sqlgym-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sqlgym-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Difficulty label outside the known set
    #[error("Invalid difficulty '{value}': expected Easy, Medium or Hard")]
    InvalidDifficulty { value: String },

    /// Seed file missing on disk
    #[error("Seed file not found: {path:?}")]
    SeedNotFound { path: PathBuf },

    /// Seed file parsed but contained no problems
    #[error("Seed file is empty: {path:?}")]
    EmptySeed { path: PathBuf },
}

/// Result type alias for sqlgym-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid difficulty error
    pub fn invalid_difficulty(value: impl Into<String>) -> Self {
        Self::InvalidDifficulty {
            value: value.into(),
        }
    }

    /// Create a seed-not-found error
    pub fn seed_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SeedNotFound { path: path.into() }
    }

    /// Create an empty seed error
    pub fn empty_seed(path: impl Into<PathBuf>) -> Self {
        Self::EmptySeed { path: path.into() }
    }
}
