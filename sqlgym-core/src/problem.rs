//! Problem difficulty and seed-file types.
//!
//! Problems are read-only from the API's perspective; they enter the system
//! through a JSON seed file loaded by `sqlgym seed`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Problem difficulty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Canonical string form as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    /// Parse a difficulty label, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(CoreError::invalid_difficulty(s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem as declared in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemSeed {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub starter_code: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// Load a JSON seed file containing an array of problems.
///
/// # Errors
///
/// Returns an error when the file is missing, unparseable, or contains
/// no problems.
pub fn load_seed_file(path: &Path) -> Result<Vec<ProblemSeed>> {
    if !path.exists() {
        return Err(CoreError::seed_not_found(path));
    }

    let raw = std::fs::read_to_string(path)?;
    let seeds: Vec<ProblemSeed> = serde_json::from_str(&raw)
        .map_err(|e| CoreError::json(path.display().to_string(), e))?;

    if seeds.is_empty() {
        return Err(CoreError::empty_seed(path));
    }

    tracing::debug!(count = seeds.len(), path = %path.display(), "loaded problem seeds");
    Ok(seeds)
}
