pub mod error;
pub mod evaluator;
pub mod problem;

pub use error::{CoreError, Result};
pub use evaluator::evaluate_query;
pub use problem::{load_seed_file, Difficulty, ProblemSeed};
