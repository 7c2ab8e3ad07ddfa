//! Problem seed command
//!
//! Problems are read-only through the API; this is how they get in.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use sqlgym_core::load_seed_file;
use sqlgym_server::db::schema::ensure_schema;
use sqlgym_server::db::{create_pool, ProblemRepo};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Path to a JSON file containing an array of problems
    #[arg(long, short = 'f', default_value = "seeds/problems.json")]
    pub file: PathBuf,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Load problems from the seed file into the database
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let seeds = load_seed_file(&args.file)
        .with_context(|| format!("Failed to load seed file {}", args.file.display()))?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    ensure_schema(&pool)
        .await
        .context("Failed to bootstrap schema")?;

    let repo = ProblemRepo::new(&pool);
    let mut inserted = 0usize;
    for seed in &seeds {
        let problem = repo
            .insert(seed)
            .await
            .with_context(|| format!("Failed to insert problem '{}'", seed.title))?;
        tracing::info!(id = problem.id, title = %problem.title, "seeded problem");
        inserted += 1;
    }

    tracing::info!("Seeded {} problems from {}", inserted, args.file.display());
    Ok(())
}
