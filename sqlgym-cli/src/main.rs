//! sqlgym CLI - SQL practice platform backend
//!
//! Entry point for the sqlgym command-line tool:
//! - `sqlgym serve` runs the HTTP API server
//! - `sqlgym seed` loads practice problems from a JSON seed file

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "sqlgym",
    author,
    version,
    about = "Backend for a SQL practice platform",
    long_about = "Serves the sqlgym JSON API: practice problems with per-user solve \
                  status, graded submissions, a leaderboard, and community discussion."
)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Load practice problems from a JSON seed file
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up DATABASE_URL and friends from a local .env, if present.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Seed(args) => commands::seed::run_seed(args).await,
    }
}
