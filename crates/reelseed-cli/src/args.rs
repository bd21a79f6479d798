use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "reelseed",
    about = "Generate a deterministic MySQL seed script for the Letterboxd-style film database",
    version,
    after_help = "Examples:\n  reelseed generate\n  reelseed generate --seed 42 --output sql/data.sql\n  reelseed generate --config reelseed.toml --no-transaction\n  reelseed plan"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the seed script
    Generate(GenerateArgs),

    /// Show sections in insertion order with requested and expected row counts
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Config file (defaults to ./reelseed.toml when present)
    #[arg(long, env = "REELSEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output script path
    #[arg(short, long, env = "REELSEED_OUTPUT")]
    pub output: Option<PathBuf>,

    /// JSON array of existing movie ids
    #[arg(long, env = "REELSEED_MOVIE_IDS")]
    pub movie_ids: Option<PathBuf>,

    /// Random seed for deterministic generation
    #[arg(long, env = "REELSEED_SEED")]
    pub seed: Option<u64>,

    /// Omit the START TRANSACTION / COMMIT wrapper
    #[arg(long)]
    pub no_transaction: bool,

    /// Mark exactly one primary row per movie / movie list
    #[arg(long)]
    pub one_primary_per_group: bool,
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Config file (defaults to ./reelseed.toml when present)
    #[arg(long, env = "REELSEED_CONFIG")]
    pub config: Option<PathBuf>,
}
