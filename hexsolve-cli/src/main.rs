//! HEXSOLVE CLI - Command-line interface
//!
//! Commands:
//! - play: Play Hex against the solver in the terminal
//! - solve: Solve a single position
//! - benchmark: Compare cache and pruning settings on random positions

mod benchmark;
mod display;
mod play;
mod solve;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexsolve_core::{SearchConfig, MAX_CACHE_DEPTH, MIN_CACHE_DEPTH};

#[derive(Parser)]
#[command(name = "hexsolve")]
#[command(about = "Perfect-play Hex on small boards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play(play::PlayArgs),
    /// Solve a single position
    Solve(solve::SolveArgs),
    /// Compare cache and pruning settings on random positions
    Benchmark(benchmark::BenchmarkArgs),
}

/// Search settings shared by all commands
#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// First search depth (root = 1) at which positions are cached
    #[arg(long, default_value_t = MIN_CACHE_DEPTH)]
    pub min_cache_depth: u32,

    /// Last search depth at which positions are cached
    #[arg(long, default_value_t = MAX_CACHE_DEPTH)]
    pub max_cache_depth: u32,

    /// Search every node full width (no alpha-beta cutoffs)
    #[arg(long)]
    pub no_pruning: bool,
}

impl SearchArgs {
    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            min_cache_depth: self.min_cache_depth,
            max_cache_depth: self.max_cache_depth,
            pruning: !self.no_pruning,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so prompts on stdout stay readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Solve(args) => solve::run(args),
        Commands::Benchmark(args) => benchmark::run(args),
    }
}
