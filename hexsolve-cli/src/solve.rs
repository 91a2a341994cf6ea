//! Solve command - value and best move of a single position

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use hexsolve_core::{
    AlphaBetaAI, Board, CacheStats, NoCache, Player, SearchReport, TranspositionCache,
};

use crate::SearchArgs;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    /// Side length of the empty start board (ignored with --position)
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Start position, rows separated by '/', e.g. "C../.H./..."
    #[arg(long)]
    pub position: Option<String>,

    /// Side to move
    #[arg(long, value_enum, default_value = "computer")]
    pub to_move: Side,

    /// Disable the transposition cache
    #[arg(long)]
    pub no_cache: bool,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Side {
    Human,
    Computer,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Player::Human,
            Side::Computer => Player::Computer,
        }
    }
}

#[derive(Serialize)]
struct SolveOutput {
    position: String,
    report: SearchReport,
    cache: CacheStats,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run solve command
pub fn run(args: SolveArgs) -> Result<()> {
    let mut board = load_board(&args)?;
    let to_move = Player::from(args.to_move);
    let config = args.search.config();

    tracing::info!(position = %board, %to_move, ?config, "solving");

    let output = if args.no_cache {
        solve_with(AlphaBetaAI::with_cache(config, NoCache), &mut board, to_move)
    } else {
        solve_with(AlphaBetaAI::new(config), &mut board, to_move)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text(&output);
    }

    Ok(())
}

fn load_board(args: &SolveArgs) -> Result<Board> {
    match &args.position {
        Some(text) => text
            .parse::<Board>()
            .with_context(|| format!("Invalid position: {}", text)),
        None => Board::new(args.size)
            .with_context(|| format!("Invalid board size: {}", args.size)),
    }
}

fn solve_with<C: TranspositionCache>(
    mut ai: AlphaBetaAI<C>,
    board: &mut Board,
    to_move: Player,
) -> SolveOutput {
    let report = ai.best_move(board, to_move);
    SolveOutput {
        position: board.to_string(),
        report,
        cache: ai.cache().stats(),
    }
}

fn print_text(output: &SolveOutput) {
    let report = &output.report;
    println!("Position:         {}", output.position);
    println!("To move:          {}", report.player);
    println!("Value:            {:?}", report.outcome);
    match report.best_move {
        Some(mv) => println!("Best move:        ROW = {} COLUMN = {}", mv.row, mv.col),
        None => println!("Best move:        none (position already decided)"),
    }
    println!("Moves considered: {}", report.nodes);
    println!("Calculation time: {:.3} ms", report.elapsed_ms());
    println!(
        "Cache:            {} entries, {} hits / {} lookups",
        report.cache_entries, output.cache.hits, output.cache.lookups
    );
}
