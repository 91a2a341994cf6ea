//! Benchmark command - compare cache and pruning settings
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: generate_positions(), run_variants(), report_results()
//! - Level 3: solve_position() for one variant
//! - Level 4: timing utilities, formatting

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexsolve_core::{
    AlphaBetaAI, Board, Cell, NoCache, Outcome, Player, SearchConfig, SearchReport,
    TranspositionCache,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Board side length
    #[arg(long, default_value = "4")]
    pub size: usize,

    /// Number of random positions to solve
    #[arg(long, default_value = "10")]
    pub positions: usize,

    /// Stones placed on each random position (keep the empty count small:
    /// the full-width variants visit every move order)
    #[arg(long, default_value = "8")]
    pub stones: usize,

    /// Random seed (random positions from entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One search setting under test
#[derive(Clone, Copy, Debug)]
struct Variant {
    name: &'static str,
    cache: bool,
    pruning: bool,
}

const VARIANTS: [Variant; 4] = [
    Variant { name: "Alpha-Beta + Cache", cache: true, pruning: true },
    Variant { name: "Alpha-Beta", cache: false, pruning: true },
    Variant { name: "Minimax + Cache", cache: true, pruning: false },
    Variant { name: "Minimax", cache: false, pruning: false },
];

/// Totals for one variant across all positions
#[derive(Clone, Debug)]
struct BenchmarkResult {
    name: &'static str,
    positions: usize,
    nodes: u64,
    total_time: Duration,
    computer_wins: usize,
}

impl BenchmarkResult {
    fn nodes_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Generate seeded random positions
/// 2. Solve each one with every variant, checking that values agree
/// 3. Report totals per variant
pub fn run(args: BenchmarkArgs) -> Result<()> {
    tracing::info!(
        "Starting benchmark: {} positions, {}x{} board, {} stones",
        args.positions,
        args.size,
        args.size,
        args.stones
    );

    let positions = generate_positions(&args)?;
    let results = run_variants(&positions)?;
    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn generate_positions(args: &BenchmarkArgs) -> Result<Vec<Board>> {
    let mut rng = create_rng(args.seed);
    let positions = (0..args.positions)
        .map(|_| Board::random_position(args.size, args.stones, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(positions)
}

/// Solve every position with every variant
fn run_variants(positions: &[Board]) -> Result<Vec<BenchmarkResult>> {
    let mut results: Vec<BenchmarkResult> = VARIANTS
        .iter()
        .map(|v| BenchmarkResult {
            name: v.name,
            positions: 0,
            nodes: 0,
            total_time: Duration::ZERO,
            computer_wins: 0,
        })
        .collect();

    for (index, position) in positions.iter().enumerate() {
        let to_move = side_to_move(position);
        let mut reference: Option<Outcome> = None;

        for (variant, result) in VARIANTS.iter().zip(results.iter_mut()) {
            let mut board = position.clone();
            let report = solve_position(*variant, &mut board, to_move);

            match reference {
                None => reference = Some(report.outcome),
                Some(expected) if expected != report.outcome => bail!(
                    "{} disagrees on position {} ({}): {:?} vs {:?}",
                    variant.name,
                    index,
                    position,
                    report.outcome,
                    expected
                ),
                Some(_) => {}
            }

            result.positions += 1;
            result.nodes += report.nodes;
            result.total_time += report.elapsed;
            if report.outcome == Outcome::ComputerWins {
                result.computer_wins += 1;
            }
        }

        tracing::debug!(index, %position, %to_move, outcome = ?reference, "position solved");
    }

    Ok(results)
}

fn report_results(results: &[BenchmarkResult], args: &BenchmarkArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - SINGLE SOLVE
// ============================================================================

fn solve_position(variant: Variant, board: &mut Board, to_move: Player) -> SearchReport {
    let config = SearchConfig {
        pruning: variant.pruning,
        ..SearchConfig::default()
    };
    if variant.cache {
        solve_with(AlphaBetaAI::new(config), board, to_move)
    } else {
        solve_with(AlphaBetaAI::with_cache(config, NoCache), board, to_move)
    }
}

fn solve_with<C: TranspositionCache>(
    mut ai: AlphaBetaAI<C>,
    board: &mut Board,
    to_move: Player,
) -> SearchReport {
    ai.best_move(board, to_move)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Random positions alternate stones starting with the computer
fn side_to_move(board: &Board) -> Player {
    if board.count(Cell::Computer) > board.count(Cell::Human) {
        Player::Human
    } else {
        Player::Computer
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

/// Print results as JSON
fn print_json_results(results: &[BenchmarkResult]) {
    #[derive(serde::Serialize)]
    struct JsonBenchmark {
        name: String,
        positions: usize,
        nodes: u64,
        total_time_ms: f64,
        nodes_per_second: f64,
        computer_wins: usize,
    }

    let output: Vec<JsonBenchmark> = results
        .iter()
        .map(|r| JsonBenchmark {
            name: r.name.to_string(),
            positions: r.positions,
            nodes: r.nodes,
            total_time_ms: r.total_time.as_secs_f64() * 1000.0,
            nodes_per_second: r.nodes_per_second(),
            computer_wins: r.computer_wins,
        })
        .collect();

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text table
fn print_text_results(results: &[BenchmarkResult]) {
    println!("\n=== HEXSOLVE Benchmark Results ===\n");
    println!(
        "{:<20} {:>10} {:>14} {:>12} {:>14} {:>14}",
        "Variant", "Positions", "Nodes", "Total Time", "Nodes/s", "Computer Wins"
    );
    println!("{}", "-".repeat(90));

    for r in results {
        println!(
            "{:<20} {:>10} {:>14} {:>12} {:>14.0} {:>14}",
            r.name,
            r.positions,
            r.nodes,
            format_duration(r.total_time),
            r.nodes_per_second(),
            r.computer_wins
        );
    }

    let fastest = results.first();
    let slowest = results.last();
    if let (Some(fast), Some(slow)) = (fastest, slowest) {
        if fast.nodes > 0 {
            println!(
                "\nNode reduction, {} vs {}: {:.1}x",
                fast.name,
                slow.name,
                slow.nodes as f64 / fast.nodes as f64
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
