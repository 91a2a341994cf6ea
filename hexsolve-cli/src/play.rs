//! Play command - interactive games against the solver
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - wire the console to stdin/stdout
//! - Level 2: play_session() - replay loop alternating the first mover
//! - Level 3: play_game(), human_turn(), computer_turn()
//! - Level 4: prompting and parsing utilities

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Args;

use hexsolve_core::{Game, Outcome, Player, TranspositionCache};

use crate::display::{render, Symbols};
use crate::SearchArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board side length
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Let the human open the first game (openings alternate afterwards)
    #[arg(long)]
    pub human_first: bool,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Line-oriented prompt/answer channel
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `text` and read one answer line
    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    play_session(&mut console, &args)
}

// ============================================================================
// LEVEL 2 - SESSION
// ============================================================================

fn play_session<R: BufRead, W: Write>(console: &mut Console<R, W>, args: &PlayArgs) -> Result<()> {
    writeln!(console.output, "Welcome to HEX")?;
    writeln!(
        console.output,
        "You connect left and right, the computer connects top and bottom"
    )?;

    let mut first = if args.human_first {
        Player::Human
    } else {
        Player::Computer
    };

    loop {
        let outcome = play_game(console, args, first)?;
        tracing::info!(?outcome, first = %first, "game finished");

        if !ask_again(console)? {
            break;
        }
        first = first.opponent();
        writeln!(console.output)?;
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - GAME AND TURNS
// ============================================================================

fn play_game<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    args: &PlayArgs,
    first: Player,
) -> Result<Outcome> {
    let mut game = Game::new(args.size, first, args.search.config())
        .with_context(|| format!("Cannot start a game on a {} board", args.size))?;
    let symbols = Symbols::for_first(first);

    if first == Player::Computer {
        computer_turn(console, &mut game)?;
        writeln!(console.output)?;
    }

    while !game.is_game_over() {
        human_turn(console, &mut game, symbols)?;
        writeln!(console.output)?;

        if !game.is_game_over() {
            write!(console.output, "{}", render(game.board(), symbols))?;
            writeln!(console.output)?;
            computer_turn(console, &mut game)?;
            writeln!(console.output)?;
        }
    }

    write!(console.output, "{}", render(game.board(), symbols))?;
    let outcome = game.winner();
    let message = match outcome {
        Outcome::ComputerWins => "Computer wins!!",
        Outcome::HumanWins => "Human wins!!",
        Outcome::Draw | Outcome::Undecided => "Draw!!",
    };
    writeln!(console.output, "{}", message)?;

    Ok(outcome)
}

/// Prompt until the human enters a legal move
fn human_turn<R: BufRead, W: Write, C: TranspositionCache>(
    console: &mut Console<R, W>,
    game: &mut Game<C>,
    symbols: Symbols,
) -> Result<()> {
    loop {
        write!(console.output, "{}", render(game.board(), symbols))?;
        let line = console.prompt("\nEnter row and column (starts at 0): ")?;

        let Some((row, col)) = parse_coordinates(&line) else {
            writeln!(console.output, "Please enter two numbers, e.g. \"1 2\"")?;
            continue;
        };

        match game.try_move(Player::Human, row, col) {
            Ok(_) => return Ok(()),
            Err(e) => {
                tracing::debug!(row, col, "rejected move: {}", e);
                writeln!(console.output, "Illegal move: {}", e)?;
            }
        }
    }
}

fn computer_turn<R: BufRead, W: Write, C: TranspositionCache>(
    console: &mut Console<R, W>,
    game: &mut Game<C>,
) -> Result<()> {
    let report = game.computer_move()?;
    writeln!(
        console.output,
        "Calculation time: {:.6} sec",
        report.elapsed.as_secs_f64()
    )?;
    writeln!(console.output, "Moves considered: {}", report.nodes)?;
    if let Some(mv) = report.best_move {
        writeln!(
            console.output,
            "Computer plays: ROW = {} COLUMN = {}",
            mv.row, mv.col
        )?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn ask_again<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<bool> {
    loop {
        let answer = console.prompt("Play again (y/n)? ")?;
        match answer.chars().next() {
            Some('y' | 'Y') => return Ok(true),
            Some('n' | 'N') => return Ok(false),
            _ => continue,
        }
    }
}

/// Two whitespace-separated non-negative integers
fn parse_coordinates(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}
