//! Exhaustive alpha-beta AI with a depth-windowed transposition cache

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Move, Player};
use crate::cache::{BoardCache, CacheEntry, TranspositionCache};
use crate::eval::{classify, Outcome};
use crate::stats::{SearchReport, Stopwatch};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Shallowest cached depth; no transpositions can occur above it
pub const MIN_CACHE_DEPTH: u32 = 3;

/// Deepest cached depth; below it recomputing beats a lookup
pub const MAX_CACHE_DEPTH: u32 = 16;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// First depth (root = 1) at which positions are cached
    pub min_cache_depth: u32,
    /// Last depth at which positions are cached
    pub max_cache_depth: u32,
    /// Alpha-beta cutoffs; when off every node is searched full width
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_cache_depth: MIN_CACHE_DEPTH,
            max_cache_depth: MAX_CACHE_DEPTH,
            pruning: true,
        }
    }
}

impl SearchConfig {
    /// Plain minimax, no cutoffs
    pub fn full_width() -> Self {
        Self {
            pruning: false,
            ..Self::default()
        }
    }

    pub fn caches_at(&self, depth: u32) -> bool {
        (self.min_cache_depth..=self.max_cache_depth).contains(&depth)
    }
}

/// Value of a searched position and the move that achieves it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// `None` when the position was decided on entry
    pub best_move: Option<Move>,
}

// ============================================================================
// MOVE / UNDO
// ============================================================================

/// A stone placed for the lifetime of the guard, removed again on drop
struct Placement<'a> {
    board: &'a mut Board,
    row: usize,
    col: usize,
}

impl<'a> Placement<'a> {
    fn new(board: &'a mut Board, row: usize, col: usize, player: Player) -> Self {
        debug_assert!(board.is_empty_at(row, col));
        board.set(row, col, player.into());
        Self { board, row, col }
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.set(self.row, self.col, Cell::Empty);
    }
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Perfect-play searcher. The computer maximizes, the human minimizes.
///
/// The cache lives as long as the AI, so one AI per game session reuses
/// positions across moves.
pub struct AlphaBetaAI<C = BoardCache> {
    config: SearchConfig,
    cache: C,
    nodes: u64,
}

impl AlphaBetaAI<BoardCache> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_cache(config, BoardCache::new())
    }
}

impl Default for AlphaBetaAI<BoardCache> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<C: TranspositionCache> AlphaBetaAI<C> {
    pub fn with_cache(config: SearchConfig, cache: C) -> Self {
        Self {
            config,
            cache,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn into_cache(self) -> C {
        self.cache
    }

    /// Nodes visited since the last [`take_nodes`](Self::take_nodes)
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Read and reset the node counter
    pub fn take_nodes(&mut self) -> u64 {
        std::mem::take(&mut self.nodes)
    }

    /// Solve `board` with `to_move` to play, using the full window
    pub fn search(&mut self, board: &mut Board, to_move: Player) -> Evaluation {
        match to_move {
            Player::Computer => {
                self.search_maximizing(board, Outcome::HumanWins, Outcome::ComputerWins, 1)
            }
            Player::Human => {
                self.search_minimizing(board, Outcome::HumanWins, Outcome::ComputerWins, 1)
            }
        }
    }

    /// Solve and report timing and node count. `best_move` is `None` only
    /// when the position is already decided.
    pub fn best_move(&mut self, board: &mut Board, to_move: Player) -> SearchReport {
        let mut watch = Stopwatch::start_new();
        let evaluation = self.search(board, to_move);
        let elapsed = watch.stop();

        let report = SearchReport {
            player: to_move,
            outcome: evaluation.outcome,
            best_move: evaluation.best_move,
            nodes: self.take_nodes(),
            elapsed,
            cache_entries: self.cache.len(),
        };

        tracing::debug!(
            player = %to_move,
            outcome = ?report.outcome,
            nodes = report.nodes,
            cache_entries = report.cache_entries,
            elapsed_ms = report.elapsed_ms(),
            "search finished"
        );

        report
    }

    /// Computer to move: raise `alpha` toward `ComputerWins`
    pub fn search_maximizing(
        &mut self,
        board: &mut Board,
        alpha: Outcome,
        beta: Outcome,
        depth: u32,
    ) -> Evaluation {
        self.search_node(board, Player::Computer, alpha, beta, depth)
    }

    /// Human to move: lower `beta` toward `HumanWins`
    pub fn search_minimizing(
        &mut self,
        board: &mut Board,
        alpha: Outcome,
        beta: Outcome,
        depth: u32,
    ) -> Evaluation {
        self.search_node(board, Player::Human, alpha, beta, depth)
    }

    fn search_node(
        &mut self,
        board: &mut Board,
        mover: Player,
        alpha: Outcome,
        beta: Outcome,
        depth: u32,
    ) -> Evaluation {
        self.nodes += 1;

        let cacheable = self.config.caches_at(depth);
        if cacheable {
            if let Some(entry) = self.cache.lookup(board, mover) {
                tracing::trace!(depth, outcome = ?entry.outcome, "cache hit");
                return Evaluation {
                    outcome: entry.outcome,
                    best_move: entry.best_move,
                };
            }
        }

        let mut evaluation = Evaluation {
            outcome: classify(board),
            best_move: None,
        };

        // Fail-hard: a result on or outside a narrowed window is only a bound
        let mut exact = true;
        if evaluation.outcome == Outcome::Undecided {
            evaluation = self.expand(board, mover, alpha, beta, depth);
            let full_window = alpha == Outcome::HumanWins && beta == Outcome::ComputerWins;
            let inside = alpha < evaluation.outcome && evaluation.outcome < beta;
            exact = !self.config.pruning || full_window || inside;
        }

        if cacheable && exact {
            self.cache.store(
                board,
                mover,
                CacheEntry {
                    outcome: evaluation.outcome,
                    best_move: evaluation.best_move,
                },
            );
        }

        evaluation
    }

    /// Try every empty cell in row-major order. Ties keep the earliest
    /// move, so a lost position reports its first legal move.
    fn expand(
        &mut self,
        board: &mut Board,
        mover: Player,
        alpha: Outcome,
        beta: Outcome,
        depth: u32,
    ) -> Evaluation {
        let (mut alpha, mut beta) = if self.config.pruning {
            (alpha, beta)
        } else {
            (Outcome::HumanWins, Outcome::ComputerWins)
        };
        let mut best_move = None;
        let size = board.size();

        'rows: for row in 0..size {
            for col in 0..size {
                if self.config.pruning && alpha >= beta {
                    break 'rows;
                }
                if !board.is_empty_at(row, col) {
                    continue;
                }

                let child = {
                    let mut placed = Placement::new(board, row, col, mover);
                    let evaluation = match mover {
                        Player::Computer => {
                            self.search_minimizing(&mut placed, alpha, beta, depth + 1)
                        }
                        Player::Human => {
                            self.search_maximizing(&mut placed, alpha, beta, depth + 1)
                        }
                    };
                    evaluation.outcome
                };

                let mv = Move::new(row, col, mover);
                match mover {
                    Player::Computer => {
                        if child > alpha || (child == alpha && best_move.is_none()) {
                            alpha = child;
                            best_move = Some(mv);
                        }
                    }
                    Player::Human => {
                        if child < beta || (child == beta && best_move.is_none()) {
                            beta = child;
                            best_move = Some(mv);
                        }
                    }
                }
            }
        }

        let outcome = match mover {
            Player::Computer => alpha,
            Player::Human => beta,
        };
        Evaluation { outcome, best_move }
    }
}

// ============================================================================
// TESTS
// ============================================================================
