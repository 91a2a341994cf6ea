//! Game session: validated move application around one board and one AI

use crate::ai::{AlphaBetaAI, SearchConfig};
use crate::board::{Board, BoardError, Move, Player};
use crate::cache::{BoardCache, TranspositionCache};
use crate::eval::{classify, Outcome};
use crate::stats::SearchReport;

/// Rejected move request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("({row}, {col}) is off the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("the game is already over")]
    GameOver,
}

/// One game. Only moves that pass validation ever reach the board.
pub struct Game<C = BoardCache> {
    board: Board,
    ai: AlphaBetaAI<C>,
    to_move: Player,
}

impl Game<BoardCache> {
    /// Empty board of side `size`
    pub fn new(size: usize, first: Player, config: SearchConfig) -> Result<Self, BoardError> {
        Ok(Self::with_ai(Board::new(size)?, first, AlphaBetaAI::new(config)))
    }
}

impl<C: TranspositionCache> Game<C> {
    /// Continue from an existing position
    pub fn with_ai(board: Board, to_move: Player, ai: AlphaBetaAI<C>) -> Self {
        Self { board, ai, to_move }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ai(&self) -> &AlphaBetaAI<C> {
        &self.ai
    }

    /// Side expected to move next
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Place a stone for `player`; the board is untouched on error
    pub fn try_move(&mut self, player: Player, row: usize, col: usize) -> Result<Move, MoveError> {
        if !self.board.in_bounds(row, col) {
            return Err(MoveError::OutOfBounds {
                row,
                col,
                size: self.board.size(),
            });
        }
        if !self.board.is_empty_at(row, col) {
            return Err(MoveError::Occupied { row, col });
        }

        self.board.set(row, col, player.into());
        self.to_move = player.opponent();
        Ok(Move::new(row, col, player))
    }

    /// `try_move` reduced to success or failure
    pub fn apply_move(&mut self, player: Player, row: usize, col: usize) -> bool {
        self.try_move(player, row, col).is_ok()
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_decided()
    }

    /// Current classification, `Undecided` while play continues
    pub fn winner(&self) -> Outcome {
        classify(&self.board)
    }

    /// Search for and play the computer's best move
    pub fn computer_move(&mut self) -> Result<SearchReport, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }

        let report = self.ai.best_move(&mut self.board, Player::Computer);
        let mv = report.best_move.ok_or(MoveError::GameOver)?;
        self.try_move(Player::Computer, mv.row, mv.col)?;

        tracing::info!(row = mv.row, col = mv.col, outcome = ?report.outcome, "computer plays");
        Ok(report)
    }
}
