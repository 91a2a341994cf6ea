//! Position classification

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};
use crate::connect::has_connecting_path;

/// Value of a position.
///
/// Ordered `HumanWins < Draw < ComputerWins`: the computer maximizes, the
/// human minimizes, and the variants themselves serve as alpha-beta bounds.
/// `Undecided` sorts last and never takes part in a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    HumanWins,
    Draw,
    ComputerWins,
    Undecided,
}

impl Outcome {
    /// Winning outcome for `player`
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Human => Outcome::HumanWins,
            Player::Computer => Outcome::ComputerWins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::HumanWins => Some(Player::Human),
            Outcome::ComputerWins => Some(Player::Computer),
            Outcome::Draw | Outcome::Undecided => None,
        }
    }

    pub fn is_decided(self) -> bool {
        self != Outcome::Undecided
    }
}

/// Classify a board. The computer's connection is checked first.
pub fn classify(board: &Board) -> Outcome {
    if has_connecting_path(board, Player::Computer) {
        Outcome::ComputerWins
    } else if has_connecting_path(board, Player::Human) {
        Outcome::HumanWins
    } else if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_outcome_ordering() {
        assert!(Outcome::HumanWins < Outcome::Draw);
        assert!(Outcome::Draw < Outcome::ComputerWins);
        assert_eq!(
            Outcome::HumanWins.max(Outcome::ComputerWins),
            Outcome::ComputerWins
        );
        assert_eq!(Outcome::win_for(Player::Human), Outcome::HumanWins);
        assert_eq!(Outcome::ComputerWins.winner(), Some(Player::Computer));
        assert_eq!(Outcome::Draw.winner(), None);
        assert!(!Outcome::Undecided.is_decided());
    }

    #[test]
    fn test_classify_basic() {
        assert_eq!(classify(&Board::new(3).unwrap()), Outcome::Undecided);
        assert_eq!(classify(&"C../C../C..".parse::<Board>().unwrap()), Outcome::ComputerWins);
        assert_eq!(classify(&".../HHH/...".parse::<Board>().unwrap()), Outcome::HumanWins);
        assert_eq!(classify(&"CH./CH./.H.".parse::<Board>().unwrap()), Outcome::Undecided);
    }

    #[test]
    fn test_last_stone_completes_path() {
        // Human one stone short of a left-right chain on a mostly empty board
        let mut board: Board = "..../HHH./..../....".parse().unwrap();
        assert_eq!(classify(&board), Outcome::Undecided);
        board.set(1, 3, Cell::Human);
        assert!(!board.is_full());
        assert_eq!(classify(&board), Outcome::HumanWins);
    }

    #[test]
    fn test_full_boards_have_exactly_one_winner() {
        // Every full hex board is won by exactly one side, so no draw is reachable
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for size in 3..=7 {
            for _ in 0..40 {
                let mut board = Board::new(size).unwrap();
                for row in 0..size {
                    for col in 0..size {
                        let cell = if rng.gen_bool(0.5) { Cell::Human } else { Cell::Computer };
                        board.set(row, col, cell);
                    }
                }
                let human = has_connecting_path(&board, Player::Human);
                let computer = has_connecting_path(&board, Player::Computer);
                assert!(human != computer, "board {board}");
                assert_ne!(classify(&board), Outcome::Draw);
            }
        }
    }
}
