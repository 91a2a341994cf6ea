//! Square hex board with row/column addressing
//!
//! The board is a rhombus drawn as an N x N grid. Each interior cell touches
//! six others through [`NEIGHBOR_OFFSETS`]. The human connects the left and
//! right columns, the computer connects the top and bottom rows.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::eval::{classify, Outcome};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest supported side length
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported side length (two bits per cell must fit in a `u128`)
pub const MAX_BOARD_SIZE: usize = 8;

/// Neighbor offsets (d_row, d_col) of the hexagonal tiling
/// Index: 0=N, 1=NE, 2=E, 3=S, 4=SW, 5=W
pub const NEIGHBOR_OFFSETS: [(i8, i8); 6] = [
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, 1),   // E
    (1, 0),   // S
    (1, -1),  // SW
    (0, -1),  // W
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// The two sides of the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Connects the left and right columns
    Human,
    /// Connects the top and bottom rows
    Computer,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => f.write_str("human"),
            Player::Computer => f.write_str("computer"),
        }
    }
}

/// Occupancy of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Player::Human),
            Cell::Computer => Some(Player::Computer),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'H',
            Cell::Computer => 'C',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            '.' => Some(Cell::Empty),
            'H' => Some(Cell::Human),
            'C' => Some(Cell::Computer),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Human => Cell::Human,
            Player::Computer => Cell::Computer,
        }
    }
}

/// A stone placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

impl Move {
    pub const fn new(row: usize, col: usize, player: Player) -> Self {
        Self { row, col, player }
    }
}

/// Errors raised while building a board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size {0} outside supported range {}..={}", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    InvalidSize(usize),

    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare { row: usize, found: usize, expected: usize },

    #[error("invalid cell symbol {0:?} (expected '.', 'H' or 'C')")]
    InvalidCell(char),

    #[error("cannot scatter {stones} stones, at most {max} fit on this board")]
    TooManyStones { stones: usize, max: usize },
}

/// Canonical packed form of the board contents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey {
    size: u8,
    packed: u128,
}

// ============================================================================
// BOARD
// ============================================================================

/// N x N grid of cells, row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Scatter `stones` stones at random, alternating computer then human,
    /// retrying until the position is still undecided.
    pub fn random_position<R: Rng + ?Sized>(
        size: usize,
        stones: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut board = Board::new(size)?;
        let max = size * size / 2;
        if stones > max {
            return Err(BoardError::TooManyStones { stones, max });
        }

        let mut slots: Vec<usize> = (0..size * size).collect();
        loop {
            board.cells.fill(Cell::Empty);
            slots.shuffle(rng);

            let mut player = Player::Computer;
            for &index in slots.iter().take(stones) {
                board.cells[index] = player.into();
                player = player.opponent();
            }

            if classify(&board) == Outcome::Undecided {
                return Ok(board);
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.size, self.size)
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    /// Overwrite a cell. Callers validate coordinates.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(self.in_bounds(row, col));
        self.cells[row * self.size + col] = cell;
    }

    #[inline]
    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(move |(index, _)| (index / size, index % size))
    }

    /// On-board hex neighbors of (row, col)
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size as isize;
        let (row, col) = (row as isize, col as isize);
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(d_row, d_col)| {
            let r = row + d_row as isize;
            let c = col + d_col as isize;
            (r >= 0 && r < size && c >= 0 && c < size).then_some((r as usize, c as usize))
        })
    }

    /// Content key: equal boards produce equal keys
    pub fn key(&self) -> BoardKey {
        let packed = self
            .cells
            .iter()
            .fold(0u128, |acc, &cell| (acc << 2) | cell as u128);
        BoardKey {
            size: self.size as u8,
            packed,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(self.size).enumerate() {
            if row > 0 {
                f.write_str("/")?;
            }
            for cell in cells {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse rows separated by `/`, e.g. `"C../.H./..."`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').map(str::trim).collect();
        let mut board = Board::new(rows.len())?;

        for (row, text) in rows.iter().enumerate() {
            let found = text.chars().count();
            if found != board.size {
                return Err(BoardError::NotSquare {
                    row,
                    found,
                    expected: board.size,
                });
            }
            for (col, symbol) in text.chars().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(BoardError::InvalidCell(symbol))?;
                board.set(row, col, cell);
            }
        }

        Ok(board)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_board_size_validation() {
        assert!(Board::new(3).is_ok());
        assert!(Board::new(MAX_BOARD_SIZE).is_ok());
        assert_eq!(Board::new(2), Err(BoardError::InvalidSize(2)));
        assert_eq!(Board::new(9), Err(BoardError::InvalidSize(9)));
    }

    #[test]
    fn test_set_get_and_full() {
        let mut board = Board::new(3).unwrap();
        assert_eq!(board.dimensions(), (3, 3));
        assert!(!board.is_full());

        board.set(1, 2, Cell::Human);
        assert_eq!(board.get(1, 2), Cell::Human);
        assert_eq!(board.count(Cell::Human), 1);
        assert_eq!(board.empty_cells().count(), 8);

        for (row, col) in board.empty_cells().collect::<Vec<_>>() {
            board.set(row, col, Cell::Computer);
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_neighbor_counts() {
        let board = Board::new(4).unwrap();
        // Acute corners have two neighbors, obtuse corners three
        assert_eq!(board.neighbors(0, 0).count(), 2);
        assert_eq!(board.neighbors(3, 3).count(), 2);
        assert_eq!(board.neighbors(0, 3).count(), 3);
        assert_eq!(board.neighbors(3, 0).count(), 3);
        assert_eq!(board.neighbors(1, 1).count(), 6);

        let around: Vec<_> = board.neighbors(1, 1).collect();
        assert!(around.contains(&(0, 2)));
        assert!(around.contains(&(2, 0)));
        assert!(!around.contains(&(0, 0)));
        assert!(!around.contains(&(2, 2)));
    }

    #[test]
    fn test_key_is_content_based() {
        let mut a = Board::new(3).unwrap();
        let mut b = Board::new(3).unwrap();
        a.set(0, 0, Cell::Computer);
        a.set(2, 1, Cell::Human);
        b.set(2, 1, Cell::Human);
        b.set(0, 0, Cell::Computer);
        assert_eq!(a.key(), b.key());
        assert_eq!(a, b);

        b.set(0, 0, Cell::Human);
        assert_ne!(a.key(), b.key());
        assert_ne!(Board::new(3).unwrap().key(), Board::new(4).unwrap().key());
    }

    #[test]
    fn test_largest_board_key_is_distinct() {
        let mut a = Board::new(MAX_BOARD_SIZE).unwrap();
        let b = a.clone();
        a.set(0, 0, Cell::Computer);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "C../.h./..C".parse().unwrap();
        assert_eq!(board.get(0, 0), Cell::Computer);
        assert_eq!(board.get(1, 1), Cell::Human);
        assert_eq!(board.get(2, 2), Cell::Computer);
        assert_eq!(board.to_string(), "C../.H./..C");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "C../.H/...".parse::<Board>(),
            Err(BoardError::NotSquare { row: 1, found: 2, expected: 3 })
        );
        assert_eq!("x../.../...".parse::<Board>(), Err(BoardError::InvalidCell('x')));
        assert_eq!("../..".parse::<Board>(), Err(BoardError::InvalidSize(2)));
    }

    #[test]
    fn test_random_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let board = Board::random_position(4, 6, &mut rng).unwrap();
            assert_eq!(board.count(Cell::Computer), 3);
            assert_eq!(board.count(Cell::Human), 3);
            assert_eq!(classify(&board), Outcome::Undecided);
        }
        assert_eq!(
            Board::random_position(3, 5, &mut rng),
            Err(BoardError::TooManyStones { stones: 5, max: 4 })
        );
    }
}
