//! Console rendering of the board
//!
//! Each row is shifted one column right of the previous one so the grid
//! reads as a hex rhombus:
//!
//! ```text
//! ------
//! \x| | \
//!  \ |o| \
//!   \ | | \
//!    ------
//! ```

use hexsolve_core::{Board, Cell, Player};

/// Characters used for each side; whoever moves first plays `x`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbols {
    pub computer: char,
    pub human: char,
}

impl Symbols {
    pub fn for_first(first: Player) -> Self {
        match first {
            Player::Computer => Self { computer: 'x', human: 'o' },
            Player::Human => Self { computer: 'o', human: 'x' },
        }
    }

    fn of(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => ' ',
            Cell::Human => self.human,
            Cell::Computer => self.computer,
        }
    }
}

/// Render the board, two characters per cell
pub fn render(board: &Board, symbols: Symbols) -> String {
    let size = board.size();
    let rule = "-".repeat(size * 2);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    for row in 0..size {
        out.push_str(&" ".repeat(row));
        out.push('\\');
        for col in 0..size {
            if col != 0 {
                out.push('|');
            }
            out.push(symbols.of(board.get(row, col)));
        }
        out.push_str("\\\n");
    }
    out.push_str(&" ".repeat(size));
    out.push_str(&rule);
    out.push('\n');

    out
}
