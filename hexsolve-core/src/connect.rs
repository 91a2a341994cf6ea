//! Edge-to-edge connectivity over hex adjacency

use crate::board::{Board, Cell, Player};

/// Cell `i` of the edge `player` starts from
fn start_edge(player: Player, i: usize) -> (usize, usize) {
    match player {
        Player::Human => (i, 0),
        Player::Computer => (0, i),
    }
}

/// Cell `i` of the edge `player` must reach
fn far_edge(player: Player, i: usize, last: usize) -> (usize, usize) {
    match player {
        Player::Human => (i, last),
        Player::Computer => (last, i),
    }
}

fn on_far_edge(player: Player, row: usize, col: usize, last: usize) -> bool {
    match player {
        Player::Human => col == last,
        Player::Computer => row == last,
    }
}

/// Cheap necessary condition: `player` holds a cell on both of its edges
pub fn touches_both_edges(board: &Board, player: Player) -> bool {
    let target = Cell::from(player);
    let last = board.size() - 1;
    let holds = |(row, col): (usize, usize)| board.get(row, col) == target;

    (0..board.size()).any(|i| holds(start_edge(player, i)))
        && (0..board.size()).any(|i| holds(far_edge(player, i, last)))
}

/// True if `player` has a chain of its own stones joining its two edges.
///
/// Depth-first search seeded from every owned start-edge cell. The visited
/// set is shared by all seeds of one check: a cell already explored from an
/// earlier seed cannot reach the far edge from a later one either.
pub fn has_connecting_path(board: &Board, player: Player) -> bool {
    if !touches_both_edges(board, player) {
        return false;
    }

    let target = Cell::from(player);
    let size = board.size();
    let last = size - 1;
    let mut visited = vec![false; size * size];
    let mut stack = Vec::with_capacity(size * size);

    for i in 0..size {
        let (row, col) = start_edge(player, i);
        if board.get(row, col) != target || visited[row * size + col] {
            continue;
        }
        visited[row * size + col] = true;
        stack.push((row, col));

        while let Some((row, col)) = stack.pop() {
            if on_far_edge(player, row, col, last) {
                return true;
            }
            for (n_row, n_col) in board.neighbors(row, col) {
                let index = n_row * size + n_col;
                if !visited[index] && board.get(n_row, n_col) == target {
                    visited[index] = true;
                    stack.push((n_row, n_col));
                }
            }
        }
    }

    false
}
