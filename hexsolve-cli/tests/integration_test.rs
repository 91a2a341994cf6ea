//! Integration tests for the HEXSOLVE engine
//!
//! Tests the full stack: board, connectivity, classification, search,
//! transposition cache and game sessions.

use hexsolve_core::{
    classify, has_connecting_path, AlphaBetaAI, Board, Cell, Game, MoveError, NoCache, Outcome,
    Player, SearchConfig, TranspositionCache,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Seeded undecided 4x4 positions with eight empty cells
fn random_positions(count: usize, seed: u64) -> Vec<Board> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| Board::random_position(4, 8, &mut rng).unwrap())
        .collect()
}

fn side_to_move(board: &Board) -> Player {
    if board.count(Cell::Computer) > board.count(Cell::Human) {
        Player::Human
    } else {
        Player::Computer
    }
}

// ============================================================================
// SEARCH PROPERTIES
// ============================================================================

#[test]
fn test_empty_board_computer_first_is_never_worse_than_draw() {
    let mut ai = AlphaBetaAI::new(SearchConfig::default());
    let mut board = Board::new(3).unwrap();
    let report = ai.best_move(&mut board, Player::Computer);

    // Small hex boards are first-player wins
    assert_eq!(report.outcome, Outcome::ComputerWins);
    let mv = report.best_move.unwrap();
    assert_eq!(mv.player, Player::Computer);

    // The chosen move keeps the win
    board.set(mv.row, mv.col, Cell::Computer);
    let reply = ai.search(&mut board, Player::Human);
    assert_eq!(reply.outcome, Outcome::ComputerWins);
}

#[test]
fn test_search_does_not_mutate_board() {
    for board in random_positions(5, 1) {
        let mut working = board.clone();
        let mut ai = AlphaBetaAI::new(SearchConfig::default());
        ai.search_maximizing(&mut working, Outcome::HumanWins, Outcome::ComputerWins, 1);
        assert_eq!(working, board);
        ai.search_minimizing(&mut working, Outcome::HumanWins, Outcome::ComputerWins, 1);
        assert_eq!(working, board);
    }
}

#[test]
fn test_pruning_never_changes_value() {
    for board in random_positions(8, 2) {
        let to_move = side_to_move(&board);
        let mut working = board.clone();

        let mut pruned = AlphaBetaAI::with_cache(SearchConfig::default(), NoCache);
        let mut full = AlphaBetaAI::with_cache(SearchConfig::full_width(), NoCache);

        let a = pruned.search(&mut working, to_move);
        let b = full.search(&mut working, to_move);
        assert_eq!(a.outcome, b.outcome, "position {board}");
        assert!(pruned.nodes() <= full.nodes());
    }
}

#[test]
fn test_cache_never_changes_value_or_move() {
    for board in random_positions(8, 3) {
        let to_move = side_to_move(&board);
        let mut working = board.clone();

        let mut cached = AlphaBetaAI::new(SearchConfig::default());
        let mut uncached = AlphaBetaAI::with_cache(SearchConfig::default(), NoCache);

        assert_eq!(
            cached.search(&mut working, to_move),
            uncached.search(&mut working, to_move),
            "position {board}"
        );
    }
}

#[test]
fn test_cache_shared_across_positions() {
    // One AI reused over many positions, as in a game session
    let mut shared = AlphaBetaAI::new(SearchConfig::default());
    for board in random_positions(6, 4) {
        let to_move = side_to_move(&board);
        let mut working = board.clone();
        let mut fresh = AlphaBetaAI::with_cache(SearchConfig::default(), NoCache);
        assert_eq!(
            shared.search(&mut working, to_move),
            fresh.search(&mut working, to_move)
        );
    }
    assert!(shared.cache().stats().stores > 0);
}

#[test]
fn test_narrow_cache_window_agrees() {
    let config = SearchConfig {
        min_cache_depth: 2,
        max_cache_depth: 4,
        pruning: true,
    };
    for board in random_positions(4, 5) {
        let to_move = side_to_move(&board);
        let mut working = board.clone();
        let mut windowed = AlphaBetaAI::new(config.clone());
        let mut reference = AlphaBetaAI::with_cache(SearchConfig::default(), NoCache);
        assert_eq!(
            windowed.search(&mut working, to_move).outcome,
            reference.search(&mut working, to_move).outcome
        );
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[test]
fn test_last_move_completes_human_path() {
    let mut game = Game::with_ai(
        "C.C./HHH./C.C./....".parse().unwrap(),
        Player::Human,
        AlphaBetaAI::new(SearchConfig::default()),
    );
    assert!(!game.is_game_over());
    assert!(game.apply_move(Player::Human, 1, 3));
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Outcome::HumanWins);
    assert!(!game.board().is_full());
}

#[test]
fn test_classify_never_reports_two_winners() {
    for board in random_positions(20, 6) {
        let human = has_connecting_path(&board, Player::Human);
        let computer = has_connecting_path(&board, Player::Computer);
        assert!(!(human && computer));
        assert_eq!(classify(&board), Outcome::Undecided);
    }
}

// ============================================================================
// GAME BOUNDARY
// ============================================================================

#[test]
fn test_occupied_cell_is_rejected() {
    let mut game = Game::new(3, Player::Computer, SearchConfig::default()).unwrap();
    game.computer_move().unwrap();

    let (row, col) = (0..3)
        .flat_map(|r| (0..3).map(move |c| (r, c)))
        .find(|&(r, c)| game.board().get(r, c) == Cell::Computer)
        .unwrap();

    let before = game.board().clone();
    assert!(!game.apply_move(Player::Human, row, col));
    assert_eq!(
        game.try_move(Player::Human, row, col),
        Err(MoveError::Occupied { row, col })
    );
    assert_eq!(game.board(), &before);
}

#[test]
fn test_full_game_between_two_solvers() {
    // Human side driven by its own solver: perfect play on both sides
    let mut game = Game::new(3, Player::Computer, SearchConfig::default()).unwrap();
    let mut human_ai = AlphaBetaAI::new(SearchConfig::default());

    while !game.is_game_over() {
        game.computer_move().unwrap();
        if game.is_game_over() {
            break;
        }
        let mut board = game.board().clone();
        let mv = human_ai.search(&mut board, Player::Human).best_move.unwrap();
        assert!(game.apply_move(Player::Human, mv.row, mv.col));
    }

    assert_eq!(game.winner(), Outcome::ComputerWins);
}

#[test]
#[ignore = "exhaustive 4x4 solve, slow without optimizations"]
fn test_empty_4x4_computer_first_wins() {
    let mut ai = AlphaBetaAI::new(SearchConfig::default());
    let mut board = Board::new(4).unwrap();
    let report = ai.best_move(&mut board, Player::Computer);
    assert_eq!(report.outcome, Outcome::ComputerWins);
    assert!(report.best_move.is_some());
}
