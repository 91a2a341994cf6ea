//! HEXSOLVE Core - Hex solver and game engine
//!
//! This crate provides the core logic for perfect-play Hex on small boards:
//! - Board geometry (N x N rhombus with six-neighbor hex adjacency)
//! - Edge-to-edge connectivity checks
//! - Position classification
//! - Exhaustive alpha-beta search with a transposition cache
//! - Search instrumentation
//! - Game sessions with validated move application

pub mod board;
pub mod connect;
pub mod eval;
pub mod cache;
pub mod ai;
pub mod stats;
pub mod game;

// Re-exports for convenient access
pub use board::{Board, BoardError, BoardKey, Cell, Move, Player, MAX_BOARD_SIZE, MIN_BOARD_SIZE, NEIGHBOR_OFFSETS};
pub use connect::{has_connecting_path, touches_both_edges};
pub use eval::{classify, Outcome};
pub use cache::{BoardCache, CacheEntry, CacheStats, NoCache, TranspositionCache};
pub use ai::{AlphaBetaAI, Evaluation, SearchConfig, MAX_CACHE_DEPTH, MIN_CACHE_DEPTH};
pub use stats::{SearchReport, Stopwatch};
pub use game::{Game, MoveError};
