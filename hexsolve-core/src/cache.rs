//! Transposition cache keyed by exact board content

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::board::{Board, BoardKey, Move, Player};
use crate::eval::Outcome;

/// Cached result of a fully searched position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub outcome: Outcome,
    /// `None` when the position was already decided on entry
    pub best_move: Option<Move>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub lookups: u64,
    pub hits: u64,
    pub stores: u64,
}

/// Storage for searched positions. Single-threaded, owned by one search engine.
pub trait TranspositionCache {
    fn lookup(&mut self, board: &Board, to_move: Player) -> Option<CacheEntry>;
    fn store(&mut self, board: &Board, to_move: Player, entry: CacheEntry);
    fn len(&self) -> usize;
    fn clear(&mut self);
    fn stats(&self) -> CacheStats;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    board: BoardKey,
    to_move: Player,
}

impl CacheKey {
    fn new(board: &Board, to_move: Player) -> Self {
        Self {
            board: board.key(),
            to_move,
        }
    }
}

/// Unbounded in-memory cache, no eviction
#[derive(Debug, Default)]
pub struct BoardCache {
    map: FxHashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
}

impl BoardCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranspositionCache for BoardCache {
    fn lookup(&mut self, board: &Board, to_move: Player) -> Option<CacheEntry> {
        self.stats.lookups += 1;
        let entry = self.map.get(&CacheKey::new(board, to_move)).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    fn store(&mut self, board: &Board, to_move: Player, entry: CacheEntry) {
        self.stats.stores += 1;
        self.map.insert(CacheKey::new(board, to_move), entry);
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.stats = CacheStats::default();
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// Cache that remembers nothing, for checking pruning on its own
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl TranspositionCache for NoCache {
    fn lookup(&mut self, _board: &Board, _to_move: Player) -> Option<CacheEntry> {
        None
    }

    fn store(&mut self, _board: &Board, _to_move: Player, _entry: CacheEntry) {}

    fn len(&self) -> usize {
        0
    }

    fn clear(&mut self) {}

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}
