//! Recursive minimax with alpha-beta pruning.
//!
//! Scores are always from player one's point of view: `1` player one wins,
//! `-1` player two wins, `0` draw. `±2` are window sentinels only and never
//! appear in a returned result.

use niya_core::{cell_bit, check_win, Board, Mask, Outcome, CELLS};
use serde::{Deserialize, Serialize};

use crate::cache::{position_key, PositionCache};
use crate::stats::SearchStats;

/// Score values
pub const P1_WINS: i8 = 1;
pub const DRAW: i8 = 0;
pub const P1_LOSES: i8 = -1;
pub const INF: i8 = 2;
pub const NEG_INF: i8 = -2;

/// Value of a searched position and how the game ends under best play.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// +1 / 0 / -1 from player one's perspective
    pub score: i8,
    pub outcome: Outcome,
    /// Ply at which the game ends
    pub depth: u8,
}

impl SearchResult {
    #[inline]
    pub const fn new(score: i8, outcome: Outcome, depth: u8) -> Self {
        Self { score, outcome, depth }
    }
}

/// A game state: both occupancy masks, the last cell played and the side to
/// move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Position {
    pub p1: Mask,
    pub p2: Mask,
    pub last_move: u8,
    pub p1_to_move: bool,
}

impl Position {
    /// State after player one opens on `cell`.
    #[inline]
    pub const fn opening(cell: u8) -> Position {
        Position {
            p1: cell_bit(cell),
            p2: 0,
            last_move: cell,
            p1_to_move: false,
        }
    }

    /// State after the side to move claims `cell`. No legality check.
    #[inline]
    pub const fn play(self, cell: u8) -> Position {
        let bit = cell_bit(cell);
        if self.p1_to_move {
            Position {
                p1: self.p1 | bit,
                p2: self.p2,
                last_move: cell,
                p1_to_move: false,
            }
        } else {
            Position {
                p1: self.p1,
                p2: self.p2 | bit,
                last_move: cell,
                p1_to_move: true,
            }
        }
    }

    #[inline]
    pub const fn taken(self) -> Mask {
        self.p1 | self.p2
    }

    /// Moves made so far.
    #[inline]
    pub const fn ply(self) -> u8 {
        self.taken().count_ones() as u8
    }

    /// Occupancy of the player who made the last move.
    #[inline]
    pub const fn last_mover(self) -> Mask {
        if self.p1_to_move {
            self.p2
        } else {
            self.p1
        }
    }

    #[inline]
    pub const fn key(self) -> u64 {
        position_key(self.p1, self.p2, self.last_move, self.p1_to_move)
    }
}

/// Score for a game won by the player who just moved.
#[inline]
const fn last_mover_wins(p1_to_move: bool) -> i8 {
    if p1_to_move {
        P1_LOSES
    } else {
        P1_WINS
    }
}

/// True if a fail-soft value searched in `(alpha, beta)` is the exact value.
///
/// Inside the window it is exact. Outside, it is a bound, except at the
/// extremes: nothing beats a win for player one or undercuts a loss.
#[inline]
pub const fn is_exact(score: i8, alpha: i8, beta: i8) -> bool {
    (alpha < score && score < beta)
        || (score >= beta && score == P1_WINS)
        || (score <= alpha && score == P1_LOSES)
}

/// Minimax over one board, borrowing the cache and statistics of the caller.
pub struct Searcher<'a, C: PositionCache> {
    board: &'a Board,
    /// Cells sharing a plant or poem with each cell
    matches: [Mask; CELLS],
    cache: &'a mut C,
    stats: &'a mut SearchStats,
    prune: bool,
}

impl<'a, C: PositionCache> Searcher<'a, C> {
    pub fn new(board: &'a Board, cache: &'a mut C, stats: &'a mut SearchStats, prune: bool) -> Self {
        Self {
            board,
            matches: board.match_masks(),
            cache,
            stats,
            prune,
        }
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    /// Legal moves in `pos` as a mask.
    #[inline]
    pub fn legal_moves(&self, pos: Position) -> Mask {
        self.matches[pos.last_move as usize] & !pos.taken()
    }

    /// Search `pos`, reached at ply `depth`, within the window `(alpha, beta)`.
    ///
    /// Results strictly inside the window are exact. With pruning on, a
    /// result at or beyond a bound only bounds the true value, and the parent
    /// discards it. Only exact results enter the cache, so a hit is returned
    /// as is.
    pub fn search(&mut self, pos: Position, mut alpha: i8, mut beta: i8, depth: u8) -> SearchResult {
        let key = pos.key();
        if let Some(hit) = self.cache.lookup(key) {
            self.stats.cache_hits += 1;
            return hit;
        }
        self.stats.nodes += 1;

        // 1. Did the previous move win?
        if let Some(outcome) = check_win(pos.last_mover()) {
            let result = SearchResult::new(last_mover_wins(pos.p1_to_move), outcome, depth);
            return self.terminal(key, result);
        }

        // 2. Full board
        if depth as usize == CELLS {
            return self.terminal(key, SearchResult::new(DRAW, Outcome::Draw, CELLS as u8));
        }

        // 3. Blockade: the side to move has nothing matching the last tile
        let mut moves = self.legal_moves(pos);
        if moves == 0 {
            let result = SearchResult::new(last_mover_wins(pos.p1_to_move), Outcome::Blockade, depth);
            return self.terminal(key, result);
        }

        // 4. Recurse, ascending cell order
        let (alpha0, beta0) = (alpha, beta);
        let maximizing = pos.p1_to_move;
        let mut best = SearchResult::new(
            if maximizing { NEG_INF } else { INF },
            Outcome::Draw,
            CELLS as u8,
        );

        while moves != 0 {
            let cell = moves.trailing_zeros() as u8;
            moves &= moves - 1;

            let child = self.search(pos.play(cell), alpha, beta, depth + 1);
            if maximizing {
                if child.score > best.score {
                    best = child;
                }
                alpha = alpha.max(child.score);
            } else {
                if child.score < best.score {
                    best = child;
                }
                beta = beta.min(child.score);
            }

            if self.prune && beta <= alpha {
                self.stats.branches_pruned += moves.count_ones() as u64;
                break;
            }
        }

        if !self.prune || is_exact(best.score, alpha0, beta0) {
            self.cache.insert(key, best);
        } else {
            self.stats.bounds_not_stored += 1;
        }
        best
    }

    #[inline]
    fn terminal(&mut self, key: u64, result: SearchResult) -> SearchResult {
        self.stats.record_terminal(&result);
        self.cache.insert(key, result);
        result
    }
}
