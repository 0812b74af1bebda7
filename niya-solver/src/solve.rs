//! Top-level solve: player one's best opening, then player two's best reply
//! to every opening.

use niya_core::{cells, Board, CellClass, Outcome, OPENING_CELLS};
use serde::{Deserialize, Serialize};

use crate::cache::{PositionCache, TranspositionTable};
use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::search::{Position, SearchResult, Searcher, INF, NEG_INF, P1_LOSES, P1_WINS};
use crate::stats::SearchStats;

/// Number of legal openings (every non-interior cell)
pub const OPENINGS: usize = OPENING_CELLS.len();

/// Player two's best answer to one opening.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ReplyAnalysis {
    pub opening: u8,
    /// None when the opening leaves player two no legal reply
    pub reply: Option<u8>,
    pub score: i8,
    pub outcome: Outcome,
}

/// Games won by each side across the analysed openings.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ReplyTally {
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub draws: usize,
}

/// Result of one solve.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SolveReport {
    /// Player one's best opening cell
    pub best_move: u8,
    pub score: i8,
    pub outcome: Outcome,
    /// Total moves in the game under best play
    pub game_depth: u8,
    /// One entry per opening in `OPENING_CELLS` order, or None when skipped
    pub replies: Option<[ReplyAnalysis; OPENINGS]>,
}

impl SolveReport {
    pub fn best_move_class(&self) -> CellClass {
        CellClass::of(self.best_move)
    }

    /// Reply analysis for `opening`, if it ran.
    pub fn reply_to(&self, opening: u8) -> Option<&ReplyAnalysis> {
        self.replies.as_ref()?.iter().find(|r| r.opening == opening)
    }

    /// Count of openings won by each side, if replies were analysed.
    pub fn reply_tally(&self) -> Option<ReplyTally> {
        let replies = self.replies.as_ref()?;
        let mut tally = ReplyTally::default();
        for reply in replies {
            match reply.score {
                P1_WINS => tally.p1_wins += 1,
                P1_LOSES => tally.p2_wins += 1,
                _ => tally.draws += 1,
            }
        }
        Some(tally)
    }
}

/// Owns one cache and reuses it across solves.
///
/// The cache is cleared at the start of every solve and shared by both
/// phases of that solve. Not `Sync`; give each worker thread its own solver.
pub struct Solver<C: PositionCache = TranspositionTable> {
    config: SolverConfig,
    cache: C,
    stats: SearchStats,
}

impl Solver<TranspositionTable> {
    /// Allocate a solver with a transposition table sized by `config`.
    pub fn new(config: SolverConfig) -> SolverResult<Self> {
        let cache = TranspositionTable::with_config(&config)?;
        Ok(Self::with_cache(config, cache))
    }
}

impl<C: PositionCache> Solver<C> {
    pub fn with_cache(config: SolverConfig, cache: C) -> Self {
        Self {
            config,
            cache,
            stats: SearchStats::new(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Statistics of the most recent solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Solve `board`, analysing replies as configured.
    pub fn solve(&mut self, board: &Board) -> SolveReport {
        let analyze = self.config.analyze_replies;
        self.solve_with(board, analyze)
    }

    /// Solve `board`. Phase two runs only when `analyze_replies` is set.
    pub fn solve_with(&mut self, board: &Board, analyze_replies: bool) -> SolveReport {
        self.cache.clear();
        self.stats.reset();

        let (best_move, best) = self.best_opening(board);
        log::debug!(
            "best opening {} ({}): score {} by {} at depth {}",
            best_move,
            CellClass::of(best_move),
            best.score,
            best.outcome,
            best.depth
        );

        let replies = if analyze_replies {
            let mut replies = [ReplyAnalysis {
                opening: 0,
                reply: None,
                score: 0,
                outcome: Outcome::Draw,
            }; OPENINGS];
            for (slot, opening) in replies.iter_mut().zip(OPENING_CELLS) {
                *slot = self.replies_for(board, opening);
                log::debug!(
                    "opening {:>2}: reply {:?} score {:+} by {}",
                    opening,
                    slot.reply,
                    slot.score,
                    slot.outcome
                );
            }
            Some(replies)
        } else {
            None
        };

        SolveReport {
            best_move,
            score: best.score,
            outcome: best.outcome,
            game_depth: best.depth,
            replies,
        }
    }

    /// Phase one: search every opening, carrying the window across them.
    fn best_opening(&mut self, board: &Board) -> (u8, SearchResult) {
        let prune = self.config.prune;
        let mut searcher = Searcher::new(board, &mut self.cache, &mut self.stats, prune);
        let (mut alpha, beta) = (NEG_INF, INF);
        let mut best_move = OPENING_CELLS[0];
        let mut best = SearchResult::new(NEG_INF, Outcome::Draw, 16);

        for opening in OPENING_CELLS {
            let result = searcher.search(Position::opening(opening), alpha, beta, 1);
            log::trace!("opening {}: {:?} in ({}, {})", opening, result, alpha, beta);
            if result.score > best.score {
                best = result;
                best_move = opening;
            }
            alpha = alpha.max(result.score);
            if prune && beta <= alpha {
                log::trace!("root cutoff after opening {}", opening);
                break;
            }
        }
        (best_move, best)
    }

    /// Phase two for a single opening on a cleared cache.
    pub fn reply_analysis(&mut self, board: &Board, opening: u8) -> ReplyAnalysis {
        self.cache.clear();
        self.stats.reset();
        self.replies_for(board, opening)
    }

    /// Player two's lowest-scoring reply to `opening`, each reply searched
    /// with a full window. The cache must hold only entries for `board`.
    fn replies_for(&mut self, board: &Board, opening: u8) -> ReplyAnalysis {
        let prune = self.config.prune;
        let mut searcher = Searcher::new(board, &mut self.cache, &mut self.stats, prune);
        let after_opening = Position::opening(opening);

        let mut best: Option<(u8, SearchResult)> = None;
        for reply in cells(board.opening_replies(opening)) {
            let result = searcher.search(after_opening.play(reply), NEG_INF, INF, 2);
            if best.map_or(true, |(_, b)| result.score < b.score) {
                best = Some((reply, result));
            }
        }

        match best {
            Some((reply, result)) => ReplyAnalysis {
                opening,
                reply: Some(reply),
                score: result.score,
                outcome: result.outcome,
            },
            // Player two is blockaded immediately
            None => ReplyAnalysis {
                opening,
                reply: None,
                score: P1_WINS,
                outcome: Outcome::Blockade,
            },
        }
    }
}
