//! Fixed-shape calling interface: plain arrays in, plain arrays out.
//!
//! Each calling thread keeps one lazily allocated [`Solver`], cleared at the
//! start of every solve. Inputs are not validated.

use std::cell::RefCell;

use niya_core::{Board, CELLS};
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::solve::{SolveReport, Solver, OPENINGS};

/// Reply cell reported when phase two was skipped or player two had no reply
pub const NO_MOVE: i8 = -1;

/// Integer-coded solve result.
///
/// Outcomes are [`niya_core::Outcome::index`] values. With replies skipped,
/// the reply moves are [`NO_MOVE`] and scores and outcomes are zero.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SolveRecord {
    pub best_move: i8,
    pub score: i8,
    pub outcome: u8,
    pub game_depth: u8,
    pub reply_moves: [i8; OPENINGS],
    pub reply_scores: [i8; OPENINGS],
    pub reply_outcomes: [u8; OPENINGS],
}

impl From<&SolveReport> for SolveRecord {
    fn from(report: &SolveReport) -> Self {
        let mut record = SolveRecord {
            best_move: report.best_move as i8,
            score: report.score,
            outcome: report.outcome.index(),
            game_depth: report.game_depth,
            reply_moves: [NO_MOVE; OPENINGS],
            reply_scores: [0; OPENINGS],
            reply_outcomes: [0; OPENINGS],
        };
        if let Some(replies) = &report.replies {
            for (i, reply) in replies.iter().enumerate() {
                record.reply_moves[i] = reply.reply.map_or(NO_MOVE, |cell| cell as i8);
                record.reply_scores[i] = reply.score;
                record.reply_outcomes[i] = reply.outcome.index();
            }
        }
        record
    }
}

thread_local! {
    static SOLVER: RefCell<Option<Solver>> = const { RefCell::new(None) };
}

/// Solve the board given by its attribute arrays on this thread's solver.
///
/// Fails only if the transposition table cannot be allocated.
pub fn solve_board(
    plants: &[u8; CELLS],
    poems: &[u8; CELLS],
    analyze_replies: bool,
) -> SolverResult<SolveRecord> {
    let board = Board::new(*plants, *poems);
    SOLVER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let solver = match slot.take() {
            Some(solver) => solver,
            None => Solver::new(SolverConfig::default())?,
        };
        let solver = slot.insert(solver);
        let report = solver.solve_with(&board, analyze_replies);
        Ok(SolveRecord::from(&report))
    })
}

/// Canonical form of the board given by its attribute arrays.
pub fn canonicalize_board(plants: &[u8; CELLS], poems: &[u8; CELLS]) -> ([u8; CELLS], [u8; CELLS]) {
    let canonical = Board::new(*plants, *poems).canonical();
    (canonical.plants, canonical.poems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use niya_core::Outcome;

    #[test]
    fn test_skipped_replies_are_sentinels() {
        let board = Board::standard();
        let record = solve_board(&board.plants, &board.poems, false).unwrap();
        assert_eq!(record.reply_moves, [NO_MOVE; OPENINGS]);
        assert_eq!(record.reply_scores, [0; OPENINGS]);
        assert_eq!(record.reply_outcomes, [0; OPENINGS]);
        assert!(record.best_move >= 0);
        assert!(Outcome::from_index(record.outcome).is_some());
    }

    #[test]
    fn test_no_reply_record() {
        let ids: [u8; 16] = std::array::from_fn(|i| i as u8);
        let record = solve_board(&ids, &ids, true).unwrap();
        assert_eq!(record.best_move, 0);
        assert_eq!(record.score, 1);
        assert_eq!(record.outcome, Outcome::Blockade.index());
        assert_eq!(record.game_depth, 1);
        assert_eq!(record.reply_moves, [NO_MOVE; OPENINGS]);
        assert_eq!(record.reply_scores, [1; OPENINGS]);
        assert_eq!(record.reply_outcomes, [Outcome::Blockade.index(); OPENINGS]);
    }

    #[test]
    fn test_repeated_calls_agree() {
        let board = Board::standard();
        let first = solve_board(&board.plants, &board.poems, true).unwrap();
        let ids: [u8; 16] = std::array::from_fn(|i| i as u8);
        solve_board(&ids, &ids, true).unwrap();
        let again = solve_board(&board.plants, &board.poems, true).unwrap();
        assert_eq!(first, again);
        for (i, &mv) in first.reply_moves.iter().enumerate() {
            assert!((0..16).contains(&mv), "opening #{} reply {}", i, mv);
        }
    }

    #[test]
    fn test_canonicalize_board() {
        let board = Board::standard();
        let (plants, poems) = canonicalize_board(&board.plants, &board.poems);
        assert_eq!((plants, poems), canonicalize_board(&plants, &poems));
        assert_eq!(Board::new(plants, poems), board.canonical());
    }
}
