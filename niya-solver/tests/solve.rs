//! End-to-end solves through the public interface
//!
//! The game value of a board must not depend on which symmetric image is
//! solved, and the integer-coded record must carry the same answer as the
//! typed report.

use niya_core::canonical::{Symmetry, GROUP_ORDER};
use niya_core::{Board, Outcome, OPENING_CELLS};
use niya_solver::{SolveRecord, Solver, SolverConfig, NO_MOVE};
use rand::prelude::*;
use rand::rngs::StdRng;

fn solver() -> Solver {
    let config = SolverConfig {
        table_bits: 18,
        ..SolverConfig::default()
    };
    Solver::new(config).unwrap()
}

#[test]
fn test_value_invariant_under_symmetry() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut solver = solver();
    for _ in 0..2 {
        let board = Board::standard_shuffled(&mut rng);
        let sym = Symmetry::from_index(rng.random_range(0..GROUP_ORDER)).unwrap();

        let base = solver.solve_with(&board, true);
        let image = solver.solve_with(&sym.apply(&board), true);
        let canonical = solver.solve_with(&board.canonical(), true);

        assert_eq!(base.score, image.score, "{:?}", sym);
        assert_eq!(base.score, canonical.score);
        assert_eq!(base.reply_tally(), image.reply_tally());
        assert_eq!(base.reply_tally(), canonical.reply_tally());
    }
}

#[test]
fn test_record_matches_report() {
    let board = Board::standard();
    let report = solver().solve_with(&board, true);
    let record = niya_solver::solve_board(&board.plants, &board.poems, true).unwrap();

    assert_eq!(record, SolveRecord::from(&report));
    assert_eq!(record.best_move, report.best_move as i8);
    assert_eq!(Outcome::from_index(record.outcome), Some(report.outcome));
    for (i, opening) in OPENING_CELLS.iter().enumerate() {
        let reply = report.reply_to(*opening).unwrap();
        assert_ne!(record.reply_moves[i], NO_MOVE);
        assert_eq!(record.reply_scores[i], reply.score);
    }
}

#[test]
fn test_record_json_shape() {
    let board = Board::standard();
    let record = niya_solver::solve_board(&board.plants, &board.poems, false).unwrap();
    let json = serde_json::to_value(&record).unwrap();
    for key in [
        "best_move",
        "score",
        "outcome",
        "game_depth",
        "reply_moves",
        "reply_scores",
        "reply_outcomes",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["reply_moves"].as_array().unwrap().len(), 12);
    assert_eq!(json["reply_moves"][0], -1);
}

#[test]
fn test_malformed_attributes_do_not_panic() {
    // Values outside 0..=3 never match each other
    let plants: [u8; 16] = std::array::from_fn(|i| (i + 4) as u8);
    let poems: [u8; 16] = std::array::from_fn(|i| (i * 37 % 251) as u8);
    let record = niya_solver::solve_board(&plants, &poems, true).unwrap();
    assert_eq!(record.score, 1);
    assert_eq!(record.outcome, Outcome::Blockade.index());
    let (canon_plants, canon_poems) = niya_solver::canonicalize_board(&plants, &poems);
    assert_eq!(canon_plants.len(), 16);
    assert_eq!(canon_poems.len(), 16);
}
