//! Exact solver for Niya boards.
//!
//! [`Solver`] finds player one's best opening and, optionally, player two's
//! best reply to every opening. [`api`] wraps it behind plain attribute
//! arrays for hosts that cannot use the typed interface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod search;
pub mod solve;
pub mod stats;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use api::{canonicalize_board, solve_board, SolveRecord, NO_MOVE};
pub use cache::{position_key, MapCache, PositionCache, TranspositionTable};
pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use search::{Position, SearchResult, Searcher};
pub use solve::{ReplyAnalysis, ReplyTally, SolveReport, Solver, OPENINGS};
pub use stats::SearchStats;
