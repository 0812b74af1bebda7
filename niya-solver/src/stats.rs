//! Search statistics tracking.

use std::time::{Duration, Instant};

use niya_core::Outcome;

use crate::search::SearchResult;

/// Counters collected during one solve.
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Positions searched (cache misses)
    pub nodes: u64,

    /// Positions answered by the cache
    pub cache_hits: u64,

    /// Positions where the game had already ended
    pub terminal_positions: u64,

    /// Breakdown of terminal outcomes
    pub p1_wins: u64,
    pub p2_wins: u64,
    pub draws: u64,
    pub blockades: u64,

    /// Sibling moves skipped after a cutoff
    pub branches_pruned: u64,

    /// Bounded results kept out of the cache
    pub bounds_not_stored: u64,

    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Zero every counter and restart the clock.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record a terminal position outcome
    pub fn record_terminal(&mut self, result: &SearchResult) {
        self.terminal_positions += 1;
        match result.score {
            1 => self.p1_wins += 1,
            -1 => self.p2_wins += 1,
            _ => self.draws += 1,
        }
        if result.outcome == Outcome::Blockade {
            self.blockades += 1;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|s| s.elapsed()).unwrap_or_default()
    }

    /// Searched positions per second since the last reset.
    pub fn nodes_per_sec(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.nodes as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Share of visits answered by the cache, in percent.
    pub fn hit_rate(&self) -> f64 {
        let visits = self.nodes + self.cache_hits;
        if visits > 0 {
            100.0 * self.cache_hits as f64 / visits as f64
        } else {
            0.0
        }
    }

    /// Log the final summary at info level.
    pub fn log_summary(&self, cache_len: usize) {
        log::info!(
            "searched {} positions in {:.2?} ({:.0}/s), cache hits {} ({:.1}%), {} entries stored",
            self.nodes,
            self.elapsed(),
            self.nodes_per_sec(),
            self.cache_hits,
            self.hit_rate(),
            cache_len,
        );
        log::info!(
            "terminals: {} (p1={} p2={} draw={} blockade={}), pruned {} branches, {} bounds not stored",
            self.terminal_positions,
            self.p1_wins,
            self.p2_wins,
            self.draws,
            self.blockades,
            self.branches_pruned,
            self.bounds_not_stored,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_terminal() {
        let mut stats = SearchStats::new();
        stats.record_terminal(&SearchResult::new(1, Outcome::Row, 7));
        stats.record_terminal(&SearchResult::new(-1, Outcome::Blockade, 4));
        stats.record_terminal(&SearchResult::new(0, Outcome::Draw, 16));
        assert_eq!(stats.terminal_positions, 3);
        assert_eq!((stats.p1_wins, stats.p2_wins, stats.draws), (1, 1, 1));
        assert_eq!(stats.blockades, 1);
    }

    #[test]
    fn test_reset() {
        let mut stats = SearchStats::new();
        stats.nodes = 10;
        stats.cache_hits = 30;
        assert!((stats.hit_rate() - 75.0).abs() < 1e-9);
        stats.reset();
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }
}
