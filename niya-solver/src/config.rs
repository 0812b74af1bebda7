//! Solver configuration.
//!
//! Defaults: 2^20 table slots probed at most 8 times, alpha-beta cutoffs on,
//! reply analysis on.
//!
//! ```toml
//! table_bits = 20
//! probe_limit = 8
//! prune = true
//! analyze_replies = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};

/// Smallest and largest accepted `table_bits`.
pub const TABLE_BITS_RANGE: std::ops::RangeInclusive<u32> = 4..=28;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// log2 of the transposition table slot count
    pub table_bits: u32,
    /// Maximum consecutive slots scanned per lookup or insert
    pub probe_limit: usize,
    /// Alpha-beta cutoffs; `false` searches full width
    pub prune: bool,
    /// Run the per-opening reply analysis after the opening search
    pub analyze_replies: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            table_bits: 20,
            probe_limit: 8,
            prune: true,
            analyze_replies: true,
        }
    }
}

impl SolverConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> SolverResult<Self> {
        let config: SolverConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> SolverResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> SolverResult<()> {
        if !TABLE_BITS_RANGE.contains(&self.table_bits) {
            return Err(SolverError::Config(format!(
                "table_bits must be in {}..={}, got {}",
                TABLE_BITS_RANGE.start(),
                TABLE_BITS_RANGE.end(),
                self.table_bits
            )));
        }
        if self.probe_limit == 0 || self.probe_limit > 1 << self.table_bits {
            return Err(SolverError::Config(format!(
                "probe_limit must be in 1..={}, got {}",
                1usize << self.table_bits,
                self.probe_limit
            )));
        }
        Ok(())
    }

    /// Number of table slots.
    #[inline]
    pub fn table_slots(&self) -> usize {
        1 << self.table_bits
    }
}
