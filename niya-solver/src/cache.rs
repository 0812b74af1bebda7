//! Position cache for the minimax search.
//!
//! # Key Encoding (64-bit)
//!
//! ```text
//! Bit 0:      side to move (1 = player one)
//! Bits 1-4:   last move (cell 0-15)
//! Bits 5-20:  player two occupancy
//! Bits 21-36: player one occupancy
//! Bit 37:     guard bit, always set so no key is zero
//! ```
//!
//! Zero marks an empty slot in [`TranspositionTable`]. Keys are exact: two
//! positions share a key only if all four fields match.

use std::collections::HashMap;

use niya_core::{Mask, Outcome};

use crate::config::{SolverConfig, TABLE_BITS_RANGE};
use crate::error::{SolverError, SolverResult};
use crate::search::SearchResult;

/// Golden-ratio multiplier for bucket selection.
pub const HASH_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

const GUARD_BIT: u64 = 1 << 37;

/// Pack a game state into a non-zero 64-bit key.
#[inline]
pub const fn position_key(p1: Mask, p2: Mask, last_move: u8, p1_to_move: bool) -> u64 {
    ((p1 as u64) << 21)
        | ((p2 as u64) << 5)
        | (((last_move & 0xF) as u64) << 1)
        | (p1_to_move as u64)
        | GUARD_BIT
}

/// Storage for search results keyed by [`position_key`].
///
/// The search only relies on this contract: a hit returns a result that was
/// inserted under the same key. A cache may forget entries at any time.
pub trait PositionCache {
    fn lookup(&self, key: u64) -> Option<SearchResult>;
    fn insert(&mut self, key: u64, result: SearchResult);
    fn clear(&mut self);
    /// Number of occupied entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy)]
struct Slot {
    /// Full key (0 = empty)
    key: u64,
    result: SearchResult,
}

const EMPTY_SLOT: Slot = Slot {
    key: 0,
    result: SearchResult {
        score: 0,
        outcome: Outcome::Draw,
        depth: 0,
    },
};

/// Fixed-size open-addressed table with bounded linear probing.
///
/// Entries are never deleted individually, so a lookup may stop at the first
/// empty slot. When every probed slot holds another key, an insert overwrites
/// the slot at the initial hash index.
pub struct TranspositionTable {
    slots: Vec<Slot>,
    bits: u32,
    probe_limit: usize,
    occupied: usize,
}

impl TranspositionTable {
    /// Allocate a table of `2^bits` slots, `bits` in [`TABLE_BITS_RANGE`].
    ///
    /// Allocation failure is reported rather than aborting the process.
    pub fn new(bits: u32, probe_limit: usize) -> SolverResult<Self> {
        if !TABLE_BITS_RANGE.contains(&bits) {
            return Err(SolverError::Config(format!(
                "table_bits must be in {}..={}, got {}",
                TABLE_BITS_RANGE.start(),
                TABLE_BITS_RANGE.end(),
                bits
            )));
        }
        let len = 1usize << bits;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .map_err(|source| SolverError::CacheAlloc { slots: len, source })?;
        slots.resize(len, EMPTY_SLOT);
        Ok(Self {
            slots,
            bits,
            probe_limit: probe_limit.clamp(1, len),
            occupied: 0,
        })
    }

    /// Allocate a table with the configured geometry.
    pub fn with_config(config: &SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        Self::new(config.table_bits, config.probe_limit)
    }

    /// Initial slot index for a key: top `bits` bits of the key times the
    /// multiplier.
    #[inline]
    pub fn bucket(&self, key: u64) -> usize {
        (key.wrapping_mul(HASH_MULTIPLIER) >> (64 - self.bits)) as usize
    }

    #[inline]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    /// Total slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn probe_limit(&self) -> usize {
        self.probe_limit
    }
}

impl PositionCache for TranspositionTable {
    #[inline]
    fn lookup(&self, key: u64) -> Option<SearchResult> {
        let idx = self.bucket(key);
        for probe in 0..self.probe_limit {
            let slot = &self.slots[(idx + probe) & self.mask()];
            if slot.key == key {
                return Some(slot.result);
            }
            if slot.key == 0 {
                return None;
            }
        }
        None
    }

    #[inline]
    fn insert(&mut self, key: u64, result: SearchResult) {
        debug_assert_ne!(key, 0);
        let idx = self.bucket(key);
        let mask = self.mask();
        for probe in 0..self.probe_limit {
            let slot = &mut self.slots[(idx + probe) & mask];
            if slot.key == 0 || slot.key == key {
                if slot.key == 0 {
                    self.occupied += 1;
                }
                *slot = Slot { key, result };
                return;
            }
        }
        // Bucket full: replace the initial slot
        self.slots[idx] = Slot { key, result };
    }

    fn clear(&mut self) {
        self.slots.fill(EMPTY_SLOT);
        self.occupied = 0;
    }

    fn len(&self) -> usize {
        self.occupied
    }
}

/// Chained-map cache with no eviction. Used to cross-check the table.
#[derive(Default)]
pub struct MapCache {
    map: HashMap<u64, SearchResult>,
}

impl MapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored entries.
    pub fn iter(&self) -> impl Iterator<Item = (u64, SearchResult)> + '_ {
        self.map.iter().map(|(&k, &v)| (k, v))
    }
}

impl PositionCache for MapCache {
    fn lookup(&self, key: u64) -> Option<SearchResult> {
        self.map.get(&key).copied()
    }

    fn insert(&mut self, key: u64, result: SearchResult) {
        self.map.insert(key, result);
    }

    fn clear(&mut self) {
        self.map.clear();
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
