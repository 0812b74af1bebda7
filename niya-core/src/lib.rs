//! Niya game rules with bitmask occupancy.
//!
//! # Board Layout
//!
//! ```text
//!    0  1  2  3
//!    4  5  6  7
//!    8  9 10 11
//!   12 13 14 15
//! ```
//!
//! Every cell holds a tile with two attributes, a plant and a poem, each drawn
//! from the alphabet `0..=3`. The standard deck has each of the 16
//! (plant, poem) combinations exactly once.
//!
//! # Occupancy Encoding (16-bit)
//!
//! ```text
//! Bit i set: the player owns cell i (row-major, bit 0 = top-left)
//! ```
//!
//! A move is legal when the cell is free and shares its plant or its poem
//! with the tile played immediately before it. Player one opens on any of the
//! 12 non-interior cells.

pub mod canonical;

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use canonical::{Symmetry, GROUP_ORDER, LABEL_PERMS, SPATIAL_TRANSFORMS};

/// Number of cells on the board.
pub const CELLS: usize = 16;

/// Number of symbols in each attribute alphabet.
pub const SYMBOLS: u8 = 4;

/// Occupancy bitmask, one bit per cell.
pub type Mask = u16;

/// All 16 cells occupied.
pub const FULL_MASK: Mask = 0xFFFF;

/// Cells player one may open on (the 4 center cells are excluded).
pub const OPENING_CELLS: [u8; 12] = [0, 1, 2, 3, 4, 7, 8, 11, 12, 13, 14, 15];

/// Display names for plant attributes, padded for alignment.
pub const PLANT_NAMES: [&str; 4] = ["MAPL", "CHRY", "PINE", "IRIS"];

/// Display names for poem attributes, padded for alignment.
pub const POEM_NAMES: [&str; 4] = ["SUN ", "BIRD", "RAIN", "FLAG"];

/// Bit for a single cell.
#[inline]
pub const fn cell_bit(cell: u8) -> Mask {
    1 << cell
}

/// Iterate the set cells of a mask in ascending order.
#[inline]
pub fn cells(mut mask: Mask) -> impl Iterator<Item = u8> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let cell = mask.trailing_zeros() as u8;
        mask &= mask - 1;
        Some(cell)
    })
}

/// Why a game ended.
///
/// The discriminants form the closed integer enumeration shared with callers
/// of the solver interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Outcome {
    Row = 0,
    Column = 1,
    MainDiagonal = 2,
    AntiDiagonal = 3,
    Square = 4,
    /// The player to move had no legal move.
    Blockade = 5,
    /// Board filled with no winner.
    Draw = 6,
}

impl Outcome {
    /// All outcomes in discriminant order.
    pub const ALL: [Outcome; 7] = [
        Outcome::Row,
        Outcome::Column,
        Outcome::MainDiagonal,
        Outcome::AntiDiagonal,
        Outcome::Square,
        Outcome::Blockade,
        Outcome::Draw,
    ];

    /// Integer code of this outcome.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Convert an integer code back to an outcome.
    #[inline]
    pub fn from_index(idx: u8) -> Option<Outcome> {
        Self::ALL.get(idx as usize).copied()
    }

    /// Human-readable label.
    pub const fn name(self) -> &'static str {
        match self {
            Outcome::Row => "Row",
            Outcome::Column => "Column",
            Outcome::MainDiagonal => "Main Diagonal",
            Outcome::AntiDiagonal => "Anti-Diagonal",
            Outcome::Square => "Square",
            Outcome::Blockade => "Blockade",
            Outcome::Draw => "Draw",
        }
    }

    /// True if somebody won.
    #[inline]
    pub const fn is_win(self) -> bool {
        !matches!(self, Outcome::Draw)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A winning pattern and the category it reports.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WinPattern {
    pub mask: Mask,
    pub outcome: Outcome,
}

const fn pattern(mask: Mask, outcome: Outcome) -> WinPattern {
    WinPattern { mask, outcome }
}

/// The 19 winning patterns in detection order.
pub const WIN_PATTERNS: [WinPattern; 19] = [
    // Rows
    pattern(0x000F, Outcome::Row),
    pattern(0x00F0, Outcome::Row),
    pattern(0x0F00, Outcome::Row),
    pattern(0xF000, Outcome::Row),
    // Columns
    pattern(0x1111, Outcome::Column),
    pattern(0x2222, Outcome::Column),
    pattern(0x4444, Outcome::Column),
    pattern(0x8888, Outcome::Column),
    // Diagonals: cells 0,5,10,15 and 3,6,9,12
    pattern(0x8421, Outcome::MainDiagonal),
    pattern(0x1248, Outcome::AntiDiagonal),
    // 2x2 squares, by top-left corner
    pattern(0x0033, Outcome::Square), // r0c0
    pattern(0x0066, Outcome::Square), // r0c1
    pattern(0x00CC, Outcome::Square), // r0c2
    pattern(0x0330, Outcome::Square), // r1c0
    pattern(0x0660, Outcome::Square), // r1c1
    pattern(0x0CC0, Outcome::Square), // r1c2
    pattern(0x3300, Outcome::Square), // r2c0
    pattern(0x6600, Outcome::Square), // r2c1
    pattern(0xCC00, Outcome::Square), // r2c2
];

/// Check one player's occupancy against the winning patterns.
///
/// Returns the category of the first pattern fully contained in `mask`.
#[inline]
pub fn check_win(mask: Mask) -> Option<Outcome> {
    for p in &WIN_PATTERNS {
        if mask & p.mask == p.mask {
            return Some(p.outcome);
        }
    }
    None
}

/// Position class of a cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellClass {
    Corner,
    Edge,
    Interior,
}

impl CellClass {
    /// Classify a cell index (0-15).
    pub fn of(cell: u8) -> CellClass {
        let (row, col) = (cell / 4, cell % 4);
        let row_edge = row == 0 || row == 3;
        let col_edge = col == 0 || col == 3;
        match (row_edge, col_edge) {
            (true, true) => CellClass::Corner,
            (false, false) => CellClass::Interior,
            _ => CellClass::Edge,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CellClass::Corner => "corner",
            CellClass::Edge => "edge",
            CellClass::Interior => "interior",
        }
    }
}

impl fmt::Display for CellClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from building a board out of untrusted input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("attribute {value} at cell {cell} is outside 0..=3")]
    AttributeOutOfRange { cell: usize, value: u8 },

    #[error("invalid tile {0:?} (expected two digits, plant then poem)")]
    InvalidTile(String),
}

/// Tile attributes for all 16 cells.
///
/// Boards order lexicographically over the interleaved sequence
/// `(plant0, poem0, plant1, poem1, ..., plant15, poem15)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Board {
    pub plants: [u8; CELLS],
    pub poems: [u8; CELLS],
}

impl Board {
    /// The standard deck: every (plant, poem) pair once, in row-major order.
    pub const STANDARD_TILES: [(u8, u8); CELLS] = {
        let mut tiles = [(0u8, 0u8); CELLS];
        let mut i = 0;
        while i < CELLS {
            tiles[i] = ((i / 4) as u8, (i % 4) as u8);
            i += 1;
        }
        tiles
    };

    /// Build a board from raw attribute arrays. No validation.
    #[inline]
    pub const fn new(plants: [u8; CELLS], poems: [u8; CELLS]) -> Board {
        Board { plants, poems }
    }

    /// Build a board from attribute slices, checking length and alphabet.
    pub fn try_from_attributes(plants: &[u8], poems: &[u8]) -> Result<Board, BoardError> {
        for len in [plants.len(), poems.len()] {
            if len != CELLS {
                return Err(BoardError::CellCount {
                    expected: CELLS,
                    actual: len,
                });
            }
        }
        let mut board = Board::new([0; CELLS], [0; CELLS]);
        for cell in 0..CELLS {
            for value in [plants[cell], poems[cell]] {
                if value >= SYMBOLS {
                    return Err(BoardError::AttributeOutOfRange { cell, value });
                }
            }
            board.plants[cell] = plants[cell];
            board.poems[cell] = poems[cell];
        }
        Ok(board)
    }

    /// Build a board from (plant, poem) tiles.
    pub fn from_tiles(tiles: &[(u8, u8); CELLS]) -> Board {
        let mut board = Board::new([0; CELLS], [0; CELLS]);
        for (cell, &(plant, poem)) in tiles.iter().enumerate() {
            board.plants[cell] = plant;
            board.poems[cell] = poem;
        }
        board
    }

    /// The standard deck laid out in row-major order.
    pub fn standard() -> Board {
        Board::from_tiles(&Self::STANDARD_TILES)
    }

    /// A uniformly random arrangement of the standard deck.
    pub fn standard_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Board {
        let mut tiles = Self::STANDARD_TILES;
        tiles.shuffle(rng);
        Board::from_tiles(&tiles)
    }

    /// Tile at a cell as (plant, poem).
    #[inline]
    pub fn tile(&self, cell: u8) -> (u8, u8) {
        (self.plants[cell as usize], self.poems[cell as usize])
    }

    /// All tiles in cell order.
    pub fn tiles(&self) -> [(u8, u8); CELLS] {
        let mut tiles = [(0u8, 0u8); CELLS];
        for (cell, tile) in tiles.iter_mut().enumerate() {
            *tile = self.tile(cell as u8);
        }
        tiles
    }

    /// True if the board is a permutation of the standard deck.
    pub fn uses_standard_tiles(&self) -> bool {
        let mut seen: Mask = 0;
        for (plant, poem) in self.tiles() {
            if plant >= SYMBOLS || poem >= SYMBOLS {
                return false;
            }
            seen |= cell_bit(plant * SYMBOLS + poem);
        }
        seen == FULL_MASK
    }

    /// True if two cells share a plant or a poem.
    #[inline]
    pub fn matches(&self, a: u8, b: u8) -> bool {
        let (a, b) = (a as usize, b as usize);
        self.plants[a] == self.plants[b] || self.poems[a] == self.poems[b]
    }

    /// For every cell, the mask of cells sharing its plant or poem.
    ///
    /// Each cell matches itself; callers exclude it through the occupancy mask.
    pub fn match_masks(&self) -> [Mask; CELLS] {
        let mut masks = [0; CELLS];
        for (a, mask) in masks.iter_mut().enumerate() {
            for b in 0..CELLS as u8 {
                if self.matches(a as u8, b) {
                    *mask |= cell_bit(b);
                }
            }
        }
        masks
    }

    /// Legal moves after `last_move` with the given cells taken.
    #[inline]
    pub fn legal_moves(&self, taken: Mask, last_move: u8) -> Mask {
        let mut moves = 0;
        for cell in 0..CELLS as u8 {
            if taken & cell_bit(cell) == 0 && self.matches(cell, last_move) {
                moves |= cell_bit(cell);
            }
        }
        moves
    }

    /// Player two's legal replies to an opening on `cell`.
    #[inline]
    pub fn opening_replies(&self, cell: u8) -> Mask {
        self.legal_moves(cell_bit(cell), cell)
    }

    /// Render the grid with attribute names, marking `highlight` with `> <`.
    pub fn render(&self, highlight: Option<u8>) -> String {
        let rule = format!(".{}.\n", "-".repeat(17 * 4));
        let mut out = rule.clone();
        for row in 0..4u8 {
            out.push_str("| ");
            for col in 0..4u8 {
                let cell = row * 4 + col;
                let (plant, poem) = self.tile(cell);
                let plant = PLANT_NAMES.get(plant as usize).copied().unwrap_or("????");
                let poem = POEM_NAMES.get(poem as usize).copied().unwrap_or("????");
                if highlight == Some(cell) {
                    out.push_str(&format!(">{:<2} {}:{}< | ", cell, plant, poem));
                } else {
                    out.push_str(&format!(" {:<2} {}:{}  | ", cell, plant, poem));
                }
            }
            out.push('\n');
            out.push_str(&rule);
        }
        out
    }

    /// Compact form accepted by `FromStr`: 16 two-digit tiles.
    pub fn to_tile_string(&self) -> String {
        self.tiles()
            .iter()
            .map(|(plant, poem)| format!("{}{}", plant, poem))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Ord for Board {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        for cell in 0..CELLS {
            let ord = self.plants[cell]
                .cmp(&other.plants[cell])
                .then(self.poems[cell].cmp(&other.poems[cell]));
            if ord.is_ne() {
                return ord;
            }
        }
        std::cmp::Ordering::Equal
    }
}

impl PartialOrd for Board {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse 16 tiles separated by whitespace or commas, each written as
    /// plant digit followed by poem digit (`"03"` = plant 0, poem 3).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.len() != CELLS {
            return Err(BoardError::CellCount {
                expected: CELLS,
                actual: tokens.len(),
            });
        }

        let mut plants = [0u8; CELLS];
        let mut poems = [0u8; CELLS];
        for (cell, token) in tokens.iter().enumerate() {
            let digits: Vec<u32> = token.chars().filter_map(|c| c.to_digit(10)).collect();
            if digits.len() != 2 || token.chars().count() != 2 {
                return Err(BoardError::InvalidTile(token.to_string()));
            }
            plants[cell] = digits[0] as u8;
            poems[cell] = digits[1] as u8;
        }
        Board::try_from_attributes(&plants, &poems)
    }
}
