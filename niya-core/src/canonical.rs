//! Board canonicalization under the Niya symmetry group.
//!
//! Two boards are equivalent when one maps onto the other by
//!
//! - one of the 8 dihedral symmetries of the grid,
//! - a relabeling of the 4 plant symbols and, independently, the 4 poem symbols,
//! - optionally exchanging the plant and poem arrays.
//!
//! That gives 8 × 24 × 24 × 2 = 9,216 transforms. The canonical board is the
//! smallest image under the interleaved ordering of [`Board`]; the search is a
//! plain enumeration.

use crate::{Board, CELLS};

/// Number of transforms in the symmetry group.
pub const GROUP_ORDER: usize = SPATIAL_TRANSFORMS.len() * LABEL_PERMS.len() * LABEL_PERMS.len() * 2;

/// The 8 grid symmetries: `SPATIAL_TRANSFORMS[t][i]` is the source cell that
/// lands on cell `i`.
///
/// Layout:
/// ```text
///    0  1  2  3
///    4  5  6  7
///    8  9 10 11
///   12 13 14 15
/// ```
pub const SPATIAL_TRANSFORMS: [[u8; CELLS]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15], // Identity
    [12, 8, 4, 0, 13, 9, 5, 1, 14, 10, 6, 2, 15, 11, 7, 3], // Rotate 90° clockwise
    [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0], // Rotate 180°
    [3, 7, 11, 15, 2, 6, 10, 14, 1, 5, 9, 13, 0, 4, 8, 12], // Rotate 270° clockwise
    [12, 13, 14, 15, 8, 9, 10, 11, 4, 5, 6, 7, 0, 1, 2, 3], // Reflect top-bottom
    [3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12], // Reflect left-right
    [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15], // Reflect main diagonal
    [15, 11, 7, 3, 14, 10, 6, 2, 13, 9, 5, 1, 12, 8, 4, 0], // Reflect anti-diagonal
];

/// All 24 permutations of the symbols `0..=3`, in lexicographic order.
pub const LABEL_PERMS: [[u8; 4]; 24] = [
    [0, 1, 2, 3], [0, 1, 3, 2], [0, 2, 1, 3], [0, 2, 3, 1], [0, 3, 1, 2], [0, 3, 2, 1],
    [1, 0, 2, 3], [1, 0, 3, 2], [1, 2, 0, 3], [1, 2, 3, 0], [1, 3, 0, 2], [1, 3, 2, 0],
    [2, 0, 1, 3], [2, 0, 3, 1], [2, 1, 0, 3], [2, 1, 3, 0], [2, 3, 0, 1], [2, 3, 1, 0],
    [3, 0, 1, 2], [3, 0, 2, 1], [3, 1, 0, 2], [3, 1, 2, 0], [3, 2, 0, 1], [3, 2, 1, 0],
];

/// Relabel one symbol. Values outside the alphabet pass through unchanged.
#[inline]
fn relabel(perm: &[u8; 4], value: u8) -> u8 {
    perm.get(value as usize).copied().unwrap_or(value)
}

/// One element of the symmetry group.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Symmetry {
    /// Index into [`SPATIAL_TRANSFORMS`].
    pub spatial: u8,
    /// Index into [`LABEL_PERMS`] applied to the new plant array.
    pub plant_perm: u8,
    /// Index into [`LABEL_PERMS`] applied to the new poem array.
    pub poem_perm: u8,
    /// Exchange plants and poems before relabeling.
    pub swap: bool,
}

impl Symmetry {
    pub const IDENTITY: Symmetry = Symmetry {
        spatial: 0,
        plant_perm: 0,
        poem_perm: 0,
        swap: false,
    };

    /// Decode a group element from `0..GROUP_ORDER`.
    ///
    /// Indices follow the enumeration order: spatial transform outermost,
    /// then plant permutation, then poem permutation, then the swap flag.
    pub fn from_index(idx: usize) -> Option<Symmetry> {
        if idx >= GROUP_ORDER {
            return None;
        }
        let perms = LABEL_PERMS.len();
        Some(Symmetry {
            spatial: (idx / (perms * perms * 2)) as u8,
            plant_perm: (idx / (perms * 2) % perms) as u8,
            poem_perm: (idx / 2 % perms) as u8,
            swap: idx % 2 == 1,
        })
    }

    /// Every group element in enumeration order.
    pub fn all() -> impl Iterator<Item = Symmetry> {
        (0..GROUP_ORDER).filter_map(Symmetry::from_index)
    }

    /// Map a board through this transform.
    pub fn apply(self, board: &Board) -> Board {
        let spatial = board.transform_spatial(self.spatial as usize);
        let (plants, poems) = if self.swap {
            (&spatial.poems, &spatial.plants)
        } else {
            (&spatial.plants, &spatial.poems)
        };
        relabeled(
            plants,
            poems,
            &LABEL_PERMS[self.plant_perm as usize],
            &LABEL_PERMS[self.poem_perm as usize],
        )
    }
}

#[inline]
fn relabeled(
    plants: &[u8; CELLS],
    poems: &[u8; CELLS],
    plant_perm: &[u8; 4],
    poem_perm: &[u8; 4],
) -> Board {
    let mut out = Board::new([0; CELLS], [0; CELLS]);
    for cell in 0..CELLS {
        out.plants[cell] = relabel(plant_perm, plants[cell]);
        out.poems[cell] = relabel(poem_perm, poems[cell]);
    }
    out
}

impl Board {
    /// Apply one of the 8 grid symmetries (index into [`SPATIAL_TRANSFORMS`]).
    pub fn transform_spatial(&self, t: usize) -> Board {
        let mapping = &SPATIAL_TRANSFORMS[t];
        let mut out = Board::new([0; CELLS], [0; CELLS]);
        for (dst, &src) in mapping.iter().enumerate() {
            out.plants[dst] = self.plants[src as usize];
            out.poems[dst] = self.poems[src as usize];
        }
        out
    }

    /// The smallest equivalent board over all 9,216 transforms.
    ///
    /// Ties keep the first candidate in enumeration order.
    pub fn canonical(&self) -> Board {
        let mut best = *self;
        for t in 0..SPATIAL_TRANSFORMS.len() {
            let spatial = self.transform_spatial(t);
            for plant_perm in &LABEL_PERMS {
                for poem_perm in &LABEL_PERMS {
                    let candidate = relabeled(&spatial.plants, &spatial.poems, plant_perm, poem_perm);
                    if candidate < best {
                        best = candidate;
                    }
                    let swapped = relabeled(&spatial.poems, &spatial.plants, plant_perm, poem_perm);
                    if swapped < best {
                        best = swapped;
                    }
                }
            }
        }
        best
    }

    /// True if this board is its own canonical form.
    pub fn is_canonical(&self) -> bool {
        self.canonical() == *self
    }

    /// True if no grid symmetry alone produces a smaller board.
    ///
    /// Cheaper than [`Board::is_canonical`]; ignores relabeling and swaps.
    pub fn is_spatially_canonical(&self) -> bool {
        (1..SPATIAL_TRANSFORMS.len()).all(|t| self.transform_spatial(t) >= *self)
    }

    /// All 8 spatial images, identity first.
    pub fn spatial_symmetries(&self) -> [Board; 8] {
        let mut out = [*self; 8];
        for (t, image) in out.iter_mut().enumerate() {
            *image = self.transform_spatial(t);
        }
        out
    }
}
