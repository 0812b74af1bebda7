//! Rule invariance under the board symmetry group
//!
//! Every transform must map legal play on a board to legal play on its
//! image, so the solver may work on the canonical representative:
//! - Tile matching between cells
//! - Legal move sets
//! - Opening cells
//! - Win detection

use niya_core::canonical::{Symmetry, GROUP_ORDER, SPATIAL_TRANSFORMS};
use niya_core::{cell_bit, cells, check_win, Board, Mask, CELLS, OPENING_CELLS};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Where each source cell lands under spatial transform `t`.
fn destinations(t: usize) -> [u8; CELLS] {
    let mut dest = [0; CELLS];
    for (dst, &src) in SPATIAL_TRANSFORMS[t].iter().enumerate() {
        dest[src as usize] = dst as u8;
    }
    dest
}

fn map_mask(mask: Mask, dest: &[u8; CELLS]) -> Mask {
    cells(mask).fold(0, |acc, cell| acc | cell_bit(dest[cell as usize]))
}

fn random_symmetry(rng: &mut StdRng) -> Symmetry {
    let idx = rng.random_range(0..GROUP_ORDER);
    Symmetry::from_index(idx).unwrap()
}

#[test]
fn test_matching_preserved() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let board = Board::standard_shuffled(&mut rng);
        let sym = random_symmetry(&mut rng);
        let image = sym.apply(&board);
        let dest = destinations(sym.spatial as usize);
        for a in 0..CELLS as u8 {
            for b in 0..CELLS as u8 {
                assert_eq!(
                    board.matches(a, b),
                    image.matches(dest[a as usize], dest[b as usize]),
                    "{:?} cells {} {}",
                    sym,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_legal_moves_preserved() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let board = Board::standard_shuffled(&mut rng);
        let sym = random_symmetry(&mut rng);
        let image = sym.apply(&board);
        let dest = destinations(sym.spatial as usize);

        let last = rng.random_range(0..CELLS as u8);
        let taken = rng.random::<Mask>() | cell_bit(last);
        let moves = board.legal_moves(taken, last);
        let image_moves = image.legal_moves(map_mask(taken, &dest), dest[last as usize]);
        assert_eq!(map_mask(moves, &dest), image_moves);
    }
}

#[test]
fn test_opening_cells_preserved() {
    for t in 0..SPATIAL_TRANSFORMS.len() {
        let dest = destinations(t);
        let mut mapped: Vec<u8> = OPENING_CELLS.iter().map(|&c| dest[c as usize]).collect();
        mapped.sort_unstable();
        assert_eq!(mapped, OPENING_CELLS.to_vec(), "transform {}", t);
    }
}

#[test]
fn test_win_detection_preserved() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let mask: Mask = rng.random();
        for t in 0..SPATIAL_TRANSFORMS.len() {
            let mapped = map_mask(mask, &destinations(t));
            assert_eq!(check_win(mask).is_some(), check_win(mapped).is_some());
        }
    }
}

#[test]
fn test_tile_string_survives_canonicalization() {
    let mut rng = StdRng::seed_from_u64(4);
    let board = Board::standard_shuffled(&mut rng);
    let canonical = board.canonical();
    let parsed: Board = canonical.to_tile_string().parse().unwrap();
    assert_eq!(parsed, canonical);
    assert!(parsed.uses_standard_tiles());
}
