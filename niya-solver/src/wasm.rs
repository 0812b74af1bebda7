//! WASM bindings for niya-solver
//!
//! Exposes the two fixed-shape entry points to a JavaScript host.

use niya_core::CELLS;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api;

fn to_cells(values: &[u8], name: &str) -> Result<[u8; CELLS], JsError> {
    values
        .try_into()
        .map_err(|_| JsError::new(&format!("{} must have {} entries, got {}", name, CELLS, values.len())))
}

/// Solve a board. Returns the integer-coded record as a plain object:
/// { best_move, score, outcome, game_depth, reply_moves, reply_scores, reply_outcomes }
#[wasm_bindgen(js_name = solveBoard)]
pub fn solve_board(plants: &[u8], poems: &[u8], analyze_replies: bool) -> Result<JsValue, JsError> {
    let plants = to_cells(plants, "plants")?;
    let poems = to_cells(poems, "poems")?;
    let record = api::solve_board(&plants, &poems, analyze_replies)?;
    Ok(serde_wasm_bindgen::to_value(&record)?)
}

#[derive(Serialize)]
struct CanonicalBoard {
    plants: [u8; CELLS],
    poems: [u8; CELLS],
}

/// Canonical form of a board as { plants, poems }.
#[wasm_bindgen(js_name = canonicalizeBoard)]
pub fn canonicalize_board(plants: &[u8], poems: &[u8]) -> Result<JsValue, JsError> {
    let plants = to_cells(plants, "plants")?;
    let poems = to_cells(poems, "poems")?;
    let (plants, poems) = api::canonicalize_board(&plants, &poems);
    Ok(serde_wasm_bindgen::to_value(&CanonicalBoard { plants, poems })?)
}
