//! Rules module for Conway's Game of Life simulation
//!
//! This module holds the fixed B3/S23 transition table and the preset
//! patterns that can be stamped onto the board.
//!
//! Game of Life standard rules:
//! 1. Any live cell with fewer than two live neighbors dies (underpopulation)
//! 2. Any live cell with two or three live neighbors lives (survival)
//! 3. Any live cell with more than three live neighbors dies (overpopulation)
//! 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)

pub mod patterns;

pub use patterns::Pattern;

use crate::board::Board;

/// State a cell takes after one generation.
///
/// Exactly two neighbors keeps whatever the cell already was.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match neighbors {
        3 => true,
        2 => alive,
        _ => false,
    }
}

/// Apply the rule table to every cell using the neighbor counts already
/// stored by [`Board::count_neighbors`]. Returns how many cells changed.
pub fn apply_rules(board: &mut Board) -> usize {
    let mut changed = 0;
    for cell in board.cells_mut() {
        let alive = next_state(cell.alive, cell.neighbor_count);
        if alive != cell.alive {
            changed += 1;
        }
        if alive {
            cell.revive();
        } else {
            cell.die();
        }
    }
    changed
}
