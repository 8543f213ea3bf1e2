//! Board geometry.
//!
//! The board is a 4x4 grid stored row-major. The 12 perimeter cells carry a
//! symbol and the 4 interior cells are empty:
//!
//! ```text
//!  0 orange   1 grapes   2 bell      3 watermelon
//!  4 luck     5 -        6 -         7 star
//!  8 bar      9 -       10 -        11 77
//! 12 orange  13 grapes  14 bell     15 watermelon
//! ```
//!
//! The light walks the perimeter clockwise starting at the top-left corner.

use super::{Symbol, BOARD_CELLS, BOARD_SIDE, RING_LENGTH};

/// Symbol (if any) on each board cell.
pub const BOARD_LAYOUT: [Option<Symbol>; BOARD_CELLS] = [
    Some(Symbol::Orange),
    Some(Symbol::Grapes),
    Some(Symbol::Bell),
    Some(Symbol::Watermelon),
    Some(Symbol::Luck),
    None,
    None,
    Some(Symbol::Star),
    Some(Symbol::Bar),
    None,
    None,
    Some(Symbol::SevenSeven),
    Some(Symbol::Orange),
    Some(Symbol::Grapes),
    Some(Symbol::Bell),
    Some(Symbol::Watermelon),
];

/// Board cells in the order the light visits them.
pub const CHASE_SEQUENCE: [usize; RING_LENGTH] = [0, 1, 2, 3, 7, 11, 15, 14, 13, 12, 8, 4];

/// Walk the perimeter of a `side` x `side` row-major grid clockwise from the
/// top-left corner.
pub fn perimeter_walk(side: usize) -> Vec<usize> {
    if side == 0 {
        return Vec::new();
    }
    if side == 1 {
        return vec![0];
    }
    let last = side - 1;
    let mut cells = Vec::with_capacity(4 * last);
    // Top row, left to right
    cells.extend(0..side);
    // Right column, top to bottom
    cells.extend((1..side).map(|row| row * side + last));
    // Bottom row, right to left
    cells.extend((0..last).rev().map(|col| last * side + col));
    // Left column, bottom to top
    cells.extend((1..last).rev().map(|row| row * side));
    cells
}

/// Board cell lit when the light has advanced `position` times.
pub fn ring_cell(position: usize) -> usize {
    CHASE_SEQUENCE[position % RING_LENGTH]
}

/// Symbol printed on a board cell, `None` for interior or out-of-range cells.
pub fn symbol_at(cell: usize) -> Option<Symbol> {
    BOARD_LAYOUT.get(cell).copied().flatten()
}

/// 1-based `(row, col)` grid position of a board cell.
pub fn cell_position(cell: usize) -> (usize, usize) {
    (cell / BOARD_SIDE + 1, cell % BOARD_SIDE + 1)
}

/// Board cells carrying `symbol`. Most symbols appear twice.
pub fn cells_for(symbol: Symbol) -> impl Iterator<Item = usize> {
    BOARD_LAYOUT
        .iter()
        .enumerate()
        .filter(move |(_, cell)| **cell == Some(symbol))
        .map(|(index, _)| index)
}
