use crate::cell::Cell;
use crate::error::BoardError;
use crate::rules::Pattern;

pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLUMNS: usize = 50;

// Offsets of the 8 surrounding positions as (row, column) deltas
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Fixed-size grid of cells stored row-major in a flat vector.
///
/// Every coordinate lookup clamps to the nearest edge instead of wrapping, so
/// a cell on the border sees the border itself again where a neighbor would
/// fall outside the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::EmptyDimension { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![Cell::default(); rows * columns],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn clamp_row(&self, row: isize) -> usize {
        row.clamp(0, self.rows as isize - 1) as usize
    }

    pub fn clamp_column(&self, column: isize) -> usize {
        column.clamp(0, self.columns as isize - 1) as usize
    }

    fn index(&self, row: isize, column: isize) -> usize {
        self.clamp_row(row) * self.columns + self.clamp_column(column)
    }

    /// Cell at `(row, column)` after clamping both coordinates onto the board.
    pub fn cell(&self, row: isize, column: isize) -> &Cell {
        &self.cells[self.index(row, column)]
    }

    pub fn cell_mut(&mut self, row: isize, column: isize) -> &mut Cell {
        let index = self.index(row, column);
        &mut self.cells[index]
    }

    pub fn is_alive(&self, row: isize, column: isize) -> bool {
        self.cell(row, column).alive
    }

    pub fn set_alive(&mut self, row: isize, column: isize, alive: bool) {
        self.cell_mut(row, column).alive = alive;
    }

    pub fn toggle(&mut self, row: isize, column: isize) {
        self.cell_mut(row, column).flip();
    }

    /// Number of alive cells among the 8 clamped neighbor positions.
    pub fn neighbor_count(&self, row: usize, column: usize) -> u8 {
        let (row, column) = (row as isize, column as isize);
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dr, dc)| self.is_alive(row + dr, column + dc))
            .count() as u8
    }

    /// Store the current neighbor count in every cell without touching any
    /// alive flag, so the counts all describe the same generation.
    pub fn count_neighbors(&mut self) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let count = self.neighbor_count(row, column);
                self.cells[row * self.columns + column].neighbor_count = count;
            }
        }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Bring the pattern to life anchored at `(row, column)`. Pattern cells
    /// that fall off the board are dropped rather than clamped.
    pub fn stamp(&mut self, pattern: Pattern, row: usize, column: usize) {
        for (dr, dc) in pattern.offsets() {
            let r = row as isize + *dr as isize;
            let c = column as isize + *dc as isize;
            if r < 0 || c < 0 || r >= self.rows as isize || c >= self.columns as isize {
                continue;
            }
            self.cells[r as usize * self.columns + c as usize].revive();
        }
    }
}
