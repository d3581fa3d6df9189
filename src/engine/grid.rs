use super::index::{self, CENTER};
use crate::Cell;

/// A dense, row-major buffer of cell states with toroidal neighbor lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid with every cell dead
    ///
    /// Both dimensions must already be validated as non-zero.
    pub fn dead(rows: usize, columns: usize) -> Self {
        debug_assert!(rows > 0 && columns > 0, "grid dimensions must be positive");
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    /// Creates a grid with only the given cells alive
    pub fn seeded(rows: usize, columns: usize, alive: &[Cell]) -> Self {
        let mut grid = Self::dead(rows, columns);
        for cell in alive {
            grid.set(cell.row, cell.column, true);
        }
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.cells[row * self.columns + column]
    }
    #[inline]
    pub fn set(&mut self, row: usize, column: usize, alive: bool) {
        self.cells[row * self.columns + column] = alive;
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Every cell as `(row, column, alive)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (i / columns, i % columns, alive))
    }

    /// Mutable row slices, used as the write side of an advance
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, bool> {
        self.cells.chunks_exact_mut(self.columns)
    }

    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, bool> {
        use rayon::prelude::*;
        self.cells.par_chunks_exact_mut(self.columns)
    }

    /// Packs the 3x3 block around a cell into the 9-bit layout of the rule index
    ///
    /// Edges wrap around, so the row above row 0 is the last row and the column
    /// left of column 0 is the last column.
    pub fn neighborhood(&self, row: usize, column: usize) -> usize {
        let rows = [wrap_prev(row, self.rows), row, wrap_next(row, self.rows)];
        let columns = [
            wrap_prev(column, self.columns),
            column,
            wrap_next(column, self.columns),
        ];

        let mut bits = 0;
        for (i, &r) in rows.iter().enumerate() {
            for (j, &c) in columns.iter().enumerate() {
                if self.get(r, c) {
                    bits |= 1 << (i * 3 + j);
                }
            }
        }
        bits
    }

    /// Number of live cells in the Moore neighborhood
    #[inline]
    pub fn live_neighbors(&self, row: usize, column: usize) -> u32 {
        (self.neighborhood(row, column) & !CENTER).count_ones()
    }

    /// Writes the next-generation values of `row` into `out`
    pub fn next_row(&self, row: usize, out: &mut [bool]) {
        let index = index::get_gol_index();
        for (column, next) in out.iter_mut().enumerate() {
            *next = index[self.neighborhood(row, column)];
        }
    }
}

#[inline]
fn wrap_prev(i: usize, len: usize) -> usize {
    if i > 0 { i - 1 } else { len - 1 }
}
#[inline]
fn wrap_next(i: usize, len: usize) -> usize {
    if i + 1 < len { i + 1 } else { 0 }
}
