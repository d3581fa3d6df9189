use std::{cmp::Ordering, ops::Add};

/// A (row, column) coordinate on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}
impl Cell {
    #[inline]
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// `self + rhs`, or `None` if either coordinate overflows
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(rhs.row)?,
            column: self.column.checked_add(rhs.column)?,
        })
    }
}
impl From<(usize, usize)> for Cell {
    #[inline]
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}
impl PartialOrd for Cell {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Cell {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major, same order the board is iterated in
        Ord::cmp(&self.row, &other.row).then(Ord::cmp(&self.column, &other.column))
    }
}
impl Add for Cell {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            row: self.row + rhs.row,
            column: self.column + rhs.column,
        }
    }
}
