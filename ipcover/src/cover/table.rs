//! Flat cost table for the dynamic cover optimizer.
//!
//! Rows are indexed by the number of leading points considered (`0..=n`) and
//! columns by the range budget (`0..=L`). Each cell stores the three values
//! the recurrence produces together: the least noise, the first point of the
//! last range, and that range.

use crate::address::BitWidth;
use crate::range::PrefixRange;

/// Noise stored in cells that no cover can reach.
const UNREACHABLE: u64 = u64::MAX;

/// A single cell of the cost table.
#[derive(Debug, Clone, Copy)]
pub(super) struct Cell {
    /// Least noise for this (rows, budget) pair, or [`UNREACHABLE`].
    noise: u64,
    /// 1-based index of the first point covered by the last range.
    start: usize,
    /// The last range of the optimal cover.
    range: PrefixRange,
}

impl Cell {
    pub(super) fn start(&self) -> usize {
        self.start
    }

    pub(super) fn range(&self) -> PrefixRange {
        self.range
    }
}

/// Cost table stored as a single contiguous arena of cells.
#[derive(Debug)]
pub(super) struct CostTable {
    cells: Vec<Cell>,
    columns: usize,
}

impl CostTable {
    /// Creates a table for `points` points and a budget of `max_ranges`, with
    /// the base cases filled in: covering zero points is free for any budget,
    /// and every other cell starts out unreachable.
    pub(super) fn new(points: usize, max_ranges: usize, width: BitWidth) -> Self {
        let columns = max_ranges + 1;
        let unreachable = Cell {
            noise: UNREACHABLE,
            start: 0,
            range: PrefixRange::unset(width),
        };

        let mut cells = vec![unreachable; (points + 1) * columns];
        for cell in &mut cells[..columns] {
            cell.noise = 0;
        }

        Self { cells, columns }
    }

    #[inline]
    fn index(&self, row: usize, budget: usize) -> usize {
        row * self.columns + budget
    }

    /// Returns the cell for the first `row` points and a budget of `budget`.
    pub(super) fn cell(&self, row: usize, budget: usize) -> &Cell {
        &self.cells[self.index(row, budget)]
    }

    /// Returns the least noise for the cell, or `None` if it is unreachable.
    pub(super) fn noise(&self, row: usize, budget: usize) -> Option<u64> {
        let noise = self.cell(row, budget).noise;
        (noise != UNREACHABLE).then_some(noise)
    }

    /// Records a candidate for the cell if it is no worse than the current
    /// one. Candidates are offered in increasing `start` order, so on ties the
    /// later start, and with it the tighter last range, wins.
    pub(super) fn relax(
        &mut self,
        row: usize,
        budget: usize,
        noise: u64,
        start: usize,
        range: PrefixRange,
    ) {
        let index = self.index(row, budget);
        let cell = &mut self.cells[index];
        if noise <= cell.noise {
            *cell = Cell { noise, start, range };
        }
    }
}
