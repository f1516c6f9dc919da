use crate::address::BitWidth;
use crate::range::{covering_free_bits, PrefixRange};

use super::table::CostTable;
use super::{validate_points, Constraints, Cover, CoverError, CoverOptimizer};

/// Strategy for finding the smallest admissible start `s(i)` of a range
/// ending at point `i`.
///
/// Both strategies rely on the covering range shrinking as the start moves
/// toward `i`, and always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissibleScan {
    /// Scan starts from the first point until one is admissible.
    Linear,
    /// Binary search over the starts.
    #[default]
    Binary,
}

/// Cover optimizer that finds the minimum-noise cover with dynamic
/// programming over a cost table.
#[derive(Debug, Clone)]
pub struct DynamicCoverOptimizer {
    constraints: Constraints,
    width: BitWidth,
    scan: AdmissibleScan,
}

impl CoverOptimizer for DynamicCoverOptimizer {
    /// Finds the cover with the least noise among all covers respecting the
    /// constraints.
    ///
    /// Ties between equally noisy covers are broken toward the tightest last
    /// range, so identical input always yields an identical cover.
    ///
    /// ## Errors
    /// - Unsorted input (`UnsortedInput`)
    /// - Points wider than the width (`PointOutOfRange`)
    /// - No cover within the constraints (`InfeasibleCover`)
    #[tracing::instrument(skip_all, fields(
        points = points.len(),
        max_ranges = self.constraints.max_ranges(),
        max_free_bits = self.constraints.max_free_bits(),
        width = self.width.bits(),
    ))]
    fn find_cover(&self, points: &[u32]) -> Result<Cover, CoverError> {
        validate_points(points, self.width)?;

        // A repeated point neither needs covering twice nor changes any
        // covering range.
        let mut distinct = points.to_vec();
        distinct.dedup();

        // A cover never needs more ranges than there are distinct points.
        let budget = self.constraints.max_ranges().min(distinct.len());

        let table = self.fill_table(&distinct, budget)?;
        let cover = self.backtrack(&table, distinct.len(), budget)?;

        tracing::debug!(
            ranges = cover.len(),
            noise = cover.noise(),
            "found minimum-noise cover"
        );

        Ok(cover)
    }
}

impl DynamicCoverOptimizer {
    /// Creates a new optimizer for the given constraints and address width.
    pub fn new(constraints: Constraints, width: BitWidth) -> Self {
        Self {
            constraints,
            width,
            scan: AdmissibleScan::default(),
        }
    }

    /// Sets the strategy used to find admissible starts.
    pub fn with_scan(mut self, scan: AdmissibleScan) -> Self {
        self.scan = scan;
        self
    }

    /// Returns the constraints this optimizer enforces.
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// Returns the address width this optimizer works with.
    pub fn width(&self) -> BitWidth {
        self.width
    }

    /// Returns the admissible-start strategy.
    pub fn scan(&self) -> AdmissibleScan {
        self.scan
    }

    /// Fills the cost table for sorted, distinct points.
    ///
    /// Row `i` only reads rows before it, so rows are filled in order. For
    /// each row the admissible starts and their ranges are computed once and
    /// shared by every budget column.
    fn fill_table(&self, points: &[u32], max_ranges: usize) -> Result<CostTable, CoverError> {
        let mut table = CostTable::new(points.len(), max_ranges, self.width);

        tracing::debug!(
            rows = points.len() + 1,
            columns = max_ranges + 1,
            "filling cost table"
        );

        for row in 1..=points.len() {
            let end = row - 1;
            let start = self.admissible_start(points, end)?;
            tracing::trace!(row, start = start + 1, "smallest admissible start");

            for first in start..=end {
                let range = PrefixRange::smallest_covering(points[first], points[end], self.width);
                // Distinct points inside the range never outnumber its size.
                let noise = range.size() - (row - first) as u64;

                for budget in 1..=max_ranges {
                    let Some(previous) = table.noise(first, budget - 1) else {
                        continue;
                    };
                    table.relax(row, budget, noise + previous, first + 1, range);
                }
            }
        }

        Ok(table)
    }

    /// Returns the 0-based index of the smallest start whose covering range
    /// up to `points[end]` respects the free-bit bound.
    ///
    /// The range from `end` to itself has no free bits and is always
    /// admissible, so not finding a start means the scan itself is broken.
    fn admissible_start(&self, points: &[u32], end: usize) -> Result<usize, CoverError> {
        let last = points[end];
        let admits = |point: u32| self.constraints.admits(covering_free_bits(point, last));
        let candidates = &points[..=end];

        let start = match self.scan {
            AdmissibleScan::Linear => candidates.iter().position(|&point| admits(point)),
            AdmissibleScan::Binary => {
                let start = candidates.partition_point(|&point| !admits(point));
                (start <= end).then_some(start)
            }
        };

        start.ok_or_else(|| {
            tracing::error!(end, "no admissible start; the single-point range was rejected");
            CoverError::NoAdmissibleStart(end)
        })
    }

    /// Walks the recorded starts back from the final cell and returns the
    /// ranges in ascending order.
    fn backtrack(&self, table: &CostTable, points: usize, budget: usize) -> Result<Cover, CoverError> {
        let Some(noise) = table.noise(points, budget) else {
            tracing::debug!("no cover satisfies the constraints");
            return Err(CoverError::InfeasibleCover {
                max_ranges: self.constraints.max_ranges(),
                max_free_bits: self.constraints.max_free_bits(),
            });
        };

        let mut ranges = Vec::new();
        let (mut row, mut budget) = (points, budget);

        while row > 0 {
            let cell = table.cell(row, budget);
            if budget == 0 || cell.range().is_unset() || cell.start() == 0 || cell.start() > row {
                tracing::error!(row, budget, "cost table backtrack hit an empty cell");
                return Err(CoverError::BrokenBacktrack { row, budget });
            }

            ranges.push(cell.range());
            row = cell.start() - 1;
            budget -= 1;
        }

        ranges.reverse();
        Ok(Cover::new(ranges, noise))
    }
}
