//! # Cover Optimizer
//!
//! Finds the cheapest way to cover a set of addresses with a bounded number of
//! binary-prefix ranges.
//!
//! ## Problem
//!
//! Given sorted addresses `p[1..n]`, a range budget `L` and a looseness bound
//! `S`, choose at most `L` ranges, each covering a contiguous block of the
//! sorted addresses with at most `S` free bits, such that the total noise
//! (addresses inside a range that are not in the input) is minimal.
//!
//! ## Algorithm
//!
//! [`DynamicCoverOptimizer`] fills a cost table `A[i][j]`: the least noise
//! needed to cover the first `i` addresses with at most `j` ranges.
//!
//! ```text
//! A[0][j] = 0
//! A[i][0] = unreachable                        (i > 0)
//! A[i][j] = min over k in [s(i), i] of
//!           size(cover(p[k], p[i])) - (i - k + 1) + A[k-1][j-1]
//! ```
//!
//! where `s(i)` is the smallest start whose covering range respects `S`. The
//! covering range only shrinks as `k` moves toward `i`, so every start from
//! `s(i)` on is admissible and `s(i)` can be found by a linear scan or a
//! binary search ([`AdmissibleScan`]). The cover itself is recovered by
//! walking the recorded starts back from `A[n][L]`.
//!
//! - Time complexity is O(n² · L)
//! - Space complexity is O(n · L)

mod dynamic;
mod ranges;
mod table;

#[cfg(test)]
mod tests;

use crate::address::BitWidth;

pub use dynamic::AdmissibleScan;
pub use dynamic::DynamicCoverOptimizer;
pub use ranges::Cover;

/// Errors which can occur while searching for a cover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoverError {
    /// A constraint was given a value it can never satisfy.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The input is not sorted.
    #[error("the input is not sorted")]
    UnsortedInput,

    /// A point does not fit in the configured width.
    #[error("point {point} does not fit in {width}")]
    PointOutOfRange {
        /// The offending point.
        point: u32,
        /// The configured width.
        width: BitWidth,
    },

    /// No cover satisfies both constraints at once.
    #[error("no cover of at most {max_ranges} ranges with at most {max_free_bits} free bits each exists")]
    InfeasibleCover {
        /// The range budget.
        max_ranges: usize,
        /// The per-range free-bit bound.
        max_free_bits: u32,
    },

    /// No start index was admissible for a row of the cost table, although a
    /// single-point range always is.
    #[error("no admissible start for the range ending at point {0}")]
    NoAdmissibleStart(usize),

    /// The cost table did not describe a complete cover while walking back
    /// from its final cell.
    #[error("the cost table has no recorded range for row {row} with budget {budget}")]
    BrokenBacktrack {
        /// The row being reconstructed.
        row: usize,
        /// The remaining range budget.
        budget: usize,
    },
}

/// The two limits a cover must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    max_ranges: usize,
    max_free_bits: u32,
}

impl Constraints {
    /// Creates a new set of constraints.
    ///
    /// ## Parameters
    /// * `max_ranges` - The most ranges the cover may use (`L`), at least 1.
    /// * `max_free_bits` - The most wildcard bits any single range may have
    ///   (`S`). Values at or above the width leave ranges unconstrained.
    pub fn new(max_ranges: usize, max_free_bits: u32) -> Result<Self, CoverError> {
        if max_ranges == 0 {
            return Err(CoverError::InvalidParameter(
                "the range budget must allow at least one range",
            ));
        }

        Ok(Self { max_ranges, max_free_bits })
    }

    /// Returns the range budget.
    pub fn max_ranges(&self) -> usize {
        self.max_ranges
    }

    /// Returns the per-range free-bit bound.
    pub fn max_free_bits(&self) -> u32 {
        self.max_free_bits
    }

    /// Returns `true` if a range with `free_bits` free bits is allowed.
    pub fn admits(&self, free_bits: u8) -> bool {
        u32::from(free_bits) <= self.max_free_bits
    }
}

/// Trait for covering sorted addresses with binary-prefix ranges.
pub trait CoverOptimizer {
    /// Finds a cover of the given points.
    ///
    /// ## Parameters
    /// * `points` - The addresses to cover, sorted ascending. Duplicates are
    ///   allowed.
    ///
    /// ## Returns
    /// The cover, with its ranges in ascending order.
    fn find_cover(&self, points: &[u32]) -> Result<Cover, CoverError>;

    /// Returns the noise of the cover [`CoverOptimizer::find_cover`] would
    /// produce.
    ///
    /// ## Default Implementation
    ///
    /// Builds the full cover and reads its noise. Implementations that can
    /// compute the optimum without reconstructing the ranges may override it.
    fn min_noise(&self, points: &[u32]) -> Result<u64, CoverError> {
        Ok(self.find_cover(points)?.noise())
    }
}

/// Checks that points are sorted ascending and fit in `width`.
pub(crate) fn validate_points(points: &[u32], width: BitWidth) -> Result<(), CoverError> {
    if !points.windows(2).all(|w| w[0] <= w[1]) {
        return Err(CoverError::UnsortedInput);
    }

    // Sorted, so only the largest point needs checking.
    match points.last() {
        Some(&point) if !width.contains(point) => Err(CoverError::PointOutOfRange { point, width }),
        _ => Ok(()),
    }
}
