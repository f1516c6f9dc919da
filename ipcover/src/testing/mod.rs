//! Helpers for testing cover optimizers.

use crate::address::BitWidth;
use crate::cover::{validate_points, Constraints, Cover, CoverError, CoverOptimizer};
use crate::range::PrefixRange;

/// Reference optimizer that enumerates every partition of the sorted points
/// into at most `L` contiguous groups. Exponential in the number of points,
/// so only suitable for small inputs.
#[derive(Debug, Clone)]
pub struct BruteForceOptimizer {
    constraints: Constraints,
    width: BitWidth,
}

/// The best partition seen so far: its noise and its ranges.
type Best = Option<(u64, Vec<PrefixRange>)>;

impl BruteForceOptimizer {
    /// Creates a new brute-force optimizer.
    pub fn new(constraints: Constraints, width: BitWidth) -> Self {
        Self { constraints, width }
    }

    fn search(
        &self,
        points: &[u32],
        from: usize,
        noise: u64,
        current: &mut Vec<PrefixRange>,
        best: &mut Best,
    ) {
        if from == points.len() {
            if best.as_ref().map_or(true, |(least, _)| noise < *least) {
                *best = Some((noise, current.clone()));
            }
            return;
        }
        if current.len() == self.constraints.max_ranges() {
            return;
        }

        for end in from..points.len() {
            let range = PrefixRange::smallest_covering(points[from], points[end], self.width);
            // Ranges only grow as the group does.
            if !self.constraints.admits(range.free_bits()) {
                break;
            }

            let group_noise = range.size() - (end - from + 1) as u64;
            current.push(range);
            self.search(points, end + 1, noise + group_noise, current, best);
            current.pop();
        }
    }
}

impl CoverOptimizer for BruteForceOptimizer {
    fn find_cover(&self, points: &[u32]) -> Result<Cover, CoverError> {
        validate_points(points, self.width)?;

        let mut distinct = points.to_vec();
        distinct.dedup();

        let mut best = None;
        self.search(&distinct, 0, 0, &mut Vec::new(), &mut best);

        best.map(|(noise, ranges)| Cover::new(ranges, noise))
            .ok_or(CoverError::InfeasibleCover {
                max_ranges: self.constraints.max_ranges(),
                max_free_bits: self.constraints.max_free_bits(),
            })
    }
}

/// Checks every structural property a cover of `points` must have: every
/// point is covered, the budget and free-bit bound hold, and the ranges are
/// in ascending order.
pub fn check_cover(cover: &Cover, points: &[u32], constraints: &Constraints) -> Result<(), String> {
    if cover.len() > constraints.max_ranges() {
        return Err(format!(
            "cover uses {} ranges, budget is {}",
            cover.len(),
            constraints.max_ranges()
        ));
    }

    if let Some(range) = cover.iter().find(|r| !constraints.admits(r.free_bits())) {
        return Err(format!("range {range:?} exceeds the free-bit bound"));
    }

    if let Some(point) = points.iter().find(|&&p| !cover.contains(p)) {
        return Err(format!("point {point} is not covered"));
    }

    if !cover.ranges().windows(2).all(|w| w[0].last() < w[1].first()) {
        return Err(format!("ranges are not in ascending order: {:?}", cover.ranges()));
    }

    Ok(())
}
