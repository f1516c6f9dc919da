use std::ops::Index;

use crate::range::{Notation, PrefixRange};

/// An ordered collection of prefix ranges covering a point set.
///
/// Ranges are stored in ascending address order together with the total noise
/// the optimizer charged for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    ranges: Vec<PrefixRange>,
    noise: u64,
}

/// Enables conversion of a Cover instance into an iterator over its ranges.
impl IntoIterator for Cover {
    type Item = PrefixRange;
    type IntoIter = std::vec::IntoIter<PrefixRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

/// Provides indexed access to individual ranges.
impl Index<usize> for Cover {
    type Output = PrefixRange;

    fn index(&self, index: usize) -> &Self::Output {
        &self.ranges[index]
    }
}

impl Cover {
    pub(crate) fn new(ranges: Vec<PrefixRange>, noise: u64) -> Self {
        Self { ranges, noise }
    }

    /// Returns the ranges in ascending order.
    pub fn ranges(&self) -> &[PrefixRange] {
        &self.ranges
    }

    /// Returns the total noise: the summed size of every range minus the
    /// number of points it was chosen to cover.
    pub fn noise(&self) -> u64 {
        self.noise
    }

    /// Returns the number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the cover has no ranges, which only happens for an
    /// empty point set.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns an iterator over the ranges.
    pub fn iter(&self) -> impl Iterator<Item = &PrefixRange> {
        self.ranges.iter()
    }

    /// Returns `true` if any range contains `address`.
    pub fn contains(&self, address: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(address))
    }

    /// Renders every range in the requested notation.
    pub fn render(&self, notation: Notation) -> Vec<String> {
        self.ranges.iter().map(|range| range.render(notation)).collect()
    }
}
