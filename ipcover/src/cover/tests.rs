//! Property testing for the dynamic cover optimizer: every cover it returns
//! must be valid, and its noise must match an exhaustive search on inputs
//! small enough to enumerate.

use crate::address::BitWidth;
use crate::cover::{AdmissibleScan, Constraints, CoverError, CoverOptimizer, DynamicCoverOptimizer};
use crate::range::{covering_free_bits, Notation};
use crate::testing::{check_cover, BruteForceOptimizer};
use proptest::prelude::*;
use test_case::test_case;

/// Width used for generated inputs: small enough that ranges collide often.
const SMALL_WIDTH: u8 = 6;

/// Most points in a generated input checked against the exhaustive search.
const MAX_BRUTE_FORCE_POINTS: usize = 9;

fn width(bits: u8) -> BitWidth {
    BitWidth::new(bits).unwrap()
}

fn optimizer(max_ranges: usize, max_free_bits: u32, bits: u8) -> DynamicCoverOptimizer {
    DynamicCoverOptimizer::new(Constraints::new(max_ranges, max_free_bits).unwrap(), width(bits))
}

/// Generates sorted points at the small width, duplicates included.
fn small_points(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0..(1u32 << SMALL_WIDTH), 0..=max_len).prop_map(|mut points| {
        points.sort_unstable();
        points
    })
}

proptest! {
    #[test]
    fn prop_cover_is_valid(
        points in small_points(24),
        max_ranges in 1..6usize,
        max_free_bits in 0..=SMALL_WIDTH as u32,
    ) {
        let constraints = Constraints::new(max_ranges, max_free_bits).unwrap();
        let optimizer = DynamicCoverOptimizer::new(constraints, width(SMALL_WIDTH));

        match optimizer.find_cover(&points) {
            Ok(cover) => {
                if let Err(message) = check_cover(&cover, &points, &constraints) {
                    return Err(TestCaseError::fail(message));
                }
            }
            Err(CoverError::InfeasibleCover { .. }) => {
                // Infeasible only when more ranges than allowed are needed.
                if points.len() <= MAX_BRUTE_FORCE_POINTS {
                    let exhaustive = BruteForceOptimizer::new(constraints, width(SMALL_WIDTH));
                    prop_assert!(exhaustive.find_cover(&points).is_err());
                }
            }
            Err(error) => return Err(TestCaseError::fail(error.to_string())),
        }
    }

    #[test]
    fn prop_matches_exhaustive_search(
        points in small_points(MAX_BRUTE_FORCE_POINTS),
        max_ranges in 1..5usize,
        max_free_bits in 0..=SMALL_WIDTH as u32,
    ) {
        let constraints = Constraints::new(max_ranges, max_free_bits).unwrap();
        let dynamic = DynamicCoverOptimizer::new(constraints, width(SMALL_WIDTH));
        let exhaustive = BruteForceOptimizer::new(constraints, width(SMALL_WIDTH));

        prop_assert_eq!(dynamic.min_noise(&points), exhaustive.min_noise(&points));
    }

    #[test]
    fn prop_scans_agree(
        points in prop::collection::vec(any::<u32>(), 1..40),
        max_ranges in 1..8usize,
        max_free_bits in 0..=32u32,
    ) {
        let mut points = points;
        points.sort_unstable();

        let linear = optimizer(max_ranges, max_free_bits, 32).with_scan(AdmissibleScan::Linear);
        let binary = optimizer(max_ranges, max_free_bits, 32).with_scan(AdmissibleScan::Binary);

        prop_assert_eq!(linear.find_cover(&points), binary.find_cover(&points));
    }

    /// The covering range from start `k` to a fixed end never gains free bits
    /// as `k` moves toward the end; both admissible-start scans rely on it.
    #[test]
    fn prop_covering_free_bits_monotone(points in prop::collection::vec(any::<u32>(), 1..64)) {
        let mut points = points;
        points.sort_unstable();

        for (end, &last) in points.iter().enumerate() {
            let free_bits: Vec<u8> = points[..=end]
                .iter()
                .map(|&point| covering_free_bits(point, last))
                .collect();

            prop_assert!(free_bits.windows(2).all(|w| w[0] >= w[1]), "{:?}", free_bits);
            prop_assert_eq!(free_bits[end], 0);
        }
    }

    #[test]
    fn prop_deterministic(points in small_points(24), max_ranges in 1..6usize) {
        let optimizer = optimizer(max_ranges, SMALL_WIDTH as u32, SMALL_WIDTH);

        let first = optimizer.find_cover(&points);
        let second = optimizer.find_cover(&points);
        prop_assert_eq!(first, second);
    }
}

/// The worked example: the low three bits of 10.0.0.3, .5, .6 and .7.
const WORKED_EXAMPLE: [u32; 4] = [3, 5, 6, 7];

/// With enough budget every point gets its own exact range.
#[test_case(4; "budget equals points")]
#[test_case(6; "budget exceeds points")]
fn test_worked_example_exact(max_ranges: usize) {
    let cover = optimizer(max_ranges, 8, 3).find_cover(&WORKED_EXAMPLE).unwrap();

    assert_eq!(cover.noise(), 0);
    assert_eq!(
        cover.render(Notation::Slash),
        vec!["0.0.0.3/3", "0.0.0.5/3", "0.0.0.6/3", "0.0.0.7/3"]
    );
}

/// Two ranges: 3 stays exact and 5..=7 share `1**`, which also holds the
/// unlisted 4. Every other split costs more.
#[test]
fn test_worked_example_two_ranges() {
    let cover = optimizer(2, 8, 3).find_cover(&WORKED_EXAMPLE).unwrap();

    assert_eq!(cover.noise(), 1);
    assert_eq!(cover.render(Notation::Wildcard), vec!["011", "1**"]);
    assert_eq!(cover.render(Notation::Slash), vec!["0.0.0.3/3", "0.0.0.4/1"]);
}

#[test_case(3, 8, &["011", "101", "11*"], 0; "three ranges")]
#[test_case(1, 8, &["***"], 4; "one range")]
#[test_case(2, 2, &["011", "1**"], 1; "two ranges, two free bits")]
#[test_case(3, 1, &["011", "101", "11*"], 0; "three ranges, one free bit")]
fn test_worked_example_budgets(max_ranges: usize, max_free_bits: u32, ranges: &[&str], noise: u64) {
    let cover = optimizer(max_ranges, max_free_bits, 3)
        .find_cover(&WORKED_EXAMPLE)
        .unwrap();

    assert_eq!(cover.render(Notation::Wildcard), ranges);
    assert_eq!(cover.noise(), noise);
}

#[test_case(1, 2; "one range, two free bits")]
#[test_case(2, 1; "two ranges, one free bit")]
#[test_case(2, 0; "two ranges, no free bits")]
fn test_worked_example_infeasible(max_ranges: usize, max_free_bits: u32) {
    let result = optimizer(max_ranges, max_free_bits, 3).find_cover(&WORKED_EXAMPLE);
    assert!(matches!(result, Err(CoverError::InfeasibleCover { .. })));
}

#[test]
fn test_large_sequence() {
    // Dense runs separated by wide gaps, at full IPv4 width.
    let mut points: Vec<u32> = (0..64).map(|i| 0x0A00_0000 + i).collect();
    points.extend((0..16).map(|i| 0xC0A8_0100 + i * 2));
    points.push(0xFFFF_FFFF);

    let constraints = Constraints::new(3, 8).unwrap();
    let cover = DynamicCoverOptimizer::new(constraints, BitWidth::IPV4)
        .find_cover(&points)
        .unwrap();

    check_cover(&cover, &points, &constraints).unwrap();
    assert_eq!(
        cover.render(Notation::Slash),
        vec!["10.0.0.0/26", "192.168.1.0/27", "255.255.255.255/32"]
    );
    assert_eq!(cover.noise(), 16);
}
