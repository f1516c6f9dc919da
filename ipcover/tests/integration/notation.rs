use ipcover::address::{self, BitWidth};
use ipcover::{Constraints, CoverOptimizer, DynamicCoverOptimizer, PrefixRange};

fn sample_points() -> Vec<u32> {
    let mut points: Vec<u32> = ["10.0.0.1", "10.0.0.9", "10.0.0.14", "10.0.3.7", "10.200.0.1"]
        .iter()
        .map(|a| address::parse_address(a).unwrap())
        .collect();
    points.sort_unstable();
    points
}

/// Every range of a real cover survives a trip through both notations.
#[test]
fn cover_ranges_round_trip() {
    let constraints = Constraints::new(3, 12).unwrap();
    let cover = DynamicCoverOptimizer::new(constraints, BitWidth::IPV4)
        .find_cover(&sample_points())
        .unwrap();

    assert!(!cover.is_empty());
    for range in cover.iter() {
        let from_wildcard = PrefixRange::parse_wildcard(&range.to_wildcard()).unwrap();
        let from_slash = PrefixRange::parse_slash(&range.to_slash(), BitWidth::IPV4).unwrap();

        assert_eq!(&from_wildcard, range);
        assert_eq!(&from_slash, range);
        assert_eq!(range.size(), u64::from(range.last() - range.first()) + 1);
    }
}

#[test]
fn cover_ranges_hold_their_points() {
    let points = sample_points();
    let constraints = Constraints::new(2, 12).unwrap();
    let cover = DynamicCoverOptimizer::new(constraints, BitWidth::IPV4)
        .find_cover(&points)
        .unwrap();

    for point in points {
        assert!(cover.contains(point), "{} is not covered", address::format_address(point));
    }
}
