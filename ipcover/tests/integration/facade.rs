use assert_matches::assert_matches;
use ipcover::address::AddressError;
use ipcover::cover::CoverError;
use ipcover::error::Error;
use ipcover::{find_min_cover, BitWidth, Constraints, Notation};
use test_case::test_case;

/// The worked example: four addresses whose low three bits are 011, 101,
/// 110 and 111.
const WORKED_EXAMPLE: [&str; 4] = ["10.0.0.3", "10.0.0.5", "10.0.0.6", "10.0.0.7"];

fn three_bits() -> BitWidth {
    BitWidth::new(3).unwrap()
}

#[test_case(4, Notation::Slash => vec!["0.0.0.3/3", "0.0.0.5/3", "0.0.0.6/3", "0.0.0.7/3"]; "four ranges slash")]
#[test_case(4, Notation::Wildcard => vec!["011", "101", "110", "111"]; "four ranges wildcard")]
#[test_case(2, Notation::Slash => vec!["0.0.0.3/3", "0.0.0.4/1"]; "two ranges slash")]
#[test_case(2, Notation::Wildcard => vec!["011", "1**"]; "two ranges wildcard")]
#[test_case(1, Notation::Wildcard => vec!["***"]; "one range")]
fn worked_example(max_ranges: usize, notation: Notation) -> Vec<String> {
    let constraints = Constraints::new(max_ranges, 8).unwrap();
    find_min_cover(WORKED_EXAMPLE, constraints, three_bits(), notation).unwrap()
}

#[test]
fn input_order_does_not_matter() {
    let constraints = Constraints::new(2, 8).unwrap();
    let shuffled = ["10.0.0.7", "10.0.0.3", "10.0.0.6", "10.0.0.5", "10.0.0.6"];

    let expected = find_min_cover(WORKED_EXAMPLE, constraints, three_bits(), Notation::Slash);
    let actual = find_min_cover(shuffled, constraints, three_bits(), Notation::Slash);

    assert_eq!(actual, expected);
}

#[test]
fn ipv4_clusters() {
    let addresses = [
        "192.168.1.10",
        "192.168.1.11",
        "192.168.1.12",
        "192.168.1.13",
        "10.1.2.3",
        "172.16.0.1",
        "172.16.0.2",
    ];
    let constraints = Constraints::new(3, 4).unwrap();

    let cover = find_min_cover(addresses, constraints, BitWidth::IPV4, Notation::Slash).unwrap();

    assert_eq!(cover, vec!["10.1.2.3/32", "172.16.0.0/30", "192.168.1.8/29"]);
}

#[test]
fn empty_input_yields_empty_cover() {
    let constraints = Constraints::new(1, 0).unwrap();
    let cover = find_min_cover(Vec::<String>::new(), constraints, BitWidth::IPV4, Notation::Slash);

    assert_eq!(cover, Ok(Vec::new()));
}

#[test]
fn malformed_address_is_reported() {
    let constraints = Constraints::new(2, 8).unwrap();
    let addresses = ["10.0.0.1", "10.0.0.300", "10.0"];

    let result = find_min_cover(addresses, constraints, BitWidth::IPV4, Notation::Slash);

    assert_matches!(
        result,
        Err(Error::Address(AddressError::OctetOutOfRange(octet))) if octet == "300"
    );
}

#[test]
fn infeasible_cover_is_reported() {
    let constraints = Constraints::new(1, 2).unwrap();
    let addresses = ["0.0.0.0", "0.0.0.1", "0.0.0.2", "0.0.0.5"];

    let result = find_min_cover(addresses, constraints, three_bits(), Notation::Slash);

    assert_matches!(
        result,
        Err(Error::Cover(CoverError::InfeasibleCover { max_ranges: 1, max_free_bits: 2 }))
    );
}
