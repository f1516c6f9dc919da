#![deny(missing_docs)]

//! # IP Cover
//!
//! Covers a set of IPv4 addresses with at most `L` CIDR-style prefix ranges,
//! none looser than `S` wildcard bits, while including as few addresses
//! outside the set as possible.
//!
//! ## Usage Example
//!
//! ```
//! use ipcover::{find_min_cover, BitWidth, Constraints, Notation};
//!
//! let addresses = ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.1.200"];
//! let constraints = Constraints::new(2, 8).unwrap();
//!
//! let cover = find_min_cover(addresses, constraints, BitWidth::IPV4, Notation::Slash).unwrap();
//! assert_eq!(cover, vec!["10.0.0.0/30", "10.0.1.200/32"]);
//! ```
//!
//! ## Architecture
//!
//! * **Address**: conversions between dotted-decimal, integer and binary forms
//! * **Range**: binary-prefix ranges and their notations
//! * **Cover**: the optimizer that chooses the ranges

pub mod address;
pub mod cover;
pub mod error;
pub mod range;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use address::BitWidth;
pub use cover::Constraints;
pub use cover::Cover;
pub use cover::CoverOptimizer;
pub use cover::DynamicCoverOptimizer;
pub use range::Notation;
pub use range::PrefixRange;

use error::Error;

/// Parses the given dotted-decimal addresses and returns their minimum-noise
/// cover, rendered in the requested notation.
///
/// Widths below 32 keep only the low `width` bits of each address, so at
/// width 3 the address `10.0.0.5` is the point `101`.
///
/// ## Errors
/// - The first malformed address (`Error::Address`)
/// - No cover satisfies the constraints (`Error::Cover`)
pub fn find_min_cover<I>(
    addresses: I,
    constraints: Constraints,
    width: BitWidth,
    notation: Notation,
) -> Result<Vec<String>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let points = address::parse_points(addresses, width)?;
    let cover = DynamicCoverOptimizer::new(constraints, width).find_cover(&points)?;

    Ok(cover.render(notation))
}
