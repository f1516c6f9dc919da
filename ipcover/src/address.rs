//! # Address Codec
//!
//! Conversions between the three forms an IPv4 address takes in this crate:
//!
//! - **Dotted-decimal strings**, e.g. `10.0.0.1`, the form addresses arrive in.
//! - **Integers** (`u32`), the form the cover optimizer works on.
//! - **Fixed-width binary strings**, e.g. `00001010000000000000000000000001`,
//!   the form wildcard ranges are rendered from.
//!
//! ## Bit Width
//!
//! Every binary operation is parameterized by an explicit [`BitWidth`]. IPv4
//! uses 32 bits, but smaller widths are useful for testing and for worked
//! examples: at width 3 only the low three bits of an address are considered,
//! so `10.0.0.5` behaves like the binary string `101`.

use std::fmt;
use std::net::Ipv4Addr;

/// Number of dot-separated segments in an IPv4 address.
const OCTETS: usize = 4;

/// Number of bits in each dotted-decimal segment.
const BITS_PER_OCTET: u32 = 8;

/// Errors that can occur while converting addresses between forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The address did not have exactly four dot-separated segments.
    #[error("expected {OCTETS} dot-separated segments, found {0}")]
    SegmentCount(usize),

    /// A segment was empty or contained something other than decimal digits.
    #[error("invalid address segment: '{0}'")]
    InvalidOctet(String),

    /// A segment was numeric but did not fit in a byte.
    #[error("address segment out of range (0-255): '{0}'")]
    OctetOutOfRange(String),

    /// A binary string was empty, too long, or contained characters other
    /// than `0` and `1`.
    #[error("invalid binary address: '{0}'")]
    InvalidBinary(String),

    /// The requested bit width is outside `1..=32`.
    #[error("bit width must be between 1 and {}, got {0}", BitWidth::MAX_BITS)]
    InvalidWidth(u8),
}

/// The number of significant bits in an address.
///
/// Threaded explicitly through every operation that depends on it, so that
/// computations with different widths never interfere with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "u8")]
pub struct BitWidth(u8);

impl BitWidth {
    /// The largest supported width.
    pub const MAX_BITS: u8 = u32::BITS as u8;

    /// The width of an IPv4 address.
    pub const IPV4: Self = Self(Self::MAX_BITS);

    /// Creates a new width, which must be between 1 and 32 bits.
    pub fn new(bits: u8) -> Result<Self, AddressError> {
        if bits == 0 || bits > Self::MAX_BITS {
            return Err(AddressError::InvalidWidth(bits));
        }
        Ok(Self(bits))
    }

    /// Returns the number of bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns the largest address representable at this width.
    pub const fn max_value(self) -> u32 {
        // `self.0` is never zero, so the shift is at most 31.
        u32::MAX >> (u32::BITS - self.0 as u32)
    }

    /// Returns `true` if `address` fits in this width.
    pub const fn contains(self, address: u32) -> bool {
        address <= self.max_value()
    }

    /// Keeps only the low `bits()` bits of `address`.
    pub const fn truncate(self, address: u32) -> u32 {
        address & self.max_value()
    }
}

impl Default for BitWidth {
    fn default() -> Self {
        Self::IPV4
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = AddressError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

/// Parses a dotted-decimal IPv4 address, e.g. `10.0.0.1`, into its integer
/// form, e.g. `167772161`.
///
/// ## Errors
/// - Wrong number of segments (`SegmentCount`)
/// - Non-numeric segments (`InvalidOctet`)
/// - Segments greater than 255 (`OctetOutOfRange`)
pub fn parse_address(address: &str) -> Result<u32, AddressError> {
    let segments: Vec<&str> = address.split('.').collect();
    if segments.len() != OCTETS {
        return Err(AddressError::SegmentCount(segments.len()));
    }

    segments.iter().try_fold(0u32, |acc, segment| {
        let octet = parse_octet(segment)?;
        Ok((acc << BITS_PER_OCTET) | u32::from(octet))
    })
}

fn parse_octet(segment: &str) -> Result<u8, AddressError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::InvalidOctet(segment.to_string()));
    }

    // All digits, so the only way parsing fails is overflow.
    segment
        .parse::<u8>()
        .map_err(|_| AddressError::OctetOutOfRange(segment.to_string()))
}

/// Parses dotted-decimal addresses into points of `width` bits, sorted
/// ascending. Widths below 32 keep only the low `width` bits of each address.
///
/// ## Errors
/// - The first malformed address, as in [`parse_address`]
pub fn parse_points<I>(addresses: I, width: BitWidth) -> Result<Vec<u32>, AddressError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut points = addresses
        .into_iter()
        .map(|address| parse_address(address.as_ref()).map(|p| width.truncate(p)))
        .collect::<Result<Vec<_>, _>>()?;
    points.sort_unstable();

    Ok(points)
}

/// Formats an integer address in dotted-decimal notation.
pub fn format_address(address: u32) -> String {
    Ipv4Addr::from(address).to_string()
}

/// Renders the low `width` bits of `address` as a zero-padded binary string
/// of exactly `width` characters.
pub fn to_binary(address: u32, width: BitWidth) -> String {
    format!(
        "{:0width$b}",
        width.truncate(address),
        width = usize::from(width.bits())
    )
}

/// Parses a binary string of 1 to 32 `0`/`1` characters into an integer.
pub fn from_binary(bits: &str) -> Result<u32, AddressError> {
    let valid = !bits.is_empty()
        && bits.len() <= usize::from(BitWidth::MAX_BITS)
        && bits.bytes().all(|b| b == b'0' || b == b'1');

    if !valid {
        return Err(AddressError::InvalidBinary(bits.to_string()));
    }

    u32::from_str_radix(bits, 2).map_err(|_| AddressError::InvalidBinary(bits.to_string()))
}
