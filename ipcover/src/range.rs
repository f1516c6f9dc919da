//! Binary-prefix ranges with guaranteed invariants.
//!
//! # Invariants
//!
//! A `PrefixRange` denotes every address whose leading `width - free_bits`
//! bits equal those of its base address. It maintains at all times:
//! - **Bounded**: `free_bits <= width`
//! - **Aligned**: the low `free_bits` bits of the base are zero
//! - **Sized**: the range holds exactly `2^free_bits` addresses
//!
//! Ranges render in two notations: wildcard (`10**`, fixed bits followed by
//! one `*` per free bit) and slash (`0.0.0.8/2`, lowest address plus prefix
//! length).

use std::fmt;
use std::str::FromStr;

use crate::address::{self, AddressError, BitWidth};

/// Character standing in for a free bit in wildcard notation.
const WILDCARD: char = '*';

/// Error types that can occur when constructing or parsing ranges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// More free bits were requested than the width has.
    #[error("a range of width {width} cannot have {free_bits} free bits")]
    FreeBitsExceedWidth {
        /// The requested number of free bits.
        free_bits: u8,
        /// The width of the range.
        width: u8,
    },

    /// The base address has non-zero bits in its free (wildcard) positions.
    #[error("base address {base} is not aligned to {free_bits} free bits")]
    Unaligned {
        /// The offending base address.
        base: u32,
        /// The requested number of free bits.
        free_bits: u8,
    },

    /// The base address does not fit in the width.
    #[error("base address {base} does not fit in {width}")]
    BaseOutOfRange {
        /// The offending base address.
        base: u32,
        /// The width of the range.
        width: BitWidth,
    },

    /// The string is not in wildcard notation.
    #[error("invalid wildcard range: '{0}'")]
    InvalidWildcard(String),

    /// The string is not in slash notation.
    #[error("invalid slash range: '{0}'")]
    InvalidSlash(String),

    /// The notation name is not recognized.
    #[error("unknown notation '{0}', expected 'wildcard' or 'slash'")]
    UnknownNotation(String),

    /// An error was returned by the address codec.
    #[error(transparent)]
    Address(#[from] AddressError),
}

/// Textual notations a range can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// Fixed bits followed by `*` for each free bit, e.g. `10**`.
    Wildcard,
    /// Lowest address followed by the prefix length, e.g. `0.0.0.8/2`.
    #[default]
    Slash,
}

impl FromStr for Notation {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wildcard" => Ok(Notation::Wildcard),
            "slash" => Ok(Notation::Slash),
            _ => Err(RangeError::UnknownNotation(s.to_string())),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Wildcard => f.write_str("wildcard"),
            Notation::Slash => f.write_str("slash"),
        }
    }
}

/// Returns a mask with the low `bits` bits set, for `bits` in `0..=32`.
#[inline]
pub(crate) fn low_mask(bits: u8) -> u32 {
    u32::MAX.checked_shr(u32::BITS - u32::from(bits)).unwrap_or(0)
}

/// Returns the number of low-order bits that must become wildcards for a
/// single prefix to contain both addresses: the bit length of `a ^ b`.
#[inline]
pub(crate) fn covering_free_bits(a: u32, b: u32) -> u8 {
    // At most 32, so the cast is lossless.
    (u32::BITS - (a ^ b).leading_zeros()) as u8
}

/// A binary-prefix (CIDR-style) range of addresses.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefixRange {
    base: u32,
    free_bits: u8,
    width: BitWidth,
}

impl PrefixRange {
    /// Creates a range from its lowest address and number of free bits.
    ///
    /// ## Errors
    /// - More free bits than the width (`FreeBitsExceedWidth`)
    /// - Base wider than the width (`BaseOutOfRange`)
    /// - Base with bits set in free positions (`Unaligned`)
    pub fn new(base: u32, free_bits: u8, width: BitWidth) -> Result<Self, RangeError> {
        if free_bits > width.bits() {
            return Err(RangeError::FreeBitsExceedWidth {
                free_bits,
                width: width.bits(),
            });
        }
        if !width.contains(base) {
            return Err(RangeError::BaseOutOfRange { base, width });
        }
        if base & low_mask(free_bits) != 0 {
            return Err(RangeError::Unaligned { base, free_bits });
        }

        Ok(Self { base, free_bits, width })
    }

    /// Returns the smallest range containing both addresses. The order of the
    /// arguments does not matter, and equal addresses yield the single-address
    /// range. Only the low `width` bits of each address are considered.
    pub fn smallest_covering(a: u32, b: u32, width: BitWidth) -> Self {
        let (a, b) = (width.truncate(a), width.truncate(b));
        let free_bits = covering_free_bits(a, b);

        Self {
            base: a & !low_mask(free_bits),
            free_bits,
            width,
        }
    }

    /// Placeholder for table cells that do not hold a range yet. Its free-bit
    /// count is one more than the width, which no valid range can have.
    pub(crate) const fn unset(width: BitWidth) -> Self {
        Self {
            base: 0,
            free_bits: width.bits() + 1,
            width,
        }
    }

    /// Returns `true` for the [`PrefixRange::unset`] placeholder.
    pub(crate) const fn is_unset(&self) -> bool {
        self.free_bits > self.width.bits()
    }

    /// Returns the number of addresses in the range, `2^free_bits`.
    pub fn size(&self) -> u64 {
        1u64 << self.free_bits
    }

    /// Returns the lowest address in the range.
    pub fn first(&self) -> u32 {
        self.base
    }

    /// Returns the highest address in the range.
    pub fn last(&self) -> u32 {
        self.base | low_mask(self.free_bits)
    }

    /// Returns the number of trailing wildcard bits.
    pub fn free_bits(&self) -> u8 {
        self.free_bits
    }

    /// Returns the number of fixed leading bits.
    pub fn prefix_len(&self) -> u8 {
        self.width.bits().saturating_sub(self.free_bits)
    }

    /// Returns the bit width the range was built for.
    pub fn width(&self) -> BitWidth {
        self.width
    }

    /// Returns `true` if `address` lies within the range.
    pub fn contains(&self, address: u32) -> bool {
        self.width.contains(address) && address & !low_mask(self.free_bits) == self.base
    }

    /// Renders the range in wildcard notation, e.g. `10**`.
    pub fn to_wildcard(&self) -> String {
        let mut rendered = address::to_binary(self.base, self.width);
        rendered.truncate(usize::from(self.prefix_len()));
        rendered.extend(std::iter::repeat(WILDCARD).take(usize::from(self.free_bits)));
        rendered
    }

    /// Renders the range in slash notation, e.g. `0.0.0.8/2`.
    pub fn to_slash(&self) -> String {
        format!("{}/{}", address::format_address(self.base), self.prefix_len())
    }

    /// Renders the range in the requested notation.
    pub fn render(&self, notation: Notation) -> String {
        match notation {
            Notation::Wildcard => self.to_wildcard(),
            Notation::Slash => self.to_slash(),
        }
    }

    /// Parses a range in wildcard notation. The width is the length of the
    /// string, so `1**` is a 3-bit range holding `4..=7`.
    pub fn parse_wildcard(s: &str) -> Result<Self, RangeError> {
        let invalid = || RangeError::InvalidWildcard(s.to_string());

        let bits = u8::try_from(s.len()).map_err(|_| invalid())?;
        let width = BitWidth::new(bits).map_err(|_| invalid())?;

        let fixed = s.trim_end_matches(WILDCARD);
        // The string length fits in a u8, so this does too.
        let free_bits = (s.len() - fixed.len()) as u8;

        let prefix = if fixed.is_empty() {
            0
        } else {
            address::from_binary(fixed).map_err(|_| invalid())?
        };
        let base = prefix.checked_shl(u32::from(free_bits)).unwrap_or(0);

        Self::new(base, free_bits, width)
    }

    /// Parses a range in slash notation, e.g. `10.0.0.0/8`, for the given
    /// width. The base address must be aligned to the prefix length.
    pub fn parse_slash(s: &str, width: BitWidth) -> Result<Self, RangeError> {
        let invalid = || RangeError::InvalidSlash(s.to_string());

        let (address, prefix_len) = s.split_once('/').ok_or_else(invalid)?;
        let base = address::parse_address(address)?;
        let prefix_len: u8 = prefix_len.parse().map_err(|_| invalid())?;
        let free_bits = width.bits().checked_sub(prefix_len).ok_or_else(invalid)?;

        Self::new(base, free_bits, width)
    }
}

/// Ranges display in slash notation.
impl fmt::Display for PrefixRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash())
    }
}

/// Debug representation: `PrefixRange(10**)`.
impl fmt::Debug for PrefixRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unset() {
            return write!(f, "PrefixRange(unset)");
        }
        write!(f, "PrefixRange({})", self.to_wildcard())
    }
}
