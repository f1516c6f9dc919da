//! Top-level error type for the ipcover library
//!

use crate::address::AddressError;
use crate::cover::CoverError;
use crate::range::RangeError;

/// Errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An address string could not be parsed.
    #[error("could not parse address: {0}")]
    Address(#[from] AddressError),
    /// A range could not be built or parsed.
    #[error("invalid range: {0}")]
    Range(#[from] RangeError),
    /// The cover optimizer failed or no cover exists.
    #[error(transparent)]
    Cover(#[from] CoverError),
}
