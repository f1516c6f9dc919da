//! Top-level error type for the ipcover command line tool

use std::path::PathBuf;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The address file could not be read.
    #[error("could not read addresses from {path}: {source}")]
    ReadInput {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be loaded or is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// An error returned by the cover library.
    #[error(transparent)]
    Cover(#[from] ipcover::error::Error),

    /// Neither addresses nor an address file were given.
    #[error("no addresses given; pass them as arguments or with --file")]
    NoInput,
}

impl From<ipcover::cover::CoverError> for Error {
    fn from(err: ipcover::cover::CoverError) -> Self {
        Error::Cover(err.into())
    }
}

impl From<ipcover::address::AddressError> for Error {
    fn from(err: ipcover::address::AddressError) -> Self {
        Error::Cover(err.into())
    }
}
