#![deny(missing_docs)]

//! # ipcover command line tool
//!
//! Reads IPv4 addresses from arguments or a file and prints the
//! minimum-noise set of prefix ranges covering them. Settings come from
//! built-in defaults, an optional TOML file, `IPCOVER_` environment
//! variables and finally command line flags, each overriding the last.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
