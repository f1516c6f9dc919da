//! Execution of the `cover` and `demo` commands.

use std::io;
use std::io::Write;

use ipcover::CoverOptimizer as _;

use crate::cli::CoverArgs;
use crate::cli::DemoArgs;
use crate::config::CoverConfig;
use crate::error::Error;
use crate::input;

/// Addresses of the built-in example.
pub const DEMO_ADDRESSES: [&str; 4] = ["10.0.0.3", "10.0.0.5", "10.0.0.6", "10.0.0.7"];

/// Address width of the built-in example.
pub const DEMO_WIDTH: u8 = 3;

/// The outcome of a cover command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The rendered ranges, in ascending order.
    pub ranges: Vec<String>,
    /// Addresses covered by the ranges that were not in the input.
    pub noise: u64,
}

impl Report {
    /// Writes one range per line to `out` and the noise to `err`.
    pub fn print(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        for range in &self.ranges {
            writeln!(out, "{range}")?;
        }
        writeln!(err, "noise: {}", self.noise)
    }
}

/// Computes the cover of the addresses given on the command line or in a
/// file, with `args` overriding `config`.
pub fn run_cover(args: &CoverArgs, mut config: CoverConfig) -> Result<Report, Error> {
    args.constraints.apply(&mut config);
    if let Some(width) = args.width {
        config.width = width;
    }

    let mut addresses = args.addresses.clone();
    if let Some(path) = &args.file {
        addresses.extend(input::read_addresses(path)?);
    }
    if addresses.is_empty() {
        return Err(Error::NoInput);
    }

    compute(addresses, &config)
}

/// Computes the cover of the built-in example.
pub fn run_demo(args: &DemoArgs, mut config: CoverConfig) -> Result<Report, Error> {
    args.constraints.apply(&mut config);
    config.width = DEMO_WIDTH;

    compute(DEMO_ADDRESSES, &config)
}

#[tracing::instrument(skip_all, fields(
    max_ranges = config.max_ranges,
    max_free_bits = config.max_free_bits,
    width = config.width,
))]
fn compute<I>(addresses: I, config: &CoverConfig) -> Result<Report, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let optimizer = config.optimizer()?;
    let points = ipcover::address::parse_points(addresses, optimizer.width())?;

    let cover = optimizer.find_cover(&points)?;
    tracing::info!(
        addresses = points.len(),
        ranges = cover.len(),
        noise = cover.noise(),
        "computed cover"
    );

    Ok(Report {
        ranges: cover.render(config.notation),
        noise: cover.noise(),
    })
}
