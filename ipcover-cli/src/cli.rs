//! Command line arguments.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use ipcover::cover::AdmissibleScan;
use ipcover::Notation;

use crate::config::CoverConfig;

/// Format of the log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogOutputFormat {
    /// One JSON object per event.
    Json,
    /// Human readable, multi-line events.
    Pretty,
}

/// Notation used to print ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotationArg {
    /// Lowest address and prefix length, e.g. `10.0.0.0/24`.
    Slash,
    /// Binary prefix with `*` for each free bit, e.g. `1010**`.
    Wildcard,
}

impl From<NotationArg> for Notation {
    fn from(value: NotationArg) -> Self {
        match value {
            NotationArg::Slash => Notation::Slash,
            NotationArg::Wildcard => Notation::Wildcard,
        }
    }
}

/// Strategy for finding admissible starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanArg {
    /// Binary search over the starts.
    Binary,
    /// Scan from the first point.
    Linear,
}

impl From<ScanArg> for AdmissibleScan {
    fn from(value: ScanArg) -> Self {
        match value {
            ScanArg::Binary => AdmissibleScan::Binary,
            ScanArg::Linear => AdmissibleScan::Linear,
        }
    }
}

/// Command line arguments for ipcover.
#[derive(Debug, Parser)]
#[clap(name = "ipcover", version, about = "Cover IPv4 addresses with few, tight prefix ranges")]
pub struct CliArgs {
    /// Optional path to the configuration file. If not provided, built-in
    /// defaults and environment variables are used.
    #[clap(short = 'c', long, global = true, required = false)]
    pub config: Option<PathBuf>,

    /// Format of the log output, which is written to stderr.
    #[clap(short = 'o', long = "output-format", global = true, default_value = "pretty")]
    pub output_format: LogOutputFormat,

    /// The command to run.
    #[clap(subcommand)]
    pub command: CliCommand,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Compute the minimum-noise cover of a set of addresses.
    Cover(CoverArgs),
    /// Run the built-in example: 10.0.0.3, .5, .6 and .7 at width 3.
    Demo(DemoArgs),
}

/// Options shared by every command that computes a cover. Each one
/// overrides the configured value when given.
#[derive(Debug, Clone, Default, Args)]
pub struct ConstraintArgs {
    /// The most ranges the cover may use.
    #[clap(short = 'l', long)]
    pub max_ranges: Option<usize>,

    /// The most free (wildcard) bits any single range may have.
    #[clap(short = 's', long)]
    pub max_free_bits: Option<u32>,

    /// How ranges are printed.
    #[clap(short = 'n', long, value_enum)]
    pub notation: Option<NotationArg>,

    /// How admissible starts are found.
    #[clap(long, value_enum)]
    pub scan: Option<ScanArg>,
}

impl ConstraintArgs {
    /// Overrides `config` with every option that was given.
    pub fn apply(&self, config: &mut CoverConfig) {
        if let Some(max_ranges) = self.max_ranges {
            config.max_ranges = max_ranges;
        }
        if let Some(max_free_bits) = self.max_free_bits {
            config.max_free_bits = max_free_bits;
        }
        if let Some(notation) = self.notation {
            config.notation = notation.into();
        }
        if let Some(scan) = self.scan {
            config.scan = scan.into();
        }
    }
}

/// Arguments of the `cover` command.
#[derive(Debug, Clone, Args)]
pub struct CoverArgs {
    #[clap(flatten)]
    #[allow(missing_docs)]
    pub constraints: ConstraintArgs,

    /// Number of significant low-order address bits.
    #[clap(short = 'w', long)]
    pub width: Option<u8>,

    /// File with one address per line. Blank lines and lines starting with
    /// `#` are ignored.
    #[clap(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Addresses in dotted-decimal notation.
    pub addresses: Vec<String>,
}

/// Arguments of the `demo` command.
#[derive(Debug, Clone, Args)]
pub struct DemoArgs {
    #[clap(flatten)]
    #[allow(missing_docs)]
    pub constraints: ConstraintArgs,
}
