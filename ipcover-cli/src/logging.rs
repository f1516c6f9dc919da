//! Log setup for the `ipcover` binary.
//!
//! Computed ranges are the only thing written to stdout, so they can be piped
//! into other tools. Every log event goes to stderr, either as one JSON object
//! per line or in a multi-line human readable form.

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter directives used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str = "warn,ipcover=info,ipcover_cli=info";

/// Returns the filter from `RUST_LOG`, or `directives` when it is unset or
/// invalid.
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Installs the global subscriber, logging to stderr.
///
/// # Arguments
///
/// - `directives` - Filter directives used when `RUST_LOG` is not set
/// - `pretty` - Human readable events when `true`, JSON lines otherwise
pub fn setup_logging(directives: &str, pretty: bool) {
    let json = (!pretty).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(false)
            .with_line_number(true)
            .with_file(true)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
    });
    let human = pretty.then(|| {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(json)
        .with(human)
        .init()
}
