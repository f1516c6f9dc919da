//! Reading addresses from files.

use std::path::Path;

use crate::error::Error;

/// Reads one address per line from `path`. Surrounding whitespace is
/// trimmed, and blank lines and lines starting with `#` are skipped.
pub fn read_addresses(path: &Path) -> Result<Vec<String>, Error> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let addresses: Vec<String> = parse_lines(&contents).map(str::to_string).collect();
    tracing::debug!(path = %path.display(), count = addresses.len(), "read addresses");

    Ok(addresses)
}

fn parse_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
