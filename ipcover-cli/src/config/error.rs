/// Configuration error variants.
#[derive(Debug, thiserror::Error)]
pub enum CliConfigError {
    /// The range budget must allow at least one range.
    #[error("[cover] max_ranges must be at least 1")]
    ZeroMaxRanges,

    /// The address width is outside of `1..=32`.
    #[error("[cover] width must be between 1 and 32 bits, got {0}")]
    InvalidWidth(u8),
}
