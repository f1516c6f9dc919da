//! Configuration management for the ipcover command line tool
use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use ipcover::cover::AdmissibleScan;
use ipcover::BitWidth;
use ipcover::Constraints;
use ipcover::DynamicCoverOptimizer;
use ipcover::Notation;
use serde::Deserialize;
use std::path::Path;

use crate::config::error::CliConfigError;

mod error;

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self, cfg: &Settings) -> Result<(), ConfigError>;
}

/// Top-level configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// Cover optimizer configuration.
    pub cover: CoverConfig,
}

/// Settings for computing a cover.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CoverConfig {
    /// The most ranges a cover may use.
    pub max_ranges: usize,
    /// The most free bits any single range may have.
    pub max_free_bits: u32,
    /// Number of significant low-order address bits.
    pub width: u8,
    /// The notation ranges are printed in.
    pub notation: Notation,
    /// How admissible starts are found.
    pub scan: AdmissibleScan,
}

impl Validatable for CoverConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        if self.max_ranges == 0 {
            return Err(ConfigError::Message(
                CliConfigError::ZeroMaxRanges.to_string(),
            ));
        }
        if BitWidth::new(self.width).is_err() {
            return Err(ConfigError::Message(
                CliConfigError::InvalidWidth(self.width).to_string(),
            ));
        }

        Ok(())
    }
}

impl CoverConfig {
    /// Returns the configured constraints.
    pub fn constraints(&self) -> Result<Constraints, ConfigError> {
        Constraints::new(self.max_ranges, self.max_free_bits)
            .map_err(|_| ConfigError::Message(CliConfigError::ZeroMaxRanges.to_string()))
    }

    /// Returns the configured address width.
    pub fn bit_width(&self) -> Result<BitWidth, ConfigError> {
        BitWidth::new(self.width)
            .map_err(|_| ConfigError::Message(CliConfigError::InvalidWidth(self.width).to_string()))
    }

    /// Builds the optimizer described by this configuration.
    pub fn optimizer(&self) -> Result<DynamicCoverOptimizer, ConfigError> {
        let optimizer = DynamicCoverOptimizer::new(self.constraints()?, self.bit_width()?);
        Ok(optimizer.with_scan(self.scan))
    }
}

impl Settings {
    /// Initializing the global config first with default values and then with
    /// provided/overwritten environment variables. The explicit separator with
    /// double underscores is needed to correctly parse the nested config structure.
    ///
    /// The environment variables are prefixed with `IPCOVER_` and the nested
    /// fields are separated with double underscores. For example, the path
    /// `cover.max_ranges` is parsed as following:
    ///
    /// ```text
    /// IPCOVER_COVER__MAX_RANGES
    /// ^^^^^^^ ^^^^^  ^^^^^^^^^^
    ///    │  ^   │  ^^    │  ^
    ///    │  │   │  │     │  └ The underscore in the `max_ranges` field
    ///    │  │   │  │     └ The `max_ranges` field of the `cover` object
    ///    │  │   │  └ separator("__")
    ///    │  │   └ The `cover` field of the root object (`Settings`)
    ///    │  └ prefix_separator("_")
    ///    └ with_prefix("IPCOVER")
    /// ```
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("IPCOVER")
            .separator("__")
            .try_parsing(true)
            .prefix_separator("_");

        let mut cfg_builder = Config::builder();

        cfg_builder = cfg_builder.set_default("cover.max_ranges", 4)?;
        cfg_builder = cfg_builder.set_default("cover.max_free_bits", 8)?;
        cfg_builder = cfg_builder.set_default("cover.width", 32)?;
        cfg_builder = cfg_builder.set_default("cover.notation", "slash")?;
        cfg_builder = cfg_builder.set_default("cover.scan", "binary")?;

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let cfg = cfg_builder.build()?;

        let settings: Settings = cfg.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.cover.validate(self)?;

        Ok(())
    }
}
