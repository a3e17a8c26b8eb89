//! Configuration error module.
//!
//! Errors raised while locating, parsing and validating a [`KiloConfig`].
//! Validation failures name the section and field they concern, so a
//! message reads like `scoring.max_score is out of range: ...`.
//!
//! [`KiloConfig`]: crate::config::KiloConfig

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level sections of the Kilo Scan configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    /// `[keywords]`: keyword catalog files
    Keywords,
    /// `[automaton]`: automaton cache
    Automaton,
    /// `[scoring]`: score bounds and rounding
    Scoring,
    /// `[scan]`: file scanning limits
    Scan,
    /// `[log]`: logging output
    Log,
}

impl ConfigSection {
    /// Name of the section as written in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keywords => "keywords",
            Self::Automaton => "automaton",
            Self::Scoring => "scoring",
            Self::Scan => "scan",
            Self::Log => "log",
        }
    }
}

impl Display for ConfigSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration file extension is not toml, json, yaml or yml.
    #[error("Unsupported configuration format for {0}: expected .toml, .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),

    /// The configuration sources could not be parsed into a `KiloConfig`.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A field holds a value that is not allowed, e.g. an empty path.
    #[error("{section}.{field} is invalid: {message}")]
    InvalidValue {
        /// Section holding the field
        section: ConfigSection,
        /// Field name within the section
        field: &'static str,
        /// What is wrong with the value
        message: String,
    },

    /// A numeric field is outside its valid range.
    #[error("{section}.{field} is out of range: {message}")]
    ValueOutOfRange {
        /// Section holding the field
        section: ConfigSection,
        /// Field name within the section
        field: &'static str,
        /// Description of the valid range
        message: String,
    },

    /// The process-wide configuration was read before being installed.
    #[error("Global configuration has not been initialized")]
    NotInitialized,
}
