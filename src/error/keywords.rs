//! Keyword catalog error module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the keyword catalog.
#[derive(Error, Debug)]
pub enum KeywordError {
    /// A catalog file does not exist.
    #[error("Keyword file not found: {0}")]
    FileNotFound(PathBuf),

    /// A catalog file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file being read
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The group weights file is not a JSON object of numbers.
    #[error("Invalid group weights in {path}: {source}")]
    InvalidWeights {
        /// The weights file
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The keyword groups file could not be parsed.
    #[error("Invalid keyword groups in {path}: {message}")]
    InvalidGroups {
        /// The keyword groups file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A group weight is negative or not finite.
    #[error("Weight for group '{group}' must be a finite non-negative number, got {weight}")]
    InvalidWeight {
        /// The group name
        group: String,
        /// The rejected weight
        weight: f64,
    },
}
