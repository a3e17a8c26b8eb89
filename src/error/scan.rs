//! Scan error module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a single input.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The input file
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The input file exceeds the configured size limit.
    #[error("{path} is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge {
        /// The input file
        path: PathBuf,
        /// Size of the file in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// The blocking scan task did not complete.
    #[error("Scan task failed: {0}")]
    TaskFailed(String),
}
