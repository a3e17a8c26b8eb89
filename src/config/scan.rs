//! Scan configuration module.
//!
//! Limits applied when scanning input files.

use super::{ConfigResult, Validate};
use crate::error::config::{ConfigError, ConfigSection};
use serde::{Deserialize, Serialize};

/// Scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum number of files scanned at the same time
    pub max_concurrency: usize,

    /// Files larger than this are rejected without being read
    pub max_file_size_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_concurrency: num_cpus::get(),
            max_file_size_bytes: 10 * 1024 * 1024, // 10 MiB
        }
    }
}

impl Validate for ScanConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ValueOutOfRange {
                section: ConfigSection::Scan,
                field: "max_concurrency",
                message: "must be greater than 0".to_string(),
            });
        }

        if self.max_file_size_bytes == 0 {
            return Err(ConfigError::ValueOutOfRange {
                section: ConfigSection::Scan,
                field: "max_file_size_bytes",
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
