//! Kilo Scan Library
//!
//! This library contains the core components of Kilo Scan, a keyword-based
//! scam detector: the Aho-Corasick automaton, keyword catalog loading, text
//! normalization, scoring and automaton persistence. The library is designed
//! to be used by the binary crate, but can also be used as a dependency by
//! other projects.
//!
//! # Architecture
//!
//! - Keyword phrases are normalized and compiled once into an immutable automaton
//! - The automaton is cached on disk and shared across threads without locks
//! - Every scan is a single linear pass over the normalized text
//! - Errors are explicit and propagated; nothing in the library panics on bad input

pub mod config;
pub mod data_structures;
pub mod detector;
pub mod error;
pub mod keywords;
pub mod persistence;
pub mod scoring;
pub mod text;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Kilo Scan.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing error reporter, loads and validates configuration
/// from `config_path` (if any) and the `KILO` environment, and makes it
/// available through [`config::get_global_config`].
pub fn init(config_path: Option<&std::path::Path>) -> error::KiloResult<config::KiloConfig> {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));

    let config = config::ConfigLoader::new(config_path, config::ENV_PREFIX).load()?;
    config::init_global_config(config.clone());

    Ok(config)
}
