//! Automaton store error module.
//!
//! Errors surfaced while persisting a constructed automaton or restoring one.

use std::path::PathBuf;
use thiserror::Error;

use crate::data_structures::aho_corasick::AhoCorasickError;

/// Errors that can occur while saving or loading an automaton.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the automaton file failed.
    #[error("Automaton file IO error at {path}: {source}")]
    Io {
        /// The automaton file
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The automaton could not be encoded.
    #[error("Failed to serialize automaton: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The stored bytes are not a well-formed automaton envelope.
    #[error("Malformed automaton data: {0}")]
    DeserializationFormat(#[source] serde_json::Error),

    /// The envelope was written by an incompatible format version.
    #[error("Unsupported automaton format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the envelope
        found: u32,
        /// Version this build reads and writes
        expected: u32,
    },

    /// The decoded automaton violates a structural invariant.
    #[error("Stored automaton is invalid: {0}")]
    InvalidAutomaton(#[from] AhoCorasickError),
}
