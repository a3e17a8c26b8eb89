//! Persistence for constructed automatons.
//!
//! An automaton is stored as a JSON envelope:
//!
//! ```json
//! { "format_version": 1, "automaton": { "nodes": [...], "patterns": [...] } }
//! ```
//!
//! Failure links and edges are node indices, so the node graph serializes
//! without back-references. Loading checks every index and confirms each
//! failure link and output list before the automaton can be searched.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data_structures::aho_corasick::{PatternTrie, PatternTrieParts};
use crate::error::store::StoreError;

/// Result type for automaton store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Envelope version written by this build.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format_version: u32,
    automaton: &'a PatternTrie<f64>,
}

#[derive(Deserialize)]
struct VersionHeader {
    format_version: u32,
}

#[derive(Deserialize)]
struct Envelope {
    automaton: PatternTrieParts<f64>,
}

/// Saves and restores weighted automatons.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutomatonStore;

impl AutomatonStore {
    /// Encodes an automaton into its envelope bytes.
    pub fn to_bytes(trie: &PatternTrie<f64>) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(&EnvelopeRef {
            format_version: FORMAT_VERSION,
            automaton: trie,
        })
        .map_err(StoreError::Serialization)
    }

    /// Decodes an automaton from envelope bytes.
    ///
    /// # Errors
    ///
    /// * [`StoreError::DeserializationFormat`] if the bytes are not an envelope.
    /// * [`StoreError::UnsupportedVersion`] for an envelope of another version.
    /// * [`StoreError::InvalidAutomaton`] if the automaton fails validation.
    pub fn from_bytes(bytes: &[u8]) -> StoreResult<PatternTrie<f64>> {
        let header: VersionHeader =
            serde_json::from_slice(bytes).map_err(StoreError::DeserializationFormat)?;
        if header.format_version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: header.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let envelope: Envelope =
            serde_json::from_slice(bytes).map_err(StoreError::DeserializationFormat)?;

        Ok(PatternTrie::try_from(envelope.automaton)?)
    }

    /// Writes an automaton to `path`, creating parent directories as needed.
    pub fn save(path: &Path, trie: &PatternTrie<f64>) -> StoreResult<()> {
        let io_error = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let bytes = Self::to_bytes(trie)?;
        std::fs::write(path, bytes).map_err(io_error)?;

        tracing::debug!(
            path = %path.display(),
            patterns = trie.pattern_count(),
            nodes = trie.node_count(),
            "Automaton saved"
        );
        Ok(())
    }

    /// Reads an automaton from `path`.
    pub fn load(path: &Path) -> StoreResult<PatternTrie<f64>> {
        let bytes = std::fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trie = Self::from_bytes(&bytes)?;

        tracing::debug!(
            path = %path.display(),
            patterns = trie.pattern_count(),
            nodes = trie.node_count(),
            "Automaton loaded"
        );
        Ok(trie)
    }
}
