// Copyright (c) 2025 Kilo Scan Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Aho-Corasick multi-pattern matcher.
//!
//! This module builds a deterministic automaton over a fixed set of literal
//! keywords and reports every occurrence of any keyword in a single linear
//! pass over the input, including overlapping and nested occurrences.
//!
//! # Features
//!
//! - Arena-allocated trie: edges and failure links are indices, never owning pointers
//! - Two-phase lifecycle: a mutable [`TrieBuilder`] and an immutable [`PatternTrie`]
//! - Opaque payload per keyword, reported with each match
//! - Lazy match iterator with character and byte positions
//! - Lock-free concurrent searching through a shared [`AutomatonSearcher`]
//! - Serde support; deserialized tries are validated before use
//!
//! # Example
//!
//! ```
//! use kilo_scan_lib::data_structures::aho_corasick::{AutomatonSearcher, PatternTrie};
//!
//! let trie = PatternTrie::construct(vec![("he", 1), ("she", 2), ("hers", 3)]).unwrap();
//! let searcher = AutomatonSearcher::new(trie);
//!
//! let found: Vec<(&str, usize, usize)> = searcher
//!     .search("ushers")
//!     .map(|m| (m.keyword, m.start, m.end))
//!     .collect();
//!
//! assert_eq!(found, vec![("she", 1, 3), ("he", 2, 3), ("hers", 2, 5)]);
//! ```
//!
//! # Performance Characteristics
//!
//! - Construction: O(total keyword length × alphabet fan-out) for the trie,
//!   plus the size of the inherited output sets
//! - Search: O(n + z) for a text of n characters producing z matches; each
//!   failure-link hop lowers the state depth, which rises by at most one per
//!   character
//!
//! # Duplicate keywords
//!
//! Inserting a keyword that is already present keeps its original
//! [`PatternId`] and position in every output list and replaces its payload
//! with the newer one.

mod error;
mod node;
mod searcher;
mod trie;

// Re-exports
pub use error::{AhoCorasickError, Result};
pub use node::{NodeId, Pattern, PatternId, TrieNode};
pub use searcher::{AutomatonSearcher, Match, Matches};
pub use trie::{PatternTrie, PatternTrieParts, TrieBuilder};

#[cfg(test)]
mod tests;
