// Copyright (c) 2025 Kilo Scan Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Aho-Corasick automaton.

/// Error types for Aho-Corasick automaton operations
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum AhoCorasickError {
    /// Empty keyword provided to the trie builder
    #[error("Pattern cannot be empty")]
    EmptyPattern,

    /// The automaton has no root node, so construction never ran
    #[error("Automaton has not been constructed")]
    NotConstructed,

    /// A node index points outside the node table
    #[error("Node index {node} is out of bounds for a trie of {len} nodes")]
    InvalidNode {
        /// The offending node index
        node: usize,
        /// Number of nodes in the trie
        len: usize,
    },

    /// A pattern index points outside the pattern table
    #[error("Pattern index {pattern} is out of bounds for {len} patterns")]
    InvalidPattern {
        /// The offending pattern index
        pattern: usize,
        /// Number of patterns in the trie
        len: usize,
    },

    /// The node table violates a structural invariant of the automaton
    #[error("Invalid automaton structure: {0}")]
    InvalidStructure(String),
}

/// Result type for Aho-Corasick automaton operations
pub type Result<T> = std::result::Result<T, AhoCorasickError>;
