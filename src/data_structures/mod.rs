//! Data structures for Kilo Scan.
//!
//! This module contains the matching structures the scanner is built on.
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Immutable after construction, shareable across threads without locks
//! - Zero allocation in the search hot path

pub mod aho_corasick;

// Re-export common data structures
pub use aho_corasick::{AhoCorasickError, AutomatonSearcher, Match, PatternTrie, TrieBuilder};
