// Copyright (c) 2025 Kilo Scan Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Streaming search over a frozen pattern trie.
//!
//! The searcher walks the text one character at a time, following failure
//! links on mismatch, and yields every pattern in the output set of each
//! state it lands in. Matches come out ordered by end position; matches that
//! end at the same position come out longest first.

use std::iter::FusedIterator;
use std::str::CharIndices;
use std::sync::Arc;

use super::node::{NodeId, PatternId};
use super::trie::PatternTrie;

/// A single occurrence of a pattern in a text.
///
/// `start` and `end` are inclusive character indices. `byte_start` and
/// `byte_end` delimit the same occurrence as a half-open byte range, suitable
/// for slicing the searched `&str`.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a, P> {
    /// Identifier of the matched pattern
    pub pattern: PatternId,

    /// The matched keyword
    pub keyword: &'a str,

    /// Payload stored with the keyword
    pub payload: &'a P,

    /// Character index of the first matched character
    pub start: usize,

    /// Character index of the last matched character
    pub end: usize,

    /// Byte offset of the first matched character
    pub byte_start: usize,

    /// Byte offset one past the last matched character
    pub byte_end: usize,
}

/// Iterator over all matches in a text.
///
/// Created by [`AutomatonSearcher::search`]. Each call to `search` starts a
/// new walk from the root, so the iterator holds the only search state.
#[derive(Debug)]
pub struct Matches<'a, P> {
    trie: &'a PatternTrie<P>,
    chars: CharIndices<'a>,
    state: NodeId,
    next_index: usize,
    pending: &'a [PatternId],
    end: usize,
    byte_end: usize,
}

impl<'a, P> Matches<'a, P> {
    fn new(trie: &'a PatternTrie<P>, text: &'a str) -> Self {
        Self {
            trie,
            chars: text.char_indices(),
            state: NodeId::ROOT,
            next_index: 0,
            pending: &[],
            end: 0,
            byte_end: 0,
        }
    }
}

impl<'a, P> Iterator for Matches<'a, P> {
    type Item = Match<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((&id, rest)) = self.pending.split_first() {
                self.pending = rest;
                let pattern = self.trie.pattern_unchecked(id);
                return Some(Match {
                    pattern: id,
                    keyword: pattern.keyword(),
                    payload: pattern.payload(),
                    start: self.end + 1 - pattern.char_len(),
                    end: self.end,
                    byte_start: self.byte_end - pattern.keyword().len(),
                    byte_end: self.byte_end,
                });
            }

            let (offset, c) = self.chars.next()?;
            self.end = self.next_index;
            self.next_index += 1;
            self.byte_end = offset + c.len_utf8();

            self.state = self.trie.next_state(self.state, c);
            self.pending = self.trie.node_unchecked(self.state).output();
        }
    }
}

impl<'a, P> FusedIterator for Matches<'a, P> {}

/// Read-only multi-pattern searcher.
///
/// Cloning is cheap: clones share the same trie, and any number of threads
/// may search through their own clone (or a shared reference) at once.
#[derive(Debug)]
pub struct AutomatonSearcher<P> {
    trie: Arc<PatternTrie<P>>,
}

impl<P> Clone for AutomatonSearcher<P> {
    fn clone(&self) -> Self {
        Self {
            trie: Arc::clone(&self.trie),
        }
    }
}

impl<P> AutomatonSearcher<P> {
    /// Wraps a frozen trie.
    pub fn new(trie: PatternTrie<P>) -> Self {
        Self {
            trie: Arc::new(trie),
        }
    }

    /// Wraps a trie that is already shared.
    pub fn from_shared(trie: Arc<PatternTrie<P>>) -> Self {
        Self { trie }
    }

    /// The underlying trie.
    pub fn trie(&self) -> &PatternTrie<P> {
        &self.trie
    }

    /// Returns a lazy iterator over every occurrence of every pattern in
    /// `text`, including overlapping and nested occurrences.
    pub fn search<'a>(&'a self, text: &'a str) -> Matches<'a, P> {
        Matches::new(&self.trie, text)
    }

    /// Collects every match in `text`.
    pub fn find_all<'a>(&'a self, text: &'a str) -> Vec<Match<'a, P>> {
        self.search(text).collect()
    }

    /// Whether any pattern occurs in `text`. Stops at the first match.
    pub fn is_match(&self, text: &str) -> bool {
        self.search(text).next().is_some()
    }
}

impl<P> From<PatternTrie<P>> for AutomatonSearcher<P> {
    fn from(trie: PatternTrie<P>) -> Self {
        Self::new(trie)
    }
}
