// Copyright (c) 2025 Kilo Scan Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pattern trie construction for the Aho-Corasick automaton.
//!
//! Construction happens in two phases. A [`TrieBuilder`] accepts keywords and
//! grows the prefix tree; [`TrieBuilder::build`] then computes failure links
//! and inherited output sets in a single breadth-first pass and returns a
//! frozen [`PatternTrie`]. The builder is consumed, so nothing can be inserted
//! once failure links exist.

use std::collections::VecDeque;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::error::{AhoCorasickError, Result};
use super::node::{NodeId, Pattern, PatternId, TrieNode};

/// Mutable phase of the pattern trie.
///
/// Keywords are inserted one at a time. A keyword inserted twice keeps its
/// original [`PatternId`] (and therefore its position in every output list)
/// while the most recent payload replaces the previous one.
#[derive(Debug, Clone)]
pub struct TrieBuilder<P> {
    nodes: Vec<TrieNode>,
    patterns: Vec<Pattern<P>>,
    index: HashMap<String, PatternId>,
}

impl<P> TrieBuilder<P> {
    /// Creates a builder holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(0)],
            patterns: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts a keyword with its payload.
    ///
    /// # Arguments
    ///
    /// * `keyword` - The literal keyword. Must not be empty.
    /// * `payload` - Value reported with every match of `keyword`.
    ///
    /// # Returns
    ///
    /// The identifier of the pattern. Re-inserting a keyword returns the
    /// identifier assigned on first insertion.
    ///
    /// # Errors
    ///
    /// Returns [`AhoCorasickError::EmptyPattern`] if `keyword` is empty.
    pub fn insert<K>(&mut self, keyword: K, payload: P) -> Result<PatternId>
    where
        K: AsRef<str>,
    {
        let keyword = keyword.as_ref();
        if keyword.is_empty() {
            return Err(AhoCorasickError::EmptyPattern);
        }

        if let Some(&existing) = self.index.get(keyword) {
            tracing::trace!(keyword, "Replacing payload of duplicate pattern");
            self.patterns[existing.index()].payload = payload;
            return Ok(existing);
        }

        let mut node = NodeId::ROOT;
        for c in keyword.chars() {
            node = match self.nodes[node.index()].child(c) {
                Some(next) => next,
                None => {
                    let next = NodeId::new(self.nodes.len());
                    let depth = self.nodes[node.index()].depth + 1;
                    self.nodes.push(TrieNode::new(depth));
                    self.nodes[node.index()].children.insert(c, next);
                    next
                }
            };
        }

        let id = PatternId::new(self.patterns.len());
        self.patterns.push(Pattern::new(keyword.to_string(), payload));
        self.index.insert(keyword.to_string(), id);

        let terminal = &mut self.nodes[node.index()];
        terminal.is_terminal = true;
        terminal.output.push(id);

        Ok(id)
    }

    /// Number of distinct keywords inserted so far.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no keyword has been inserted.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Computes failure links and freezes the trie.
    pub fn build(mut self) -> PatternTrie<P> {
        self.build_failure_links();

        tracing::debug!(
            patterns = self.patterns.len(),
            nodes = self.nodes.len(),
            "Pattern trie constructed"
        );

        PatternTrie {
            nodes: self.nodes,
            patterns: self.patterns,
        }
    }

    /// Breadth-first pass over the trie assigning every node its failure link
    /// and appending the failure target's output to the node's own output.
    ///
    /// A failure target is always shallower than the node it is assigned to,
    /// so breadth-first order guarantees the target's output is final before
    /// it is copied.
    fn build_failure_links(&mut self) {
        let nodes = &mut self.nodes;
        nodes[NodeId::ROOT.index()].failure_link = NodeId::ROOT;

        let mut queue: VecDeque<NodeId> = sorted_edges(&nodes[NodeId::ROOT.index()])
            .into_iter()
            .map(|(_, child)| child)
            .collect();
        for &child in &queue {
            nodes[child.index()].failure_link = NodeId::ROOT;
        }

        while let Some(current) = queue.pop_front() {
            for (c, child) in sorted_edges(&nodes[current.index()]) {
                let mut fail = nodes[current.index()].failure_link;
                while !fail.is_root() && nodes[fail.index()].child(c).is_none() {
                    fail = nodes[fail.index()].failure_link;
                }

                let target = nodes[fail.index()].child(c).unwrap_or(NodeId::ROOT);
                nodes[child.index()].failure_link = target;

                if !nodes[target.index()].output.is_empty() {
                    let inherited = nodes[target.index()].output.clone();
                    nodes[child.index()].output.extend(inherited);
                }

                queue.push_back(child);
            }
        }
    }
}

impl<P> Default for TrieBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Edges of a node ordered by character so traversal order does not depend on
/// hash iteration order.
fn sorted_edges(node: &TrieNode) -> Vec<(char, NodeId)> {
    let mut edges: Vec<(char, NodeId)> = node.children.iter().map(|(&c, &n)| (c, n)).collect();
    edges.sort_unstable_by_key(|&(c, _)| c);
    edges
}

/// Frozen pattern trie with failure links and complete output sets.
///
/// A `PatternTrie` is only obtainable from [`TrieBuilder::build`],
/// [`PatternTrie::construct`] or deserialization, and the latter validates
/// every index before handing the trie out. It is never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "PatternTrieParts<P>",
    bound(serialize = "P: Serialize", deserialize = "P: Deserialize<'de>")
)]
pub struct PatternTrie<P> {
    nodes: Vec<TrieNode>,
    patterns: Vec<Pattern<P>>,
}

/// Serialized form of a [`PatternTrie`] that has not been validated yet.
///
/// Deserializing a `PatternTrie` directly folds validation failures into the
/// deserializer's error. Deserializing the parts and converting them with
/// [`PatternTrie::try_from`] keeps the [`AhoCorasickError`] intact.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
pub struct PatternTrieParts<P> {
    nodes: Vec<TrieNode>,
    patterns: Vec<Pattern<P>>,
}

impl<P> TryFrom<PatternTrieParts<P>> for PatternTrie<P> {
    type Error = AhoCorasickError;

    fn try_from(raw: PatternTrieParts<P>) -> Result<Self> {
        let trie = Self {
            nodes: raw.nodes,
            patterns: raw.patterns,
        };
        trie.validate()?;
        Ok(trie)
    }
}

impl<P> PatternTrie<P> {
    /// Builds a frozen trie from `(keyword, payload)` pairs.
    ///
    /// An empty iterator yields a root-only trie that never matches.
    ///
    /// # Errors
    ///
    /// Returns [`AhoCorasickError::EmptyPattern`] if any keyword is empty.
    pub fn construct<I, K>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
    {
        let mut builder = TrieBuilder::new();
        for (keyword, payload) in patterns {
            builder.insert(keyword, payload)?;
        }
        Ok(builder.build())
    }

    /// Returns a fresh builder.
    pub fn builder() -> TrieBuilder<P> {
        TrieBuilder::new()
    }

    /// The root node.
    pub fn root(&self) -> &TrieNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Looks up a node by identifier.
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id.index())
    }

    /// Looks up a pattern by identifier.
    pub fn pattern(&self, id: PatternId) -> Option<&Pattern<P>> {
        self.patterns.get(id.index())
    }

    /// All patterns in insertion order.
    pub fn patterns(&self) -> &[Pattern<P>] {
        &self.patterns
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the trie holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Follows goto and failure transitions for one character.
    ///
    /// Returns the root when no node on the failure chain has an edge for `c`.
    #[inline]
    pub(crate) fn next_state(&self, mut state: NodeId, c: char) -> NodeId {
        loop {
            let node = &self.nodes[state.index()];
            if let Some(next) = node.child(c) {
                return next;
            }
            if state.is_root() {
                return NodeId::ROOT;
            }
            state = node.failure_link;
        }
    }

    /// Direct access for the searcher once a state is known to be valid.
    #[inline]
    pub(crate) fn node_unchecked(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn pattern_unchecked(&self, id: PatternId) -> &Pattern<P> {
        &self.patterns[id.index()]
    }

    /// Checks the structural invariants that searching relies on.
    ///
    /// Tries produced by the builder always pass. This exists for tries
    /// materialized from an external representation.
    ///
    /// # Errors
    ///
    /// * [`AhoCorasickError::NotConstructed`] if there is no root node.
    /// * [`AhoCorasickError::InvalidNode`] / [`AhoCorasickError::InvalidPattern`]
    ///   for dangling indices.
    /// * [`AhoCorasickError::InvalidStructure`] if the nodes do not form a
    ///   tree, a failure link or output list differs from the one
    ///   construction would produce, or a keyword does not spell the path
    ///   it is reported on.
    pub fn validate(&self) -> Result<()> {
        let root = self.nodes.first().ok_or(AhoCorasickError::NotConstructed)?;
        if !root.failure_link.is_root() {
            return Err(AhoCorasickError::InvalidStructure(format!(
                "root failure link points to node {}",
                root.failure_link.index()
            )));
        }
        if root.depth != 0 || root.is_terminal || !root.output.is_empty() {
            return Err(AhoCorasickError::InvalidStructure(
                "root must have depth 0 and no output".to_string(),
            ));
        }

        let node_len = self.nodes.len();
        let pattern_len = self.patterns.len();
        let check_node = |id: NodeId| {
            if id.index() >= node_len {
                Err(AhoCorasickError::InvalidNode {
                    node: id.index(),
                    len: node_len,
                })
            } else {
                Ok(())
            }
        };

        for (index, node) in self.nodes.iter().enumerate() {
            for &child in node.children.values() {
                check_node(child)?;
                if node.depth.checked_add(1) != Some(self.nodes[child.index()].depth) {
                    return Err(AhoCorasickError::InvalidStructure(format!(
                        "child {} of node {index} is not one level deeper",
                        child.index()
                    )));
                }
            }

            check_node(node.failure_link)?;
            if index != NodeId::ROOT.index()
                && self.nodes[node.failure_link.index()].depth >= node.depth
            {
                return Err(AhoCorasickError::InvalidStructure(format!(
                    "failure link of node {index} does not point to a shallower node"
                )));
            }

            for &pattern in &node.output {
                let entry = self.patterns.get(pattern.index()).ok_or(
                    AhoCorasickError::InvalidPattern {
                        pattern: pattern.index(),
                        len: pattern_len,
                    },
                )?;
                if entry.char_len == 0 || entry.char_len > node.depth as usize {
                    return Err(AhoCorasickError::InvalidStructure(format!(
                        "pattern {} is longer than the path of node {index}",
                        pattern.index()
                    )));
                }
            }
        }

        self.validate_links()
    }

    /// Breadth-first check that every failure link and output list is the one
    /// [`TrieBuilder::build`] would compute. Assumes indices are in range.
    fn validate_links(&self) -> Result<()> {
        let invalid = |message: String| Err(AhoCorasickError::InvalidStructure(message));

        let mut visited = vec![false; self.nodes.len()];
        visited[NodeId::ROOT.index()] = true;
        let mut queue = VecDeque::from([NodeId::ROOT]);

        while let Some(current) = queue.pop_front() {
            for (c, child) in sorted_edges(&self.nodes[current.index()]) {
                if std::mem::replace(&mut visited[child.index()], true) {
                    return invalid(format!("node {} is reachable twice", child.index()));
                }

                let expected = if current.is_root() {
                    NodeId::ROOT
                } else {
                    self.next_state(self.nodes[current.index()].failure_link, c)
                };
                let node = &self.nodes[child.index()];
                if node.failure_link != expected {
                    return invalid(format!(
                        "failure link of node {} should be node {}",
                        child.index(),
                        expected.index()
                    ));
                }

                let inherited = &self.nodes[expected.index()].output;
                let own_len = usize::from(node.is_terminal);
                if node.output.len() != own_len + inherited.len()
                    || node.output[own_len..] != inherited[..]
                {
                    return invalid(format!(
                        "output of node {} does not match its failure link",
                        child.index()
                    ));
                }

                queue.push_back(child);
            }
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if !node.is_terminal || !visited[index] {
                continue;
            }
            let pattern = &self.patterns[node.output[0].index()];
            let spelled = pattern.keyword.chars().try_fold(NodeId::ROOT, |at, c| {
                self.nodes[at.index()].child(c)
            });
            if spelled != Some(NodeId::new(index))
                || pattern.char_len != pattern.keyword.chars().count()
            {
                return invalid(format!(
                    "pattern {} does not spell the path of node {index}",
                    node.output[0].index()
                ));
            }
        }

        Ok(())
    }
}
