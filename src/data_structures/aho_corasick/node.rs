//! Node and identifier types for the Aho-Corasick pattern trie.
//!
//! Nodes live in a flat table owned by the trie. Edges and failure links are
//! plain indices into that table, so a failure link pointing back towards the
//! root never creates an ownership cycle.

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// Index of a node in the trie's node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node. Always the first entry of the node table.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates an identifier from a table index.
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the table index of this node.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this identifier refers to the root.
    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

/// Index of a pattern in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(u32);

impl PatternId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the insertion index of this pattern.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the pattern trie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrieNode {
    /// Outgoing edges keyed by character
    pub(crate) children: FnvHashMap<char, NodeId>,

    /// Whether the path from the root to this node spells a complete pattern
    pub(crate) is_terminal: bool,

    /// Patterns recognized at this node: the node's own hit first, then
    /// everything inherited through the failure link
    pub(crate) output: Vec<PatternId>,

    /// Node for the longest proper suffix of this path that is also a prefix
    /// of some pattern
    pub(crate) failure_link: NodeId,

    /// Number of characters between the root and this node
    pub(crate) depth: u32,
}

impl TrieNode {
    /// Creates a node at the given depth with its failure link on the root.
    pub(crate) fn new(depth: u32) -> Self {
        Self {
            children: FnvHashMap::default(),
            is_terminal: false,
            output: Vec::new(),
            failure_link: NodeId::ROOT,
            depth,
        }
    }

    /// Returns the child reached by `c`, if any.
    #[inline]
    pub fn child(&self, c: char) -> Option<NodeId> {
        self.children.get(&c).copied()
    }

    /// Whether a pattern ends exactly at this node.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Patterns recognized when the automaton is in this node.
    pub fn output(&self) -> &[PatternId] {
        &self.output
    }

    /// The failure link of this node.
    pub fn failure_link(&self) -> NodeId {
        self.failure_link
    }

    /// Depth of this node in the trie.
    pub fn depth(&self) -> usize {
        self.depth as usize
    }
}

/// A keyword and the payload carried with every match of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern<P> {
    /// The literal keyword
    pub(crate) keyword: String,

    /// Opaque payload copied into every match
    pub(crate) payload: P,

    /// Length of the keyword in characters
    pub(crate) char_len: usize,
}

impl<P> Pattern<P> {
    pub(crate) fn new(keyword: String, payload: P) -> Self {
        let char_len = keyword.chars().count();
        Self {
            keyword,
            payload,
            char_len,
        }
    }

    /// The keyword text.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The payload associated with the keyword.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Length of the keyword in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_links_to_root() {
        let node = TrieNode::new(3);
        assert_eq!(node.failure_link(), NodeId::ROOT);
        assert_eq!(node.depth(), 3);
        assert!(!node.is_terminal());
        assert!(node.output().is_empty());
        assert!(node.child('a').is_none());
    }

    #[test]
    fn test_pattern_counts_chars() {
        let pattern = Pattern::new("café".to_string(), 0.5);
        assert_eq!(pattern.char_len(), 4);
        assert_eq!(pattern.keyword().len(), 5);
    }
}
