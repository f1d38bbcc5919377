//! Arena storage for the trie view
//!
//! Nodes live in a flat `Vec` and refer to each other by index. A PATRICIA
//! trie stores no null pointers: a slot with no child holds a backward link
//! to an already-allocated node (an ancestor, or the node itself for a
//! leaf). A backward link is therefore just an id lookup, never a new
//! allocation, and the arena needs no cycle-aware memory management.

use crate::trie::{Prefix, Vertex};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-node unique identifier, used verbatim as the DOT node name `n{id:x}`
pub type NodeId = usize;

/// Id of the structural root
pub const ROOT: NodeId = 0;

/// Direction bit of a link
///
/// Forward links point at a genuine child, strictly deeper in preorder.
/// Backward links point at an already-visited node and are how the trie
/// encodes "no child here".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkTag {
    Forward,
    Backward,
}

/// One of a node's two outgoing links
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub target: NodeId,
    pub tag: LinkTag,
}

/// Total classification of a link by its `(tag, slot)` bits
///
/// The two raw bits are folded into an explicit four-case enum once, so an
/// invalid combination cannot be half-handled by independent bit tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkClass {
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

impl LinkClass {
    /// Classify a link by its tag and the slot (`qid`) it occupies
    pub fn classify(tag: LinkTag, qid: u8) -> LinkClass {
        match (tag, qid == 0) {
            (LinkTag::Forward, true) => LinkClass::ForwardLeft,
            (LinkTag::Forward, false) => LinkClass::ForwardRight,
            (LinkTag::Backward, true) => LinkClass::BackwardLeft,
            (LinkTag::Backward, false) => LinkClass::BackwardRight,
        }
    }
}

/// One trie node as seen by the renderer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Key material associated with the node, used as its DOT label
    pub key: String,
    /// Levels elided by path compression; `None` is the sentinel carried
    /// only by the structural root ("no real skip", printed as -1)
    pub skip: Option<u32>,
    /// Key-bit offset this node examines; drives symbol-boundary checks
    pub bit: u32,
    /// The two outgoing links, left (0) and right (1)
    pub links: [Link; 2],
    /// Which slot of which node points here forward; `None` for the root
    pub parent: Option<(NodeId, u8)>,
}

/// A read-only snapshot of a PATRICIA trie
///
/// The renderer never mutates this; the construction methods exist so the
/// trie's owner (or a test) can assemble the view. The empty trie is the
/// structural root alone with both slots as forward self-links.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trie {
    nodes: Vec<Node>,
    symbol_bits: u32,
}

impl Trie {
    /// Create an empty trie view with byte-sized symbols
    pub fn new() -> Self {
        Self::with_symbol_bits(8)
    }

    /// Create an empty trie view with `symbol_bits` key bits per symbol
    pub fn with_symbol_bits(symbol_bits: u32) -> Self {
        let root = Node {
            key: String::new(),
            skip: None,
            bit: 0,
            links: [Link {
                target: ROOT,
                tag: LinkTag::Forward,
            }; 2],
            parent: None,
        };
        Trie {
            nodes: vec![root],
            symbol_bits,
        }
    }

    /// Parse a JSON snapshot; run `validate` before rendering it
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Append an unlinked node; its slots start as backward self-links
    pub fn push_node(&mut self, key: impl Into<String>, skip: u32, bit: u32) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            key: key.into(),
            skip: Some(skip),
            bit,
            links: [Link {
                target: id,
                tag: LinkTag::Backward,
            }; 2],
            parent: None,
        });
        id
    }

    /// Wire slot `slot` of `from` to `to`
    ///
    /// Forward links also record the parent slot on the target. Panics if
    /// either id is out of range or `slot > 1`.
    pub fn set_link(&mut self, from: NodeId, slot: u8, to: NodeId, tag: LinkTag) {
        assert!(to < self.nodes.len(), "link target out of range");
        self.nodes[from].links[usize::from(slot)] = Link { target: to, tag };
        if tag == LinkTag::Forward && to != from {
            self.nodes[to].parent = Some((from, slot));
        }
    }

    /// Number of nodes in the arena (the root included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the structural root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Access a node by id
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Key bits per symbol
    pub fn symbol_bits(&self) -> u32 {
        self.symbol_bits
    }

    /// Index of the symbol a key-bit offset falls in
    pub(crate) fn symbol_of(&self, bit: u32) -> u32 {
        bit / self.symbol_bits
    }

    /// Id of the structural root
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// The whole-trie entry vertex: slot 0 of the structural root
    pub fn root_vertex(&self) -> Vertex<'_> {
        self.vertex(ROOT, 0)
    }

    /// Cursor at slot `slot` of node `node`
    pub fn vertex(&self, node: NodeId, slot: u8) -> Vertex<'_> {
        Vertex::new(self, node, slot)
    }

    /// Cluster cursor at `node`
    pub fn prefix(&self, node: NodeId) -> Prefix<'_> {
        Prefix::new(self, node)
    }

    /// Check the structural invariants the traversals rely on
    ///
    /// Rendering a trie that fails validation is a precondition violation:
    /// the emitter itself performs no recovery. Intended for snapshots that
    /// crossed a serialization boundary.
    pub fn validate(&self) -> Result<()> {
        if self.symbol_bits == 0 {
            return Err(Error::Corruption("symbol_bits must be positive".into()));
        }
        if self.nodes.is_empty() {
            return Err(Error::Corruption("empty node arena".into()));
        }
        let root = &self.nodes[ROOT];
        if root.skip.is_some() {
            return Err(Error::Corruption(
                "structural root must carry the skip sentinel".into(),
            ));
        }
        if root.parent.is_some() {
            return Err(Error::Corruption("structural root has a parent".into()));
        }

        for (id, node) in self.nodes.iter().enumerate() {
            if id != ROOT && node.skip.is_none() {
                return Err(Error::Corruption(format!("node {id} missing its skip")));
            }
            if let Some((p, ps)) = node.parent {
                if p >= self.nodes.len() || ps > 1 {
                    return Err(Error::Corruption(format!(
                        "node {id} records missing parent {p}/{ps}"
                    )));
                }
            }
            for slot in 0..2u8 {
                let link = node.links[usize::from(slot)];
                if link.target >= self.nodes.len() {
                    return Err(Error::Corruption(format!(
                        "node {id} slot {slot} targets missing node {}",
                        link.target
                    )));
                }
                match link.tag {
                    LinkTag::Forward if link.target == id => {
                        if id != ROOT {
                            return Err(Error::Corruption(format!(
                                "forward self-link outside the structural root at node {id}"
                            )));
                        }
                    }
                    LinkTag::Forward => match self.nodes[link.target].parent {
                        Some((p, ps)) if p == id && ps == slot => {}
                        _ => {
                            return Err(Error::Corruption(format!(
                                "forward link {id}/{slot} not mirrored by a parent record"
                            )));
                        }
                    },
                    LinkTag::Backward => {
                        if !self.is_ancestor_or_self(link.target, id) {
                            return Err(Error::Corruption(format!(
                                "backward link {id}/{slot} targets non-ancestor {}",
                                link.target
                            )));
                        }
                    }
                }
            }
        }

        // Every node must be reached by exactly one forward path from the
        // root; a second forward arrival means the tag bits lie.
        let mut seen = vec![false; self.nodes.len()];
        seen[ROOT] = true;
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            for slot in 0..2 {
                let link = self.nodes[id].links[slot];
                if link.tag == LinkTag::Forward && link.target != id {
                    if seen[link.target] {
                        return Err(Error::Corruption(format!(
                            "forward link targets already-visited node {}",
                            link.target
                        )));
                    }
                    seen[link.target] = true;
                    stack.push(link.target);
                }
            }
        }
        if let Some(orphan) = seen.iter().position(|s| !s) {
            return Err(Error::Corruption(format!(
                "node {orphan} unreachable from the root"
            )));
        }

        Ok(())
    }

    // the climb is bounded by the arena size so a cyclic parent chain in
    // a corrupt snapshot cannot hang validation
    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        for _ in 0..self.nodes.len() {
            if node == candidate {
                return true;
            }
            match self.nodes[node].parent {
                Some((p, _)) => node = p,
                None => return false,
            }
        }
        false
    }
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}
