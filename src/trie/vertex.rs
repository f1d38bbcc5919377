//! Vertex cursor and preorder traversal
//!
//! A vertex denotes one link: slot `qid` of node `q`. The preorder
//! sequence yields the entry vertex first, then both slots of every node
//! reached through forward links, left before right. Backward links are
//! visited but never descended, so the walk is finite on a well-formed
//! trie.

use crate::trie::arena::{Link, LinkClass, LinkTag, NodeId, Trie};
use crate::trie::Prefix;

/// Read-only cursor at one link of the trie
#[derive(Clone, Copy, Debug)]
pub struct Vertex<'a> {
    trie: &'a Trie,
    q: NodeId,
    qid: u8,
}

impl<'a> Vertex<'a> {
    pub(crate) fn new(trie: &'a Trie, q: NodeId, qid: u8) -> Self {
        debug_assert!(qid < 2, "slot must be 0 or 1");
        Vertex { trie, q, qid }
    }

    fn link(&self) -> Link {
        self.trie.node(self.q).links[usize::from(self.qid)]
    }

    /// Which slot of the owner this vertex denotes
    pub fn get_qid(&self) -> u8 {
        self.qid
    }

    /// Direction bit of the link
    pub fn get_qtag(&self) -> LinkTag {
        self.link().tag
    }

    /// Four-way classification of the link
    pub fn class(&self) -> LinkClass {
        LinkClass::classify(self.get_qtag(), self.qid)
    }

    /// The other slot of the same node
    pub fn sibling(&self) -> Vertex<'a> {
        Vertex::new(self.trie, self.q, 1 - self.qid)
    }

    /// Skip count of the owning node; `None` marks the structural root
    pub fn skip(&self) -> Option<u32> {
        self.trie.node(self.q).skip
    }

    /// Uid of the owning node (the link source)
    pub fn node_q_uid(&self) -> NodeId {
        self.q
    }

    /// Uid of the link target
    pub fn node_p_uid(&self) -> NodeId {
        self.link().target
    }

    /// Key material of the owning node
    pub fn parent_key(&self) -> &'a str {
        &self.trie.node(self.q).key
    }

    /// Lazy preorder sequence of this vertex's subtree
    ///
    /// Forward-only and non-restartable; take a fresh instance per pass.
    pub fn preorder(&self) -> Preorder<'a> {
        Preorder {
            trie: self.trie,
            stack: vec![(self.q, self.qid)],
        }
    }

    /// Cluster cursor positioned at the link target
    pub fn prefix(&self) -> Prefix<'a> {
        Prefix::new(self.trie, self.link().target)
    }

    /// True when descending this link makes progress: a forward link that
    /// is not the structural root's degenerate self-link
    fn descends(&self) -> bool {
        let link = self.link();
        link.tag == LinkTag::Forward && link.target != self.q
    }
}

impl PartialEq for Vertex<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.q == other.q && self.qid == other.qid
    }
}

impl Eq for Vertex<'_> {}

/// Preorder iterator over vertices, node before children, left before right
pub struct Preorder<'a> {
    trie: &'a Trie,
    stack: Vec<(NodeId, u8)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Vertex<'a>;

    fn next(&mut self) -> Option<Vertex<'a>> {
        let (q, qid) = self.stack.pop()?;
        let vertex = Vertex::new(self.trie, q, qid);
        if vertex.descends() {
            let p = vertex.node_p_uid();
            self.stack.push((p, 1));
            self.stack.push((p, 0));
        }
        Some(vertex)
    }
}
