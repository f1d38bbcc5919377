//! Prefix cursor for the clustering traversal
//!
//! Unlike `Vertex`, which denotes a link, a `Prefix` sits on a node and
//! asks questions about both of its slots at once: is there structure
//! beyond a slot, and does following it cross into a new symbol of the
//! key. Cursors are plain copies; equality means "same underlying node".

use crate::trie::arena::{Link, LinkTag, NodeId, Trie};

/// Read-only cluster cursor at one trie node
#[derive(Clone, Copy, Debug)]
pub struct Prefix<'a> {
    trie: &'a Trie,
    node: NodeId,
}

impl<'a> Prefix<'a> {
    pub(crate) fn new(trie: &'a Trie, node: NodeId) -> Self {
        Prefix { trie, node }
    }

    fn link(&self, slot: u8) -> Link {
        self.trie.node(self.node).links[usize::from(slot)]
    }

    /// True when slot `slot` holds no further structure: a backward link,
    /// or the structural root's degenerate self-link
    pub fn get_xtag(&self, slot: u8) -> bool {
        let link = self.link(slot);
        link.tag == LinkTag::Backward || link.target == self.node
    }

    /// True when following slot `slot` crosses into a new symbol
    pub fn symbol_limit(&self, slot: u8) -> bool {
        let here = self.trie.node(self.node).bit;
        let there = self.trie.node(self.link(slot).target).bit;
        self.trie.symbol_of(there) != self.trie.symbol_of(here)
    }

    /// Move the cursor to the node behind slot `slot`
    pub fn go_xlink(&mut self, slot: u8) {
        self.node = self.link(slot).target;
    }

    /// Move the cursor one level up; no-op at the structural root
    pub fn go_parent(&mut self) {
        if let Some((parent, _)) = self.trie.node(self.node).parent {
            self.node = parent;
        }
    }

    /// Which parent slot this node hangs from (0 at the structural root)
    pub fn get_parent_id(&self) -> u8 {
        self.trie
            .node(self.node)
            .parent
            .map(|(_, slot)| slot)
            .unwrap_or(0)
    }

    /// Uid of the node under the cursor
    pub fn node_uid(&self) -> NodeId {
        self.node
    }
}

impl PartialEq for Prefix<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Prefix<'_> {}
