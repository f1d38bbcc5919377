//! Symbol clustering
//!
//! Groups nodes into visual sub-clusters by shared key-prefix symbols: a
//! run of nodes connected by present, non-symbol-crossing links belongs to
//! one cluster; every present symbol-crossing link starts a child cluster.
//!
//! The original traversal walked with parent-pointer climbs because the
//! cursor offers no sibling iteration. Here the walk is an explicit
//! depth-first stack carrying a per-frame next-slot marker; visit order is
//! unchanged and termination is immediate from the stack discipline.

use crate::trie::{NodeId, Prefix};

/// A same-symbol run of nodes plus the clusters hanging off it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    /// Member node uids in visit order; the cluster root comes first
    pub members: Vec<NodeId>,
    /// One child per symbol-crossing link out of this cluster
    pub children: Vec<Cluster>,
    /// Whether the cluster gets a visual fence in the document: true when
    /// at least one root slot is absent or symbol-crossing
    pub fenced: bool,
}

impl Cluster {
    /// Total number of nodes in this cluster and all descendants
    pub fn node_count(&self) -> usize {
        self.members.len() + self.children.iter().map(Cluster::node_count).sum::<usize>()
    }
}

/// Build the cluster tree rooted at `root`
///
/// Deterministic and read-only; member order is the preorder of the
/// same-symbol walk, slot 0 before slot 1.
pub fn build_clusters(root: &Prefix<'_>) -> Cluster {
    let fenced = (0..2).any(|slot| root.get_xtag(slot) || root.symbol_limit(slot));
    let mut members = Vec::new();
    let mut pending = Vec::new();

    visit(root, &mut members, &mut pending);
    let mut stack: Vec<(Prefix<'_>, u8)> = vec![(*root, 0)];
    while let Some(frame) = stack.last_mut() {
        let (cur, slot) = *frame;
        if slot >= 2 {
            stack.pop();
            continue;
        }
        frame.1 += 1;
        if !cur.get_xtag(slot) && !cur.symbol_limit(slot) {
            let mut child = cur;
            child.go_xlink(slot);
            visit(&child, &mut members, &mut pending);
            stack.push((child, 0));
        }
    }

    let children = pending.iter().map(build_clusters).collect();
    Cluster {
        members,
        children,
        fenced,
    }
}

/// Record a walk position: the node joins the open cluster, and each
/// present symbol-crossing slot becomes a pending child-cluster root
fn visit<'a>(cur: &Prefix<'a>, members: &mut Vec<NodeId>, pending: &mut Vec<Prefix<'a>>) {
    members.push(cur.node_uid());
    for slot in 0..2 {
        if !cur.get_xtag(slot) && cur.symbol_limit(slot) {
            let mut child = *cur;
            child.go_xlink(slot);
            pending.push(child);
        }
    }
}
