//! Graphviz DOT emission
//!
//! `DotCreator` wraps an output sink for the lifetime of one document:
//! the header is written on construction, the closing brace on `finish`
//! (or on drop, so an aborted render still leaves a delimited document).
//! `create` renders one subtree: node declarations from the preorder
//! walk, the placeholder sibling edge, then one pass per link class, and
//! optionally the symbol clusters.

mod cluster;

pub use cluster::{build_clusters, Cluster};

use crate::trie::{LinkClass, LinkTag, NodeId, Vertex};
use crate::Result;
use std::io::Write;

/// Default rendering resolution hint
pub const DEFAULT_DPI: u32 = 96;

/// Writes one DOT document describing trie subtrees
pub struct DotCreator<W: Write> {
    out: Option<W>,
}

impl<W: Write> DotCreator<W> {
    /// Open a document on `out` with the default resolution
    pub fn new(out: W) -> Result<Self> {
        Self::with_dpi(out, DEFAULT_DPI)
    }

    /// Open a document on `out` with an explicit resolution hint
    pub fn with_dpi(mut out: W, dpi: u32) -> Result<Self> {
        writeln!(out, "strict digraph")?;
        writeln!(out, "{{")?;
        writeln!(out, "// common props")?;
        writeln!(out, "dpi = {dpi}")?;
        writeln!(out, "edge[arrowhead = empty]")?;
        Ok(DotCreator { out: Some(out) })
    }

    /// Close the document and hand the sink back
    pub fn finish(mut self) -> Result<W> {
        let mut out = self.out.take().expect("sink present until finish");
        writeln!(out, "}}")?;
        Ok(out)
    }

    /// Render the subtree behind `root`
    ///
    /// Reads the trie, writes the sink, mutates nothing. `root` must be a
    /// valid attached vertex of a well-formed trie; I/O failures propagate
    /// and leave the document body truncated.
    pub fn create(&mut self, root: Vertex<'_>, clustering: bool) -> Result<()> {
        let out = self.out.as_mut().expect("sink present until finish");
        let init_id = root.get_qid();
        let sibl_tag = root.sibling().get_qtag();

        writeln!(out, "\n// BEGIN create from vertex")?;
        writeln!(out, "\n// node definitions (preorder depth-first)")?;
        writeln!(
            out,
            "sibling[shape = plaintext, label = {}]",
            if root.skip().is_none() {
                "\"nil\""
            } else {
                "\"...\""
            }
        )?;
        // each slot owner is declared through its entry-orientation slot,
        // which names every subtree node exactly once
        for v in root.preorder() {
            if v.get_qid() == init_id {
                writeln!(
                    out,
                    "n{:x}[label = \"{}\\n{}\"]",
                    v.node_q_uid(),
                    escape_label(v.parent_key()),
                    signed_skip(v.skip())
                )?;
            }
        }

        writeln!(out, "\n// root link to sibling")?;
        let tail = if init_id == 0 { "sw" } else { "se" };
        let (head, style) = match (init_id == 0, sibl_tag) {
            (true, LinkTag::Forward) => ("nw", "solid"),
            (false, LinkTag::Forward) => ("ne", "solid"),
            (true, LinkTag::Backward) => ("se", "dotted"),
            (false, LinkTag::Backward) => ("sw", "dotted"),
        };
        writeln!(
            out,
            "n{:x}->sibling[tailport = {tail}, headport = {head}, style = {style}]",
            root.node_q_uid()
        )?;

        writeln!(out, "\n// forward left links")?;
        writeln!(out, "edge[tailport = sw, weight = 2]")?;
        // a left spine chains into one polyline; the arrow to the next
        // preorder owner is written before that vertex is tested, so the
        // closing edge of every run is still emitted
        let mut linkp = false;
        for v in root.preorder() {
            if linkp {
                write!(out, "->n{:x}", v.node_q_uid())?;
            }
            if v.class() == LinkClass::ForwardLeft {
                if !linkp {
                    write!(out, "n{:x}", v.node_q_uid())?;
                }
                linkp = true;
            } else {
                if linkp {
                    writeln!(out)?;
                }
                linkp = false;
            }
        }
        if linkp {
            writeln!(out)?;
        }

        writeln!(out, "\n// forward right links")?;
        writeln!(out, "edge[tailport = se]")?;
        // grouped by source owner; uid 0 is a real arena id, so "no
        // previous source" is an Option rather than a zero sentinel
        let mut prev: Option<NodeId> = None;
        for v in root.preorder() {
            if v.class() == LinkClass::ForwardRight {
                if prev != Some(v.node_q_uid()) {
                    if prev.is_some() {
                        writeln!(out)?;
                    }
                    write!(out, "n{:x}", v.node_q_uid())?;
                }
                let target = v.node_p_uid();
                prev = Some(target);
                write!(out, "->n{:x}", target)?;
            }
        }
        if prev.is_some() {
            writeln!(out)?;
        }

        writeln!(out, "\n// backward left links")?;
        writeln!(out, "edge[style = dotted, tailport = sw, weight = 1]")?;
        for v in root.preorder() {
            if v.class() == LinkClass::BackwardLeft {
                writeln!(out, "n{:x}->n{:x}", v.node_q_uid(), v.node_p_uid())?;
            }
        }

        writeln!(out, "\n// backward right links")?;
        writeln!(out, "edge[tailport = se]")?;
        for v in root.preorder() {
            if v.class() == LinkClass::BackwardRight {
                writeln!(out, "n{:x}->n{:x}", v.node_q_uid(), v.node_p_uid())?;
            }
        }

        if clustering {
            writeln!(out, "\n// clustering nodes by symbol boundaries")?;
            let tree = build_clusters(&root.prefix());
            let mut counter = 0;
            write_cluster(out, &tree, &mut counter)?;
        }

        writeln!(out, "\n// END create from vertex")?;
        Ok(())
    }
}

impl<W: Write> Drop for DotCreator<W> {
    fn drop(&mut self) {
        if let Some(out) = self.out.as_mut() {
            let _ = writeln!(out, "}}");
        }
    }
}

/// Serialize a cluster tree; fenced clusters become numbered subgraphs,
/// children follow their parent as sibling subgraphs
fn write_cluster<W: Write>(out: &mut W, cluster: &Cluster, counter: &mut usize) -> Result<()> {
    if cluster.fenced {
        write!(
            out,
            "subgraph cluster_{counter}\n{{ style = \"dashed, rounded, setlinewidth(0.2)\"; "
        )?;
        *counter += 1;
        for (i, uid) in cluster.members.iter().enumerate() {
            if i > 0 {
                write!(out, "; ")?;
            }
            write!(out, "n{uid:x}")?;
        }
        writeln!(out, " }}")?;
    }
    for child in &cluster.children {
        write_cluster(out, child, counter)?;
    }
    Ok(())
}

fn signed_skip(skip: Option<u32>) -> i64 {
    skip.map(i64::from).unwrap_or(-1)
}

fn escape_label(key: &str) -> String {
    key.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::{LinkTag, Trie, ROOT};

    fn render(trie: &Trie, node: NodeId, slot: u8, clustering: bool) -> String {
        let mut dot = DotCreator::new(Vec::new()).unwrap();
        dot.create(trie.vertex(node, slot), clustering).unwrap();
        String::from_utf8(dot.finish().unwrap()).unwrap()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_single_node_trie() {
        let trie = Trie::new();
        let out = render(&trie, ROOT, 0, false);

        assert!(out.contains("sibling[shape = plaintext, label = \"nil\"]"));
        assert_eq!(count(&out, "[label = \"\\n-1\"]"), 1);
        assert!(out.contains("n0->sibling[tailport = sw, headport = nw, style = solid]"));
        // no forward or backward edge statements, only the bare root name
        assert_eq!(count(&out, "->"), 1); // the sibling edge
        assert!(!out.contains("dotted"));
        assert!(out.starts_with("strict digraph\n{\n"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_backward_right_to_subtree_root() {
        let mut trie = Trie::new();
        let a = trie.push_node("a", 0, 1);
        let b = trie.push_node("b", 1, 2);
        trie.set_link(ROOT, 0, a, LinkTag::Forward);
        trie.set_link(a, 0, b, LinkTag::Forward);
        trie.set_link(b, 1, a, LinkTag::Backward);
        trie.validate().unwrap();

        // render the subtree entered through a's left slot
        let out = render(&trie, a, 0, false);

        assert_eq!(count(&out, "n2->n1"), 1);
        assert!(out.contains("edge[style = dotted, tailport = sw, weight = 1]"));
        // a is declared once, never re-declared for the backward target
        assert_eq!(count(&out, "n1[label"), 1);
        assert_eq!(count(&out, "n2[label"), 1);
        // outside the subtree there is more trie, so the sibling is "..."
        assert!(out.contains("label = \"...\""));
    }

    #[test]
    fn test_every_referenced_node_is_declared_first() {
        let mut trie = Trie::new();
        let a = trie.push_node("a", 0, 1);
        let b = trie.push_node("b", 1, 2);
        let c = trie.push_node("c", 8, 10);
        trie.set_link(ROOT, 0, a, LinkTag::Forward);
        trie.set_link(a, 0, b, LinkTag::Forward);
        trie.set_link(a, 1, c, LinkTag::Forward);
        trie.set_link(b, 1, a, LinkTag::Backward);
        trie.set_link(c, 0, a, LinkTag::Backward);
        trie.validate().unwrap();

        let out = render(&trie, ROOT, 0, false);
        for id in 0..trie.len() {
            let decl = format!("n{id:x}[label");
            assert_eq!(count(&out, &decl), 1, "node {id} declared exactly once");
            let decl_pos = out.find(&decl).unwrap();
            // no edge references the node before its declaration
            let head = &out[..decl_pos];
            assert!(!head.contains(&format!("n{id:x}->")));
            assert!(!head.contains(&format!("->n{id:x}")));
        }
    }

    #[test]
    fn test_forward_left_spine_chains() {
        let mut trie = Trie::new();
        let a = trie.push_node("a", 0, 1);
        let b = trie.push_node("b", 1, 2);
        let c = trie.push_node("c", 1, 3);
        trie.set_link(ROOT, 0, a, LinkTag::Forward);
        trie.set_link(a, 0, b, LinkTag::Forward);
        trie.set_link(b, 0, c, LinkTag::Forward);
        trie.set_link(b, 1, a, LinkTag::Backward);
        trie.set_link(c, 1, a, LinkTag::Backward);
        trie.validate().unwrap();

        let out = render(&trie, ROOT, 0, false);
        assert!(out.contains("n0->n1->n2->n3\n"));
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut trie = Trie::new();
        let a = trie.push_node("a", 0, 1);
        let b = trie.push_node("b", 1, 2);
        trie.set_link(ROOT, 0, a, LinkTag::Forward);
        trie.set_link(a, 1, b, LinkTag::Forward);
        trie.set_link(b, 0, a, LinkTag::Backward);
        trie.validate().unwrap();

        let first = render(&trie, ROOT, 0, true);
        let second = render(&trie, ROOT, 0, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_drop_closes_the_document() {
        let mut sink = Vec::new();
        {
            let _dot = DotCreator::new(&mut sink).unwrap();
        }
        let out = String::from_utf8(sink).unwrap();
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_cluster_section_lists_fenced_groups() {
        let mut trie = Trie::new();
        let a = trie.push_node("a", 0, 1);
        let b = trie.push_node("b", 1, 3);
        let c = trie.push_node("c", 8, 10);
        trie.set_link(ROOT, 0, a, LinkTag::Forward);
        trie.set_link(a, 0, b, LinkTag::Forward);
        trie.set_link(a, 1, c, LinkTag::Forward);
        trie.set_link(b, 1, a, LinkTag::Backward);
        trie.set_link(c, 0, a, LinkTag::Backward);
        trie.validate().unwrap();

        let out = render(&trie, ROOT, 0, true);
        assert!(out.contains(
            "subgraph cluster_0\n{ style = \"dashed, rounded, setlinewidth(0.2)\"; n1; n2 }"
        ));
        assert!(out.contains(
            "subgraph cluster_1\n{ style = \"dashed, rounded, setlinewidth(0.2)\"; n3 }"
        ));
    }
}
