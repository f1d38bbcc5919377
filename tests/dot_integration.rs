//! End-to-end rendering tests
//!
//! Builds a small but complete trie view and checks the emitted DOT
//! document, both byte-for-byte and against the structural properties the
//! renderer guarantees.

use patricia_dot::{DotCreator, LinkTag, Trie, ROOT};

/// Keys "ca*", "car", "cold" compressed into three nodes:
/// n1 branches inside the first symbol toward n2 and across the symbol
/// boundary toward n3; leaves carry the usual backward links.
fn sample_trie() -> Trie {
    let mut trie = Trie::new();
    let a = trie.push_node("ca", 4, 5);
    let b = trie.push_node("car", 0, 6);
    let c = trie.push_node("cold", 5, 12);
    trie.set_link(ROOT, 0, a, LinkTag::Forward);
    trie.set_link(a, 0, b, LinkTag::Forward);
    trie.set_link(a, 1, c, LinkTag::Forward);
    trie.set_link(b, 1, a, LinkTag::Backward);
    trie.set_link(c, 1, a, LinkTag::Backward);
    trie.validate().unwrap();
    trie
}

fn render(trie: &Trie, clustering: bool) -> String {
    let mut dot = DotCreator::new(Vec::new()).unwrap();
    dot.create(trie.root_vertex(), clustering).unwrap();
    String::from_utf8(dot.finish().unwrap()).unwrap()
}

#[test]
fn test_full_document_layout() {
    let expected = r#"strict digraph
{
// common props
dpi = 96
edge[arrowhead = empty]

// BEGIN create from vertex

// node definitions (preorder depth-first)
sibling[shape = plaintext, label = "nil"]
n0[label = "\n-1"]
n1[label = "ca\n4"]
n2[label = "car\n0"]
n3[label = "cold\n5"]

// root link to sibling
n0->sibling[tailport = sw, headport = nw, style = solid]

// forward left links
edge[tailport = sw, weight = 2]
n0->n1->n2

// forward right links
edge[tailport = se]
n1->n3

// backward left links
edge[style = dotted, tailport = sw, weight = 1]
n2->n2
n3->n3

// backward right links
edge[tailport = se]
n2->n1
n3->n1

// clustering nodes by symbol boundaries
subgraph cluster_0
{ style = "dashed, rounded, setlinewidth(0.2)"; n1; n2 }
subgraph cluster_1
{ style = "dashed, rounded, setlinewidth(0.2)"; n3 }

// END create from vertex
}
"#;
    assert_eq!(render(&sample_trie(), true), expected);
}

#[test]
fn test_declarations_cover_subtree_exactly_once() {
    let trie = sample_trie();
    let out = render(&trie, false);
    for id in 0..trie.len() {
        assert_eq!(
            out.matches(&format!("n{id:x}[label")).count(),
            1,
            "node {id} must be declared exactly once"
        );
    }
}

#[test]
fn test_backward_edges_point_at_declared_ancestors() {
    let trie = sample_trie();
    let out = render(&trie, false);
    let decl_section_end = out.find("// root link to sibling").unwrap();
    let decls = &out[..decl_section_end];
    for line in out.lines() {
        // plain n->n lines in the dotted sections are backward edges
        if let Some((_, target)) = line.split_once("->n") {
            if line.starts_with('n') && !line.contains('[') {
                let target = target.split('-').next().unwrap();
                assert!(
                    decls.contains(&format!("n{target}[label")),
                    "edge target n{target} must be declared up front"
                );
            }
        }
    }
}

#[test]
fn test_clustering_flag_gates_the_cluster_section() {
    let trie = sample_trie();
    assert!(!render(&trie, false).contains("subgraph"));
    assert!(render(&trie, true).contains("subgraph cluster_0"));
}

#[test]
fn test_rendering_twice_is_byte_identical() {
    let trie = sample_trie();
    assert_eq!(render(&trie, true), render(&trie, true));
    assert_eq!(render(&trie, false), render(&trie, false));
}

#[test]
fn test_subtree_render_uses_entry_orientation() {
    let trie = sample_trie();
    // enter through n1's right slot: only the n3 subtree is visible
    let mut dot = DotCreator::new(Vec::new()).unwrap();
    dot.create(trie.vertex(1, 1), false).unwrap();
    let out = String::from_utf8(dot.finish().unwrap()).unwrap();

    assert_eq!(out.matches("n1[label").count(), 1);
    assert_eq!(out.matches("n3[label").count(), 1);
    assert!(!out.contains("n2[label"));
    // the subtree is not the whole trie, so the sibling is elided material
    assert!(out.contains("label = \"...\""));
}
