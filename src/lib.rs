//! # patricia_dot
//!
//! Graphviz DOT rendering of PATRICIA trie internals.
//!
//! A PATRICIA trie stores no null pointers: a slot with no child holds a
//! tagged backward link to an already-visited node. This crate walks a
//! read-only view of such a trie and emits a `strict digraph` document in
//! which every link is classified as forward/backward and left/right,
//! with backward links drawn dotted outside the tree skeleton. An
//! optional second pass groups nodes into subgraph clusters along symbol
//! (character) boundaries of the keys.
//!
//! ## Example
//!
//! ```ignore
//! use patricia_dot::{DotCreator, Trie};
//!
//! let trie: Trie = serde_json::from_str(&snapshot)?;
//! trie.validate()?;
//! let mut dot = DotCreator::new(std::io::stdout().lock())?;
//! dot.create(trie.root_vertex(), true)?;
//! dot.finish()?;
//! ```

pub mod dot;
pub mod trie;

mod error;

pub use dot::{build_clusters, Cluster, DotCreator, DEFAULT_DPI};
pub use error::{Error, Result};
pub use trie::{Link, LinkClass, LinkTag, Node, NodeId, Prefix, Preorder, Trie, Vertex, ROOT};
