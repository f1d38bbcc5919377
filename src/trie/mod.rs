//! Read-only PATRICIA trie view
//!
//! The trie is owned by an external collaborator; this module only models
//! what the renderer needs to see of it:
//! - an arena of nodes keyed by uid, with tagged forward/backward links
//! - the `Vertex` cursor and preorder sequence driving edge emission
//! - the `Prefix` cursor driving symbol clustering

mod arena;
mod prefix;
mod vertex;

pub use arena::{Link, LinkClass, LinkTag, Node, NodeId, Trie, ROOT};
pub use prefix::Prefix;
pub use vertex::{Preorder, Vertex};
