//! bz DOM - content tree for authored course HTML
//!
//! Arena-allocated tree of elements and text. Attribute writes can be
//! recorded as mutation records so that identity bookkeeping can follow
//! edits as they happen.

mod attributes;
mod error;
mod mutation;
mod node;
mod tree;
mod tree_walker;

pub use attributes::{Attr, Attributes};
pub use error::{DomError, DomResult};
pub use mutation::{MutationRecord, MutationType};
pub use node::{ElementData, Node, NodeData};
pub use tree::DomTree;
pub use tree_walker::Descendants;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
