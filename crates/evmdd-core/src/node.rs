//! Public handles into a [`Manager`](crate::Manager)'s unique table.
//!
//! `Edge` and `Node` are cheap, `Copy` ids. They carry no reference to the
//! manager that produced them — handles derived from a manager must not be
//! mixed with handles from a different manager, but enforcing that
//! statically is not required here, so all operations on them are methods
//! on [`Manager`](crate::Manager).

use crate::table::{EdgeId, NodeId};

/// A dangling incoming edge: weight plus successor. An EVMDD *is* its top
/// edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge(pub(crate) EdgeId);

/// A branch node (never the sink — the sink has no identity a caller needs
/// to hold onto, since no variable is associated with it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Node(pub(crate) NodeId);

/// What an edge's successor is: the sink, or a branch node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Sink,
    Branch(Node),
}

impl NodeRef {
    #[inline]
    pub fn is_sink(self) -> bool {
        matches!(self, NodeRef::Sink)
    }

    #[inline]
    pub fn branch(self) -> Option<Node> {
        match self {
            NodeRef::Branch(n) => Some(n),
            NodeRef::Sink => None,
        }
    }
}
