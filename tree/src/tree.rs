use std::fmt::Display;

use thiserror::Error;
use tracing::{debug, trace};

use crate::node::{Ancestors, NodeRef};

/// Index of a node within the [`Tree`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} does not exist in this tree")]
    NodeNotFound(NodeId),

    #[error("node {0} has been taken out of the tree")]
    NodeRemoved(NodeId),

    #[error("adding node {child} as a child of node {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// An arena of nodes linked into one or more rooted trees.
///
/// The arena owns every node. A child refers to its parent by [`NodeId`],
/// so parent links never own anything. Slots emptied by
/// [`Tree::take_subtree`] are not reused.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    pub(crate) nodes: Vec<Option<Node<T>>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert a value as a new root with no children.
    pub fn insert(&mut self, value: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            value,
            parent: None,
            children: Vec::new(),
        }));
        trace!(node = %id, "inserted node");
        id
    }

    /// Number of nodes still held by the tree.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    pub(crate) fn get(&self, id: NodeId) -> Result<&Node<T>, TreeError> {
        let slot = self
            .nodes
            .get(id.0)
            .ok_or(TreeError::NodeNotFound(id))?;
        slot.as_ref().ok_or(TreeError::NodeRemoved(id))
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node<T>, TreeError> {
        self.slot_mut(id)?
            .as_mut()
            .ok_or(TreeError::NodeRemoved(id))
    }

    /// Empty the slot of `id` and hand back its node. Links to and from
    /// the node are left for the caller to clean up.
    pub(crate) fn take(&mut self, id: NodeId) -> Result<Node<T>, TreeError> {
        self.slot_mut(id)?
            .take()
            .ok_or(TreeError::NodeRemoved(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Option<Node<T>>, TreeError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(TreeError::NodeNotFound(id))
    }

    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_, T>, TreeError> {
        let node = self.get(id)?;
        Ok(NodeRef::new(self, id, node))
    }

    pub fn value(&self, id: NodeId) -> Result<&T, TreeError> {
        Ok(&self.get(id)?.value)
    }

    /// Children of `id` in the order they were added.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], TreeError> {
        Ok(&self.get(id)?.children)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.get(id)?.parent)
    }

    /// Every node in insertion order, whatever tree it belongs to.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_, T>> {
        self.nodes.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|node| NodeRef::new(self, NodeId(index), node))
        })
    }

    /// Nodes without a parent, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_, T>> {
        self.iter().filter(|node| node.is_root())
    }

    /// Ancestors of `id`, nearest first. The node itself is not included.
    pub fn ancestors(&self, id: NodeId) -> Result<Ancestors<'_, T>, TreeError> {
        Ok(self.node(id)?.ancestors())
    }

    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> Result<bool, TreeError> {
        self.get(ancestor)?;
        Ok(self.ancestors(id)?.any(|node| node.id() == ancestor))
    }

    /// Number of links between `id` and its root.
    pub fn depth(&self, id: NodeId) -> Result<usize, TreeError> {
        Ok(self.ancestors(id)?.count())
    }

    /// Unlink `id` from its parent, making it a root. Returns the previous
    /// parent, if any.
    pub fn detach(&mut self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        let Some(parent) = self.get_mut(id)?.parent.take() else {
            return Ok(None);
        };
        self.get_mut(parent)?.children.retain(|child| *child != id);
        Ok(Some(parent))
    }

    /// Append `child` to the children of `parent`.
    ///
    /// A child that already has a parent is moved, not duplicated. Adding a
    /// child to the parent it already has moves it to the end of the
    /// sibling list. Fails without touching the tree if `child` is `parent`
    /// or one of its ancestors.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.get(child)?;
        if child == parent || self.is_ancestor(child, parent)? {
            return Err(TreeError::CycleDetected { parent, child });
        }

        if let Some(previous) = self.detach(child)? {
            if previous != parent {
                debug!(node = %child, from = %previous, to = %parent, "re-parented node");
            }
        }

        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        trace!(node = %child, parent = %parent, "attached node");
        Ok(())
    }

    /// First node, in insertion order, whose value matches `f`.
    pub fn find_by<F>(&self, mut f: F) -> Option<NodeRef<'_, T>>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|node| f(node.value()))
    }
}
