use std::{
    fmt::{Debug, Formatter},
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    tree::{Node, NodeId, Tree, TreeError},
    unroll::unroll,
};

/// An owned, nested tree living outside any arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct NodeSpec<T> {
    pub value: T,
    #[serde(default, skip_serializing_if = "Subtrees::is_empty")]
    pub children: Subtrees<T>,
}

/// The children of a [`NodeSpec`].
///
/// Dropping flattens the nested specs onto a work list first, so a deep
/// spec is released without recursing once per level.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subtrees<T>(Vec<NodeSpec<T>>);

impl<T> Subtrees<T> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(mut self) -> Vec<NodeSpec<T>> {
        std::mem::take(&mut self.0)
    }
}

impl<T> Default for Subtrees<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<NodeSpec<T>>> for Subtrees<T> {
    fn from(specs: Vec<NodeSpec<T>>) -> Self {
        Self(specs)
    }
}

impl<T> Deref for Subtrees<T> {
    type Target = Vec<NodeSpec<T>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Subtrees<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Debug> Debug for Subtrees<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T> Drop for Subtrees<T> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.0);
        while let Some(mut spec) = pending.pop() {
            pending.append(&mut spec.children.0);
        }
    }
}

impl<T> NodeSpec<T> {
    pub fn new(value: T, children: Vec<NodeSpec<T>>) -> Self {
        Self {
            value,
            children: children.into(),
        }
    }

    pub fn leaf(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Values in breadth-first order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a T> {
        unroll([self], |spec| {
            let spec: &'a NodeSpec<T> = *spec;
            spec.children.iter()
        })
        .map(|spec| &spec.value)
    }
}

impl<T> Tree<T> {
    /// Insert a nested tree as a new root subtree and return the root id.
    /// Nodes are inserted in pre-order.
    pub fn append(&mut self, spec: NodeSpec<T>) -> NodeId {
        let NodeSpec { value, children } = spec;
        let root = self.insert(value);

        let mut pending: Vec<(NodeId, NodeSpec<T>)> = children
            .into_vec()
            .into_iter()
            .rev()
            .map(|child| (root, child))
            .collect();
        while let Some((parent, NodeSpec { value, children })) = pending.pop() {
            let id = self.insert(value);
            if let Ok(node) = self.get_mut(id) {
                node.parent = Some(parent);
            }
            if let Ok(node) = self.get_mut(parent) {
                node.children.push(id);
            }
            pending.extend(children.into_vec().into_iter().rev().map(|child| (id, child)));
        }
        root
    }

    /// Detach `id` from its parent and move its whole subtree out of the
    /// arena. Ids from the taken subtree report [`TreeError::NodeRemoved`]
    /// afterwards.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn take_subtree(&mut self, id: NodeId) -> Result<NodeSpec<T>, TreeError> {
        let order: Vec<NodeId> = self.depth_first(id)?.map(|node| node.id()).collect();

        if let Some(parent) = self.detach(id)? {
            debug!(node = %id, parent = %parent, "detached subtree");
        }

        // Reversed pre-order: children are built before their parent, with
        // the last child on top of `done`.
        let mut done: Vec<NodeSpec<T>> = Vec::with_capacity(order.len());
        for node_id in order.into_iter().rev() {
            let Node {
                value, children, ..
            } = self.take(node_id)?;
            let start = done.len().saturating_sub(children.len());
            let mut children = done.split_off(start);
            children.reverse();
            done.push(NodeSpec::new(value, children));
        }
        done.pop().ok_or(TreeError::NodeRemoved(id))
    }
}

impl<T: Clone> Tree<T> {
    /// Nested copy of the subtree under `id`.
    pub fn to_spec(&self, id: NodeId) -> Result<NodeSpec<T>, TreeError> {
        Ok(self
            .node(id)?
            .fold(|node, children| NodeSpec::new(node.value().clone(), children)))
    }
}

impl<T> From<NodeSpec<T>> for Tree<T> {
    fn from(spec: NodeSpec<T>) -> Self {
        let mut tree = Tree::new();
        tree.append(spec);
        tree
    }
}
