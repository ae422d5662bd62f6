use std::fmt::{Debug, Formatter};

use crate::{
    traverse::{BreadthFirst, DepthFirst},
    tree::{Node, NodeId, Tree},
};

/// A borrowed view of one node and the tree it lives in.
pub struct NodeRef<'r, T> {
    tree: &'r Tree<T>,
    id: NodeId,
    node: &'r Node<T>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: Debug> Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", &self.node.value)
            .finish()
    }
}

impl<'r, T> NodeRef<'r, T> {
    pub(crate) fn new(tree: &'r Tree<T>, id: NodeId, node: &'r Node<T>) -> Self {
        Self { tree, id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'r Tree<T> {
        self.tree
    }

    #[inline]
    pub fn value(&self) -> &'r T {
        &self.node.value
    }

    pub fn parent(&self) -> Option<Self> {
        self.node
            .parent
            .and_then(|parent| self.tree.node(parent).ok())
    }

    pub fn children(&self) -> Children<'r, T> {
        Children {
            tree: self.tree,
            ids: self.node.children.iter(),
        }
    }

    pub fn child_ids(&self) -> &'r [NodeId] {
        &self.node.children
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.children.is_empty()
    }

    pub fn ancestors(&self) -> Ancestors<'r, T> {
        Ancestors {
            tree: self.tree,
            next: self.node.parent,
        }
    }

    /// Breadth-first over this node's subtree, starting with this node.
    pub fn traverse(&self) -> BreadthFirst<'r, T> {
        BreadthFirst::new(self.tree, self.id)
    }

    /// Pre-order depth-first over this node's subtree.
    pub fn depth_first(&self) -> DepthFirst<'r, T> {
        DepthFirst::new(self.tree, self.id)
    }

    /// Combine the subtree bottom-up. `f` gets each node together with the
    /// results for its children, in child order, and children are always
    /// folded before their parent. Uses a heap-allocated work list, so the
    /// depth of the tree is not limited by the call stack.
    pub fn fold<B, F>(&self, mut f: F) -> B
    where
        F: FnMut(NodeRef<'r, T>, Vec<B>) -> B,
    {
        // Reversed pre-order reaches every child before its parent, with
        // the last child's result on top of `done`.
        let order: Vec<_> = self.depth_first().collect();
        let mut done: Vec<B> = Vec::with_capacity(order.len());
        for node in order.into_iter().skip(1).rev() {
            let children = pop_children(&mut done, node);
            done.push(f(node, children));
        }
        let children = pop_children(&mut done, *self);
        f(*self, children)
    }
}

fn pop_children<B, T>(done: &mut Vec<B>, node: NodeRef<'_, T>) -> Vec<B> {
    let start = done.len().saturating_sub(node.child_ids().len());
    let mut children = done.split_off(start);
    children.reverse();
    children
}

/// Children of a node, in insertion order.
pub struct Children<'r, T> {
    tree: &'r Tree<T>,
    ids: std::slice::Iter<'r, NodeId>,
}

impl<'r, T> Iterator for Children<'r, T> {
    type Item = NodeRef<'r, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.ids.find_map(|id| tree.node(*id).ok())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}

/// Walks parent links up to the root.
pub struct Ancestors<'r, T> {
    tree: &'r Tree<T>,
    next: Option<NodeId>,
}

impl<'r, T> Iterator for Ancestors<'r, T> {
    type Item = NodeRef<'r, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.next?).ok()?;
        self.next = node.node.parent;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::tests::{chain, sample};

    #[test]
    fn navigates_parent_and_children() {
        let (tree, [root, a, b, a1]) = sample();
        let a1 = tree.node(a1).unwrap();
        let parent = a1.parent().unwrap();
        assert_eq!(parent.id(), a);
        assert_eq!(*parent.value(), "a");
        assert!(a1.is_leaf());

        let root = tree.node(root).unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
        let children: Vec<_> = root.children().map(|child| *child.value()).collect();
        assert_eq!(children, vec!["a", "b"]);
        assert_eq!(root.child_ids(), &[a, b]);
    }

    #[test]
    fn refs_compare_by_tree_and_id() {
        let (tree, [root, a, ..]) = sample();
        let (other, _) = sample();
        assert_eq!(tree.node(root).unwrap(), tree.node(root).unwrap());
        assert_ne!(tree.node(root).unwrap(), tree.node(a).unwrap());
        assert_ne!(tree.node(root).unwrap(), other.node(root).unwrap());
    }

    #[test]
    fn fold_sees_children_in_order() {
        let (tree, [root, ..]) = sample();
        let rendered = tree.node(root).unwrap().fold(|node, children: Vec<String>| {
            if children.is_empty() {
                node.value().to_string()
            } else {
                format!("{}({})", node.value(), children.join(" "))
            }
        });
        assert_eq!(rendered, "root(a(a1) b)");
    }

    #[test]
    fn fold_handles_deep_chains() {
        let (tree, top) = chain(150_000);
        let height = tree
            .node(top)
            .unwrap()
            .fold(|_, children: Vec<usize>| children.into_iter().max().map_or(0, |h| h + 1));
        assert_eq!(height, 149_999);
    }
}
