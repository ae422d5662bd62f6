use std::collections::VecDeque;

use crate::{
    node::NodeRef,
    tree::{NodeId, Tree, TreeError},
};

impl<T> Tree<T> {
    /// Lazily visit `root` and every node below it in breadth-first order.
    ///
    /// The root is checked up front, so an unknown id fails here rather than
    /// producing an empty sequence.
    pub fn traverse(&self, root: NodeId) -> Result<BreadthFirst<'_, T>, TreeError> {
        Ok(self.node(root)?.traverse())
    }

    /// Lazily visit `root` and every node below it in pre-order.
    pub fn depth_first(&self, root: NodeId) -> Result<DepthFirst<'_, T>, TreeError> {
        Ok(self.node(root)?.depth_first())
    }

    /// Call `action` with every value in the subtree under `root`, parents
    /// before children.
    pub fn for_each_value<F>(&self, root: NodeId, mut action: F) -> Result<(), TreeError>
    where
        F: FnMut(&T),
    {
        for node in self.depth_first(root)? {
            action(node.value());
        }
        Ok(())
    }
}

/// Level-order iterator over a subtree.
///
/// Children are read when their parent is dequeued, so each pull does only
/// the work for one node.
pub struct BreadthFirst<'r, T> {
    tree: &'r Tree<T>,
    queue: VecDeque<NodeId>,
}

impl<'r, T> BreadthFirst<'r, T> {
    pub(crate) fn new(tree: &'r Tree<T>, root: NodeId) -> Self {
        Self {
            tree,
            queue: VecDeque::from([root]),
        }
    }
}

impl<'r, T> Iterator for BreadthFirst<'r, T> {
    type Item = NodeRef<'r, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.queue.pop_front() {
            let Ok(node) = self.tree.node(id) else {
                continue;
            };
            self.queue.extend(node.child_ids());
            return Some(node);
        }
        None
    }
}

/// Pre-order iterator over a subtree.
pub struct DepthFirst<'r, T> {
    tree: &'r Tree<T>,
    stack: Vec<NodeId>,
}

impl<'r, T> DepthFirst<'r, T> {
    pub(crate) fn new(tree: &'r Tree<T>, root: NodeId) -> Self {
        Self {
            tree,
            stack: vec![root],
        }
    }
}

impl<'r, T> Iterator for DepthFirst<'r, T> {
    type Item = NodeRef<'r, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Ok(node) = self.tree.node(id) else {
                continue;
            };
            self.stack.extend(node.child_ids().iter().rev());
            return Some(node);
        }
        None
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    /// Node `i` (for `i > 0`) hangs under one of the nodes before it.
    fn random_tree(parents: &[prop::sample::Index]) -> (Tree<usize>, Vec<NodeId>) {
        let mut tree = Tree::new();
        let mut ids = vec![tree.insert(0)];
        for (value, parent) in parents.iter().enumerate() {
            let parent = *parent.get(&ids);
            let id = tree.insert(value + 1);
            tree.add_child(parent, id).unwrap();
            ids.push(id);
        }
        (tree, ids)
    }

    proptest! {
        #[test]
        fn breadth_first_visits_each_node_once_by_level(
            parents in prop::collection::vec(any::<prop::sample::Index>(), 0..64),
        ) {
            let (tree, ids) = random_tree(&parents);
            let visited: Vec<_> = tree.traverse(ids[0]).unwrap().collect();

            prop_assert_eq!(visited.len(), ids.len());
            let unique: HashSet<_> = visited.iter().map(|node| node.id()).collect();
            prop_assert_eq!(unique.len(), ids.len());

            let depths: Vec<_> = visited
                .iter()
                .map(|node| tree.depth(node.id()).unwrap())
                .collect();
            prop_assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));

            let mut seen = HashSet::new();
            for node in &visited {
                if let Some(parent) = node.parent() {
                    prop_assert!(seen.contains(&parent.id()));
                }
                seen.insert(node.id());
            }
        }

        #[test]
        fn depth_first_matches_breadth_first_as_a_set(
            parents in prop::collection::vec(any::<prop::sample::Index>(), 0..64),
        ) {
            let (tree, ids) = random_tree(&parents);
            let mut breadth: Vec<_> = tree
                .traverse(ids[0])
                .unwrap()
                .map(|node| node.id())
                .collect();
            let mut depth: Vec<_> = tree
                .depth_first(ids[0])
                .unwrap()
                .map(|node| node.id())
                .collect();
            prop_assert_eq!(depth[0], ids[0]);
            breadth.sort();
            depth.sort();
            prop_assert_eq!(breadth, depth);
        }
    }
}
