use std::fmt::Display;

use arbor_tree::NodeRef;
use serde::{Deserialize, Serialize};
use termtree::Tree as DisplayTree;

/// A labelled tree ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewTree {
    Branch { label: String, nodes: Vec<ViewTree> },
    Leaf { label: String },
}

impl ViewTree {
    pub fn label(&self) -> &str {
        match self {
            ViewTree::Branch { label, .. } | ViewTree::Leaf { label } => label,
        }
    }
}

impl Display for ViewTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DisplayTree::<String>::from(self.clone()).fmt(f)
    }
}

impl Drop for ViewTree {
    fn drop(&mut self) {
        let ViewTree::Branch { nodes, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(nodes);
        while let Some(mut view) = pending.pop() {
            if let ViewTree::Branch { nodes, .. } = &mut view {
                pending.append(nodes);
            }
        }
    }
}

impl From<ViewTree> for DisplayTree<String> {
    fn from(mut value: ViewTree) -> Self {
        match &mut value {
            ViewTree::Branch { label, nodes } => {
                DisplayTree::new(std::mem::take(label)).with_leaves(std::mem::take(nodes))
            }
            ViewTree::Leaf { label } => DisplayTree::new(std::mem::take(label)),
        }
    }
}

/// Render the subtree under `node`, labelling each node with its value.
pub fn view_tree<T: Display>(node: NodeRef<'_, T>) -> ViewTree {
    view_tree_with(node, &|value: &T| value.to_string())
}

pub fn view_tree_with<T, F>(node: NodeRef<'_, T>, label: &F) -> ViewTree
where
    F: Fn(&T) -> String,
{
    node.fold(|node, nodes| {
        let text = label(node.value());
        if nodes.is_empty() {
            ViewTree::Leaf { label: text }
        } else {
            ViewTree::Branch { label: text, nodes }
        }
    })
}

#[cfg(test)]
mod tests {
    use arbor_tree::{NodeSpec, Tree};

    use super::*;

    fn count(view: &ViewTree) -> usize {
        let mut pending = vec![view];
        let mut total = 0;
        while let Some(view) = pending.pop() {
            total += 1;
            if let ViewTree::Branch { nodes, .. } = view {
                pending.extend(nodes);
            }
        }
        total
    }

    fn sample() -> Tree<&'static str> {
        Tree::from(NodeSpec::new(
            "root",
            vec![
                NodeSpec::new("a", vec![NodeSpec::leaf("a1")]),
                NodeSpec::leaf("b"),
            ],
        ))
    }

    #[test]
    fn mirrors_tree_shape() {
        let tree = sample();
        let root = tree.roots().next().unwrap();
        assert_eq!(
            view_tree(root),
            ViewTree::Branch {
                label: "root".into(),
                nodes: vec![
                    ViewTree::Branch {
                        label: "a".into(),
                        nodes: vec![ViewTree::Leaf { label: "a1".into() }],
                    },
                    ViewTree::Leaf { label: "b".into() },
                ],
            }
        );
    }

    #[test]
    fn custom_labels() {
        let tree = sample();
        let root = tree.roots().next().unwrap();
        let view = view_tree_with(root, &|value: &&str| value.to_uppercase());
        assert_eq!(view.label(), "ROOT");
    }

    #[test]
    fn displays_every_label_on_its_own_line() {
        let tree = sample();
        let rendered = view_tree(tree.roots().next().unwrap()).to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "root");
        assert!(lines[1].ends_with("a"));
        assert!(lines[2].ends_with("a1"));
        assert!(lines[3].ends_with("b"));
    }

    #[test]
    fn deep_chain_builds_and_drops() {
        const DEEP: usize = 150_000;
        let mut tree = Tree::new();
        let mut top = tree.insert(0);
        for value in 1..DEEP {
            let next = tree.insert(value);
            tree.add_child(next, top).unwrap();
            top = next;
        }

        let view = view_tree(tree.node(top).unwrap());
        assert_eq!(view.label(), (DEEP - 1).to_string());
        assert_eq!(count(&view), DEEP);
    }
}
