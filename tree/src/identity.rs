use arbor_identity::Identifiable;
use uuid::Uuid;

use crate::{node::NodeRef, tree::Tree};

impl<T: Identifiable> Tree<T> {
    pub fn find_by_id(&self, id: Uuid) -> Option<NodeRef<'_, T>> {
        self.find_by(|value| value.id() == id)
    }

    /// First node, in insertion order, with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeRef<'_, T>> {
        self.find_by(|value| value.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use arbor_identity::Category;

    use super::*;
    use crate::NodeSpec;

    #[test]
    fn finds_categories_by_name_and_id() {
        let mut tree = Tree::new();
        let root = tree.append(NodeSpec::new(
            Category::new("root"),
            vec![NodeSpec::leaf(Category::new("a")), NodeSpec::leaf(Category::new("b"))],
        ));

        let b = tree.find_by_name("b").unwrap();
        assert_eq!(b.parent().map(|parent| parent.id()), Some(root));
        assert_eq!(tree.find_by_id(b.value().id()), Some(b));
        assert!(tree.find_by_name("missing").is_none());
        assert!(tree.find_by_id(Uuid::nil()).is_none());
    }
}
