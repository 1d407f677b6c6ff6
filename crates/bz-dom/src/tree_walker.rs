//! Tree traversal
//!
//! Pre-order walk over a subtree following first-child / next-sibling /
//! parent links, without recursion or an explicit stack.

use crate::{DomTree, Node, NodeId};

/// Pre-order iterator over the descendants of a node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a DomTree, root: NodeId) -> Self {
        let next = tree.get(root).map_or(NodeId::NONE, |n| n.first_child);
        Self { tree, root, next }
    }

    /// Only element nodes
    pub fn elements(self) -> impl Iterator<Item = NodeId> + 'a {
        self.filter(|(_, node)| node.is_element()).map(|(id, _)| id)
    }

    fn successor(&self, id: NodeId) -> NodeId {
        let Some(node) = self.tree.get(id) else {
            return NodeId::NONE;
        };
        if node.first_child.is_valid() {
            return node.first_child;
        }

        let mut current = id;
        while current != self.root {
            let Some(node) = self.tree.get(current) else {
                break;
            };
            if node.next_sibling.is_valid() {
                return node.next_sibling;
            }
            current = node.parent;
        }
        NodeId::NONE
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next;
        let node = self.tree.get(current)?;
        self.next = self.successor(current);
        Some((current, node))
    }
}

#[cfg(test)]
mod tests {
    use crate::DomTree;

    #[test]
    fn test_preorder() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("p");
        let c = tree.create_text("c");
        let d = tree.create_element("span");
        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(a, b).unwrap();
        tree.append_child(b, c).unwrap();
        tree.append_child(tree.root(), d).unwrap();

        let order: Vec<_> = tree.descendants(tree.root()).map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b, c, d]);

        let within_a: Vec<_> = tree.descendants(a).map(|(id, _)| id).collect();
        assert_eq!(within_a, vec![b, c]);

        let elements: Vec<_> = tree.descendants(tree.root()).elements().collect();
        assert_eq!(elements, vec![a, b, d]);
    }

    #[test]
    fn test_leaf_has_no_descendants() {
        let mut tree = DomTree::new();
        let a = tree.create_element("br");
        tree.append_child(tree.root(), a).unwrap();
        assert_eq!(tree.descendants(a).count(), 0);
        assert_eq!(DomTree::new().descendants(DomTree::new().root()).count(), 0);
    }
}
