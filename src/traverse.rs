//! Depth-first walks over a [`Tree`]. All of them use an explicit stack so degenerate (list-like)
//! trees don't overflow the call stack.

use std::iter::FusedIterator;

use crate::tree::{NodeId, Tree};

impl<T> Tree<T> {
    /// Visits the subtree rooted at `from` as left subtree, node, right subtree. For a BST this
    /// yields the values in ascending order. Does nothing if `from` is `None` or stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = [10, 20, 5, 21, 8, 16, 4].into_iter().collect();
    ///
    /// let mut values = Vec::new();
    /// tree.traverse_inorder(tree.root(), |v| values.push(*v));
    /// assert_eq!(values, [4, 5, 8, 10, 16, 20, 21]);
    /// ```
    pub fn traverse_inorder(&self, from: Option<NodeId>, mut visit: impl FnMut(&T)) {
        Iter::new(self, from).for_each(|value| visit(value));
    }

    /// Visits the subtree rooted at `from` as node, left subtree, right subtree.
    pub fn traverse_preorder(&self, from: Option<NodeId>, mut visit: impl FnMut(&T)) {
        let mut stack: Vec<_> = from.filter(|id| self.node(*id).is_some()).into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.live(id);
            visit(&node.value);
            // Right first so the left subtree is popped first.
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /// Visits the subtree rooted at `from` as left subtree, right subtree, node.
    pub fn traverse_postorder(&self, from: Option<NodeId>, mut visit: impl FnMut(&T)) {
        let mut stack: Vec<_> = from.filter(|id| self.node(*id).is_some()).into_iter().collect();
        // Node, right, left order, reversed on the way out.
        let mut reversed = Vec::new();
        while let Some(id) = stack.pop() {
            let node = self.live(id);
            reversed.push(id);
            stack.extend(node.left);
            stack.extend(node.right);
        }

        for id in reversed.into_iter().rev() {
            visit(&self.live(id).value);
        }
    }

    /// An iterator over the values of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.root())
    }
}

/// Inorder iterator returned by [`Tree::iter`].
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    /// Nodes whose left subtree has been queued but which haven't been yielded yet.
    stack: Vec<NodeId>,
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a Tree<T>, from: Option<NodeId>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(from.filter(|id| tree.node(*id).is_some()));
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.live(id).left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.live(id);
        self.push_left_spine(node.right);
        Some(&node.value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
