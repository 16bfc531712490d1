use std::fmt;

use crate::tree::{NodeId, Tree};

impl<T> Tree<T> {
    /// A human readable rendering of the subtree rooted at `node`. Each node prints its value
    /// followed by its children on indented lines:
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = [10, 5, 20].into_iter().collect();
    ///
    /// assert_eq!(
    ///     tree.render(tree.root()).to_string(),
    ///     "value: 10\n\t left: [value: 5]\n\t right: [value: 20]",
    /// );
    /// ```
    ///
    /// This is for diagnostics only and the format may change.
    pub fn render(&self, node: Option<NodeId>) -> Render<'_, T> {
        Render { tree: self, node }
    }
}

/// [`Display`][fmt::Display] adapter returned by [`Tree::render`]. Missing or stale nodes render
/// as `empty`.
pub struct Render<'a, T> {
    tree: &'a Tree<T>,
    node: Option<NodeId>,
}

impl<T> fmt::Display for Render<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.filter(|id| self.tree.node(*id).is_some()) {
            Some(id) => write_node(f, self.tree, id),
            None => f.write_str("empty"),
        }
    }
}

// TODO stack based rendering
fn write_node<T>(f: &mut fmt::Formatter<'_>, tree: &Tree<T>, id: NodeId) -> fmt::Result
where
    T: fmt::Display,
{
    let node = tree.live(id);
    write!(f, "value: {}", node.value)?;
    if let Some(left) = node.left {
        f.write_str("\n\t left: [")?;
        write_node(f, tree, left)?;
        f.write_str("]")?;
    }
    if let Some(right) = node.right {
        f.write_str("\n\t right: [")?;
        write_node(f, tree, right)?;
        f.write_str("]")?;
    }
    Ok(())
}
