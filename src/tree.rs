//! A mutable, parent-linked BST. Nodes are stored in an arena owned by the [`Tree`] and are
//! addressed through [`NodeId`] handles, so any node can be used as a starting point for searches,
//! traversals or deletion while the tree keeps sole ownership of every value.
//!
//! # Examples
//!
//! ```
//! use parent_bst::{Tree, TreeError};
//!
//! let mut tree = Tree::with_root(10);
//! let root = tree.root().unwrap();
//!
//! for value in [20, 5, 21, 8, 16, 4] {
//!     tree.insert_at(root, value).unwrap();
//! }
//!
//! // Handles point into the live tree.
//! let five = tree.search(root, &5).unwrap();
//! assert_eq!(tree.get(five), Some(&5));
//! assert_eq!(tree.parent(five), Some(root));
//! assert_eq!(tree.search(root, &99), None);
//!
//! // Only the root can insert.
//! assert_eq!(tree.insert_at(five, 6), Err(TreeError::InvalidOperation));
//!
//! // Deleting a node with two children promotes its in-order successor.
//! assert_eq!(tree.delete(&20), Some(20));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [4, 5, 8, 10, 16, 21]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::error::TreeError;
use crate::util::Side;

/// A handle to a node of a [`Tree`]. Handles stay valid until their node is deleted; after that
/// every lookup through them returns `None` (or [`TreeError::StaleNode`]) even if the underlying
/// slot has been reused. Slots carry a 64-bit generation, so a stale handle could only match again
/// after a single slot is reused 2^64 times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// Navigation only. The arena owns every node.
    pub(crate) parent: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }

    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

#[derive(Clone)]
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

/// An unbalanced Binary Search Tree whose nodes know their parents. Values that compare equal to
/// an existing value are placed in its right subtree, so duplicates are kept.
#[derive(Clone)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
    /// Indices of empty slots, reused before the arena grows.
    free: Vec<usize>,
    root: Option<NodeId>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Generates a tree holding a single root node with no children.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree = Tree::with_root("Hello");
    /// let root = tree.root().unwrap();
    ///
    /// assert_eq!(tree.get(root), Some(&"Hello"));
    /// assert_eq!(tree.height(root), Some(0));
    /// assert_eq!(tree.depth(root), Some(0));
    /// ```
    pub fn with_root(value: T) -> Self {
        let mut tree = Self::new();
        let root = tree.alloc(Node::new(value));
        tree.root = Some(root);
        tree
    }

    /// The current root, if the tree is non-empty. Deleting the root replaces it.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The value stored at `node`, or `None` if the handle is stale.
    pub fn get(&self, node: NodeId) -> Option<&T> {
        self.node(node).map(|n| &n.value)
    }

    /// The parent of `node`. `None` for the root and for stale handles.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// The left child of `node`.
    pub fn left(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.left)
    }

    /// The right child of `node`.
    pub fn right(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.right)
    }

    /// Height of the subtree rooted at `node`. A node without children has height 0.
    ///
    /// Returns `None` if the handle is stale.
    pub fn height(&self, node: NodeId) -> Option<usize> {
        self.node(node)?;

        let mut height = 0;
        let mut stack = vec![(node, 0)];
        while let Some((id, level)) = stack.pop() {
            height = height.max(level);
            let n = self.live(id);
            stack.extend(n.left.map(|left| (left, level + 1)));
            stack.extend(n.right.map(|right| (right, level + 1)));
        }

        Some(height)
    }

    /// Number of ancestors of `node`. The root has depth 0.
    ///
    /// Returns `None` if the handle is stale.
    pub fn depth(&self, node: NodeId) -> Option<usize> {
        let mut current = self.node(node)?;
        let mut depth = 0;
        while let Some(parent) = current.parent {
            depth += 1;
            current = self.live(parent);
        }
        Some(depth)
    }

    /// The node holding the smallest value of the subtree rooted at `node`.
    pub fn minimum(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?;
        Some(self.extreme_below(node, Side::Left))
    }

    /// The node holding the largest value of the subtree rooted at `node`.
    pub fn maximum(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?;
        Some(self.extreme_below(node, Side::Right))
    }

    /// The node visited right after `node` in an inorder traversal of the whole tree.
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        let n = self.node(node)?;
        if let Some(right) = n.right {
            return Some(self.extreme_below(right, Side::Left));
        }

        let mut current = node;
        while let Some(parent) = self.live(current).parent {
            if self.live(parent).left == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Removes `node` from the tree and returns its value. A node with two children is replaced by
    /// its in-order successor (the smallest node of its right subtree). A node with one child is
    /// replaced by that child. Deleting the last node leaves the tree empty.
    ///
    /// Handles to other nodes remain valid. The handle to `node` becomes stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{Tree, TreeError};
    ///
    /// let mut tree = Tree::with_root(2);
    /// let root = tree.root().unwrap();
    /// let three = tree.insert_at(root, 3).unwrap();
    /// tree.insert_at(root, 1).unwrap();
    ///
    /// assert_eq!(tree.delete_node(root), Ok(2));
    /// assert_eq!(tree.root(), Some(three));
    /// assert_eq!(tree.delete_node(root), Err(TreeError::StaleNode));
    /// ```
    pub fn delete_node(&mut self, node: NodeId) -> Result<T, TreeError> {
        self.node(node).ok_or(TreeError::StaleNode)?;
        self.unlink(node);
        Ok(self.release(node))
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Looks up a node reached through a link of the tree. Links only ever point at live nodes.
    pub(crate) fn live(&self, id: NodeId) -> &Node<T> {
        self.node(id).expect("Linked node must be live")
    }

    fn live_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .expect("Linked node must be live")
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Frees the slot of an unlinked node and hands back its value.
    fn release(&mut self, id: NodeId) -> T {
        let slot = &mut self.slots[id.index];
        let node = slot.node.take().expect("Releasing a live node");
        debug_assert!(node.parent.is_none() && node.left.is_none() && node.right.is_none());

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        node.value
    }

    /// Follows `side` links from `node` until there are none left.
    fn extreme_below(&self, node: NodeId, side: Side) -> NodeId {
        let mut current = node;
        while let Some(next) = self.live(current).child(side) {
            current = next;
        }
        current
    }

    fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        let parent = self.live_mut(parent);
        match side {
            Side::Left => parent.left = child,
            Side::Right => parent.right = child,
        }
    }

    /// Puts `new` in the slot `old` occupies under its parent (or at the root) and points `new`
    /// back at that parent. `old` keeps its own links.
    fn replace_in_parent(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.live(old).parent;
        match parent {
            Some(parent) => {
                let side = if self.live(parent).left == Some(old) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.set_child(parent, side, new);
            }
            None => {
                debug!("Replacing root {:?} with {:?}", old, new);
                self.root = new;
            }
        }

        if let Some(new) = new {
            self.live_mut(new).parent = parent;
        }
    }

    /// Detaches `node` from the tree, splicing its children (or its successor) into its place, and
    /// clears its links. The node itself stays allocated.
    fn unlink(&mut self, node: NodeId) {
        let (left, right) = {
            let n = self.live(node);
            (n.left, n.right)
        };

        match (left, right) {
            (None, None) => {
                trace!("Unlinking leaf {:?}", node);
                self.replace_in_parent(node, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("Unlinking {:?} with single child {:?}", node, child);
                self.replace_in_parent(node, Some(child));
            }
            (Some(left), Some(right)) => {
                let successor = self.extreme_below(right, Side::Left);
                debug!("Replacing {:?} with its successor {:?}", node, successor);

                // The successor has no left child so this is a leaf or right-child unlink. If it
                // was our right child, its right subtree moves up into our right slot.
                self.unlink(successor);
                let right = self.live(node).right;

                let s = self.live_mut(successor);
                s.left = Some(left);
                s.right = right;
                self.live_mut(left).parent = Some(successor);
                if let Some(right) = right {
                    self.live_mut(right).parent = Some(successor);
                }

                self.replace_in_parent(node, Some(successor));
            }
        }

        let n = self.live_mut(node);
        n.parent = None;
        n.left = None;
        n.right = None;
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Searches the subtree rooted at `from` for a node holding `value`. Equal values live to the
    /// right, so the first match on the way down is returned.
    ///
    /// Returns `None` if no such node exists or `from` is stale.
    pub fn search(&self, from: NodeId, value: &T) -> Option<NodeId> {
        self.node(from)?;

        let mut current = from;
        loop {
            let node = self.live(current);
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left?,
                Ordering::Equal => return Some(current),
                Ordering::Greater => node.right?,
            };
        }
    }

    /// Searches the whole tree for a node holding `value`.
    pub fn find(&self, value: &T) -> Option<NodeId> {
        self.root.and_then(|root| self.search(root, value))
    }

    /// Whether some node holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Inserts `value` below `node`, which must be the root. Smaller values go left, everything
    /// else goes right. No rebalancing is performed.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidOperation`] if `node` has a parent and [`TreeError::StaleNode`] if it
    /// has been deleted.
    pub fn insert_at(&mut self, node: NodeId, value: T) -> Result<NodeId, TreeError> {
        let n = self.node(node).ok_or(TreeError::StaleNode)?;
        if n.parent.is_some() {
            return Err(TreeError::InvalidOperation);
        }
        Ok(self.add_below(node, value))
    }

    /// Inserts `value` from the root, making it the root if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let first = tree.insert(1);
    /// let second = tree.insert(1);
    ///
    /// assert_eq!(tree.root(), Some(first));
    /// assert_eq!(tree.right(first), Some(second));
    /// ```
    pub fn insert(&mut self, value: T) -> NodeId {
        match self.root {
            Some(root) => self.add_below(root, value),
            None => {
                let id = self.alloc(Node::new(value));
                self.root = Some(id);
                id
            }
        }
    }

    /// Removes the first node found holding `value` and returns its value. Returns `None` if no
    /// node holds it.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [5, 3, 7].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&3), Some(3));
    /// assert_eq!(tree.delete(&3), None);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let root = self.root?;
        self.delete_from(root, value)
    }

    /// Removes the first node holding `value` in the subtree rooted at `from`. Values elsewhere in
    /// the tree are not considered. Returns `None` if the subtree has no such node or `from` is
    /// stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [10, 20, 5, 16].into_iter().collect();
    /// let twenty = tree.find(&20).unwrap();
    ///
    /// assert_eq!(tree.delete_from(twenty, &5), None);
    /// assert_eq!(tree.delete_from(twenty, &16), Some(16));
    /// ```
    pub fn delete_from(&mut self, from: NodeId, value: &T) -> Option<T> {
        let node = self.search(from, value)?;
        self.delete_node(node).ok()
    }

    fn add_below(&mut self, start: NodeId, value: T) -> NodeId {
        let mut current = start;
        let side = loop {
            let node = self.live(current);
            let side = if value < node.value {
                Side::Left
            } else {
                Side::Right
            };
            match node.child(side) {
                Some(child) => current = child,
                None => break side,
            }
        };

        let mut new_node = Node::new(value);
        new_node.parent = Some(current);
        let id = self.alloc(new_node);
        self.set_child(current, side, Some(id));
        trace!("Inserted {:?} as {:?} child of {:?}", id, side, current);

        if cfg!(debug_assertions) {
            let parent = self.live(current);
            if let Some(left) = parent.left {
                assert!(self.live(left).value < parent.value);
            }
            if let Some(right) = parent.right {
                assert!(self.live(right).value >= parent.value);
            }
        }

        id
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root.map(|root| DebugNode { tree: self, id: root }))
            .finish()
    }
}

struct DebugNode<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<T> fmt::Debug for DebugNode<'_, T>
where
    T: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.tree.live(self.id);
        let child = |id: Option<NodeId>| id.map(|id| DebugNode { tree: self.tree, id });
        f.debug_struct("Node")
            .field("value", &node.value)
            .field("left", &child(node.left))
            .field("right", &child(node.right))
            .finish()
    }
}
