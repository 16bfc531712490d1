//! This crate exposes a mutable Binary Search Tree (BST) whose nodes keep a link to their parent,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of this BST are:
//!
//! 1. For every `Node` in the BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in the BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value. Duplicates are allowed and go right.
//! 3. Every `Node` other than the root knows its parent, and it is the child of that parent
//!    on the side it claims.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). This tree does no rebalancing, so inserting
//! values in sorted order degrades it into a list with `O(N)` height. Inorder traversal visits
//! the left subtree, then the subtree root, then the right subtree, yielding sorted values.
//!
//! Parent links make it possible to start work from any node: searching a subtree, finding the
//! depth of a node, or deleting it in place. When a node with two children is deleted, its
//! in-order successor (the smallest value of its right subtree) takes its place.
//!
//! See [`Tree`] for the API.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod render;
mod traverse;
mod tree;
mod util;

pub use error::TreeError;
pub use render::Render;
pub use traverse::Iter;
pub use tree::{NodeId, Tree};
