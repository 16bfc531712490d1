use parent_bst::{NodeId, Tree, TreeError};

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a multiset of counts.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same values, as many times, in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, counts: &mut HashMap<T, usize>)
where
    T: std::hash::Hash + Eq + Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                bst.insert(x.clone());
                *counts.entry(x.clone()).or_default() += 1;
            }
            Op::Remove(x) => {
                let deleted = bst.delete(x);
                match counts.get_mut(x) {
                    Some(count) => {
                        assert!(deleted.as_ref() == Some(x));
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(x);
                        }
                    }
                    None => assert!(deleted.is_none()),
                }
            }
        }
    }
}

/// Every reachable node is a child of its claimed parent and the root has no parent.
fn links_consistent<T>(tree: &Tree<T>) -> bool {
    let Some(root) = tree.root() else {
        return tree.is_empty();
    };

    let mut stack: Vec<NodeId> = vec![root];
    let mut seen = 0;
    while let Some(id) = stack.pop() {
        seen += 1;
        for child in [tree.left(id), tree.right(id)].into_iter().flatten() {
            if tree.parent(child) != Some(id) {
                return false;
            }
            stack.push(child);
        }
    }
    tree.parent(root).is_none() && seen == tree.len()
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut counts = HashMap::new();

        do_ops(&ops, &mut tree, &mut counts);

        let sorted: Vec<_> = tree.iter().collect();
        sorted.windows(2).all(|w| w[0] <= w[1])
            && links_consistent(&tree)
            && tree.len() == counts.values().sum::<usize>()
            && counts.keys().all(|x| tree.contains(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            // Delete every copy.
            while tree.delete(delete).is_some() {}
        }

        let mut still_present = xs;
        still_present.retain(|x| !deletes.contains(x));

        links_consistent(&tree)
            && deletes.iter().all(|x| tree.find(x).is_none())
            && still_present.iter().all(|x| tree.find(x).is_some())
    }

    fn inorder_is_sorted_input(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let mut sorted = xs;
        sorted.sort();

        let mut visited = Vec::new();
        tree.traverse_inorder(tree.root(), |x| visited.push(*x));
        visited == sorted
    }

    fn insert_from_child_is_rejected(xs: Vec<u8>, x: u8) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let len = tree.len();
        let Some(root) = tree.root() else {
            return true;
        };

        let children: Vec<_> = [tree.left(root), tree.right(root)].into_iter().flatten().collect();
        children
            .into_iter()
            .all(|child| tree.insert_at(child, x) == Err(TreeError::InvalidOperation))
            && tree.len() == len
    }
}
