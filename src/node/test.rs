use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};
use std::cmp::{self, Ordering};
use std::ptr;
use crate::order::{AtOrAfter, Equal, Equivalent, Order};
use crate::Tree;
use super::{Node, Side};

/// An operation on a `Tree`.
#[derive(Clone, Debug)]
enum Op<T> {
    /// Insert a value into the tree.
    Insert(T),
    /// Remove the value at index `n % tree.len()` from the tree.
    Remove(usize),
    /// Remove a value that may or may not be in the tree.
    RemoveValue(T),
    /// Rebuild the tree.
    Rebalance,
}

impl<T> Arbitrary for Op<T> where T: Arbitrary {
    fn arbitrary(g: &mut Gen) -> Op<T> {
        match u8::arbitrary(g) % 10 {
            0 => Op::Rebalance,
            1..=3 => Op::Remove(usize::arbitrary(g)),
            4 => Op::RemoveValue(T::arbitrary(g)),
            _ => Op::Insert(T::arbitrary(g)),
        }
    }
}

impl<T> Op<T> where T: Clone {
    /// Perform the operation on the given tree.
    fn exec<O, E>(self, tree: &mut Tree<T, O, E>) where O: Order<T>, E: Equal<T> {
        match self {
            Op::Insert(value) => tree.insert(value),
            Op::Remove(index) => if !tree.is_empty() {
                let value = tree.iter().nth(index % tree.len()).cloned();
                if let Some(value) = value { assert!(tree.remove(&value).is_some()); }
            },
            Op::RemoveValue(value) => { tree.remove(&value); }
            Op::Rebalance => tree.rebalance(),
        }
    }
}

/// Checks every cached statistic, parent reference and routing decision below `node`, returning
/// the subtree's size and height.
fn check_node<T, O>(node: Option<&Node<T>>, parent: Option<&Node<T>>, side: Option<Side>, order: &O)
    -> (usize, usize) where O: Order<T> {

    let node = match node {
        None => return (0, 0),
        Some(node) => node,
    };

    let expected_parent = parent.map(|parent| parent as *const Node<T>);
    assert_eq!(node.parent.map(|parent| parent.node.as_ptr() as *const Node<T>), expected_parent);
    assert!(node.parent().map_or(parent.is_none(), |p| parent.map_or(false, |q| ptr::eq(p, q))));
    assert_eq!(node.side(), side);

    // Removal can leave a value equal to a node on either side of it, but never out of order.
    for value in node.left().into_iter().flat_map(Node::iter) {
        assert!(order.ordering(value, &node.value) != Ordering::Greater);
    }
    for value in node.right().into_iter().flat_map(Node::iter) {
        assert!(order.ordering(value, &node.value) != Ordering::Less);
    }

    let (left_size, left_height) = check_node(node.left(), Some(node), Some(Side::Left), order);
    let (right_size, right_height) = check_node(node.right(), Some(node), Some(Side::Right), order);

    assert_eq!(node.size, 1 + left_size + right_size);
    assert_eq!(node.height, 1 + cmp::max(left_height, right_height));
    (node.size, node.height)
}

fn assert_invariants<T, O, E>(tree: &Tree<T, O, E>) where O: Order<T>, E: Equal<T> {
    let (size, height) = check_node(tree.root(), None, None, tree.order());
    assert_eq!(tree.len(), size);
    assert_eq!(tree.tree_height(), height);
}

fn minimal_height(n: usize) -> usize { (usize::BITS - n.leading_zeros()) as usize }

fn values<T, O, E>(tree: &Tree<T, O, E>) -> Vec<T> where T: Clone, O: Order<T>, E: Equal<T> {
    tree.iter().cloned().collect()
}

#[test]
fn invariants_hold_after_every_op() {
    fn check(initial: Vec<u8>, ops: Vec<Op<u8>>) -> TestResult {
        let mut tree = Tree::from_values(initial);
        assert_invariants(&tree);

        for op in ops {
            op.exec(&mut tree);
            assert_invariants(&tree);
        }

        TestResult::passed()
    }

    quickcheck(check as fn(_, _) -> _);
}

#[test]
fn invariants_hold_with_right_biased_duplicates() {
    fn check(initial: Vec<u8>, ops: Vec<Op<u8>>) -> TestResult {
        let mut tree = Tree::from_values_with(initial, AtOrAfter::natural(), Equivalent::natural());
        assert_invariants(&tree);

        for op in ops {
            op.exec(&mut tree);
            assert_invariants(&tree);
        }

        TestResult::passed()
    }

    quickcheck(check as fn(_, _) -> _);
}

#[test]
fn build_has_minimal_height() {
    for n in 0..300 {
        let tree = Tree::from_values(0..n);
        assert_invariants(&tree);
        assert_eq!(tree.tree_height(), minimal_height(n));
        assert!(tree.is_balanced());
    }
}

#[test]
fn build_prefers_the_lower_middle() {
    let tree = Tree::from_values(vec![1, 2]);
    let root = tree.root().unwrap();
    assert_eq!(*root.value(), 1);
    assert!(root.left().is_none());
    assert_eq!(root.right().map(|node| *node.value()), Some(2));

    let tree = Tree::from_values(vec![4, 3, 2, 1]);
    let root = tree.root().unwrap();
    assert_eq!(*root.value(), 2);
    assert_eq!(root.left().map(|node| *node.value()), Some(1));
    assert_eq!(root.right().map(|node| *node.value()), Some(3));
    assert_eq!(root.right().and_then(Node::right).map(|node| *node.value()), Some(4));
}

#[test]
fn insert_updates_ancestors() {
    let mut tree = Tree::from_values(vec![25, 50, 75]);
    tree.insert(10);
    assert_invariants(&tree);

    let ten = tree.find(&10).unwrap();
    assert_eq!(ten.side(), Some(Side::Left));
    assert_eq!(ten.level(), 3);

    let twenty_five = ten.parent().unwrap();
    assert_eq!(*twenty_five.value(), 25);
    assert_eq!((twenty_five.size(), twenty_five.height()), (2, 2));

    let root = twenty_five.parent().unwrap();
    assert_eq!((root.size(), root.height()), (4, 3));
}

#[test]
fn remove_through_predecessor_when_left_is_at_least_as_tall() {
    let mut tree = Tree::from_values(vec![25, 50, 75]);
    tree.insert(10);

    assert_eq!(tree.remove(&50), Some(50));
    assert_invariants(&tree);

    let root = tree.root().unwrap();
    assert_eq!(*root.value(), 25);
    assert_eq!(root.left().map(|node| *node.value()), Some(10));
    assert_eq!(root.right().map(|node| *node.value()), Some(75));
    assert_eq!((root.size(), root.height()), (3, 2));
}

#[test]
fn remove_through_successor_when_right_is_taller() {
    let mut tree = Tree::from_values(vec![25, 50, 75]);
    tree.insert(80);
    tree.insert(90);

    assert_eq!(tree.remove(&50), Some(50));
    assert_invariants(&tree);

    let root = tree.root().unwrap();
    assert_eq!(*root.value(), 75);
    let right = root.right().unwrap();
    assert_eq!(*right.value(), 80);
    assert_eq!(right.right().map(|node| *node.value()), Some(90));
    assert_eq!(values(&tree), [25, 75, 80, 90]);
}

#[test]
fn remove_splices_a_single_child() {
    let mut tree = Tree::from_values(vec![50]);
    tree.extend(vec![30, 20, 10]);

    assert_eq!(tree.remove(&30), Some(30));
    assert_invariants(&tree);

    let twenty = tree.find(&20).unwrap();
    assert_eq!(twenty.parent().map(|node| *node.value()), Some(50));
    assert_eq!(twenty.side(), Some(Side::Left));
    assert_eq!(tree.tree_height(), 3);
}

#[test]
fn remove_leaf_shrinks_ancestors() {
    let mut tree = Tree::from_values(vec![50]);
    tree.extend(vec![40, 30]);
    assert_eq!(tree.tree_height(), 3);

    assert_eq!(tree.remove(&30), Some(30));
    assert_invariants(&tree);
    assert_eq!(tree.tree_height(), 2);
    assert!(tree.find(&40).unwrap().is_leaf());
}

#[test]
fn remove_with_duplicates_unlinks_one_node() {
    fn check(values: Vec<u8>) -> TestResult {
        if values.is_empty() { return TestResult::discard(); }

        let mut tree = Tree::from_values_with(values.clone(), AtOrAfter::natural(),
                                              Equivalent::natural());
        tree.extend(values.iter().cloned());

        let target = values[0];
        let before = tree.iter().filter(|&&v| v == target).count();
        assert_eq!(tree.remove(&target), Some(target));
        assert_invariants(&tree);

        let after = tree.iter().filter(|&&v| v == target).count();
        TestResult::from_bool(after + 1 == before && tree.len() == 2 * values.len() - 1)
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn level_walks_parents() {
    let mut tree = Tree::from_values(vec![0]);
    for i in 1..20 { tree.insert(i); }

    let deepest = tree.find(&19).unwrap();
    assert_eq!(deepest.level(), 20);
    assert_eq!(tree.depth(&19), Some(20));
    assert_eq!(tree.height(&0), Some(20));
}

#[test]
fn rebalance_restores_parents() {
    let mut tree = Tree::from_values(vec![0]);
    for i in 1..64 { tree.insert(i); }
    assert!(!tree.is_balanced());

    tree.rebalance();
    assert_invariants(&tree);
    assert_eq!(tree.tree_height(), minimal_height(64));
    assert_eq!(values(&tree), (0..64).collect::<Vec<_>>());
}

#[test]
fn balance_factor() {
    let mut tree = Tree::from_values(vec![2]);
    tree.insert(1);
    assert_eq!(tree.root().unwrap().balance_factor(), 1);

    tree.insert(3);
    tree.insert(4);
    tree.insert(5);
    assert_eq!(tree.root().unwrap().balance_factor(), -2);
    assert!(tree.find(&4).unwrap().is_balanced());
    assert!(!tree.find(&3).unwrap().is_balanced());
}

#[test]
fn parent_references_survive_mutation() {
    let mut tree = Tree::from_values(vec![25, 50, 75]);
    assert_eq!(tree.find(&75).and_then(Node::parent).map(|node| *node.value()), Some(50));

    tree.insert(10);
    let ten = tree.find(&10).unwrap();
    assert_eq!(ten.parent().map(|node| *node.value()), Some(25));
    assert_eq!(ten.level(), 3);
    assert_eq!(tree.depth(&10), Some(1));

    tree.insert(30);
    tree.insert(20);
    assert_eq!(tree.remove(&20), Some(20));
    assert_invariants(&tree);
    assert_eq!(tree.find(&30).unwrap().level(), 3);

    assert_eq!(tree.remove(&50), Some(50));
    assert_invariants(&tree);
    assert_eq!(*tree.root().unwrap().value(), 30);
    let levels: Vec<_> = [10, 25, 30, 75].iter().map(|value| tree.find(value).unwrap().level()).collect();
    assert_eq!(levels, [3, 2, 1, 2]);
}

#[test]
#[cfg_attr(miri, ignore)]
fn deep_skew_clones_and_grows() {
    let mut tree = Tree::from_values(vec![0]);
    for i in 1..10_000 { tree.insert(i); }
    assert_eq!(tree.tree_height(), 10_000);

    let mut copy = tree.clone();
    drop(tree);
    copy.insert(10_000);
    assert_eq!(copy.tree_height(), 10_001);
    assert_eq!(copy.find(&10_000).unwrap().level(), 10_001);
    assert_eq!(copy.remove(&5_000), Some(5_000));
    assert_eq!(copy.len(), 10_000);
}
